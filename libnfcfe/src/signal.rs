// libnfcfe/src/signal.rs

//! Interrupt-to-worker signaling.
//!
//! Interrupt handlers (the engine's event hook, the tick timer) never touch
//! the engine themselves; they OR a bit into a shared flag word and unpark the
//! one registered worker thread. The worker consumes the bits it waits for.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, Thread};
use std::time::Instant;

use derive_more::{BitAnd, BitOr};
use log::trace;

use crate::engine::EventCallback;

/// Wake flag bitmask. Bits accumulate until consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BitOr, BitAnd)]
pub struct WakeFlags(u32);

impl WakeFlags {
    pub const NONE: Self = Self(0);
    pub const ENGINE_EVENT: Self = Self(1 << 0);
    pub const TIMER_EXPIRED: Self = Self(1 << 1);
    pub const STOP_REQUESTED: Self = Self(1 << 2);
    pub const ALL: Self = Self(0b111);

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: WakeFlags) -> bool {
        self.0 & other.0 == other.0 && !other.is_empty()
    }
}

struct Shared {
    flags: AtomicU32,
    worker: OnceLock<Thread>,
}

/// Flag channel with many producers and one registered consumer thread.
/// Clones share the same channel.
#[derive(Clone)]
pub struct InterruptSignalBridge {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for InterruptSignalBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterruptSignalBridge")
            .field("flags", &self.peek())
            .field("worker", &self.shared.worker.get().map(|t| t.id()))
            .finish()
    }
}

impl Default for InterruptSignalBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptSignalBridge {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                flags: AtomicU32::new(0),
                worker: OnceLock::new(),
            }),
        }
    }

    /// Record the worker thread that receives wake-ups. The worker is fixed
    /// for the lifetime of the bridge.
    ///
    /// # Panics
    ///
    /// If a different thread was already registered.
    pub fn register(&self, worker: Thread) {
        let id = worker.id();
        let current = self.shared.worker.get_or_init(|| worker);
        assert_eq!(
            current.id(),
            id,
            "signal bridge already bound to worker {:?}",
            current.id()
        );
    }

    pub fn register_current(&self) {
        self.register(thread::current());
    }

    pub fn is_registered(&self) -> bool {
        self.shared.worker.get().is_some()
    }

    /// OR `flags` into the channel and wake the worker. Safe from any thread.
    pub fn post(&self, flags: WakeFlags) {
        self.shared.flags.fetch_or(flags.0, Ordering::AcqRel);
        if let Some(worker) = self.shared.worker.get() {
            worker.unpark();
        }
    }

    pub fn on_engine_event(&self) {
        self.post(WakeFlags::ENGINE_EVENT);
    }

    pub fn on_timer_expired(&self) {
        self.post(WakeFlags::TIMER_EXPIRED);
    }

    /// Ask the current blocking call to give up at its next wait/poll point.
    pub fn request_stop(&self) {
        trace!("stop requested");
        self.post(WakeFlags::STOP_REQUESTED);
    }

    /// Hook handed to the engine's `set_event_callback`.
    pub fn engine_callback(&self) -> EventCallback {
        let bridge = self.clone();
        Arc::new(move || bridge.on_engine_event())
    }

    pub fn peek(&self) -> WakeFlags {
        WakeFlags(self.shared.flags.load(Ordering::Acquire))
    }

    /// Consume and return whichever bits of `mask` are set.
    pub fn take(&self, mask: WakeFlags) -> WakeFlags {
        let prev = self.shared.flags.fetch_and(!mask.0, Ordering::AcqRel);
        WakeFlags(prev & mask.0)
    }

    pub fn clear(&self, mask: WakeFlags) {
        self.take(mask);
    }

    /// Block until any bit of `mask` is posted or `deadline` passes. Returns
    /// the consumed bits, or `WakeFlags::NONE` on timeout.
    pub fn wait_any(&self, mask: WakeFlags, deadline: Option<Instant>) -> WakeFlags {
        debug_assert!(
            self.shared
                .worker
                .get()
                .is_none_or(|w| w.id() == thread::current().id()),
            "wait_any called off the registered worker thread"
        );
        loop {
            let got = self.take(mask);
            if !got.is_empty() {
                return got;
            }
            match deadline {
                None => thread::park(),
                Some(d) => {
                    let now = Instant::now();
                    if now >= d {
                        return WakeFlags::NONE;
                    }
                    thread::park_timeout(d - now);
                }
            }
        }
    }
}
