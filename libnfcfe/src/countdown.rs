// libnfcfe/src/countdown.rs

//! Millisecond countdown on the low-power tick timer.
//!
//! There is one physical timer, so the remaining-milliseconds counter is a
//! process-wide [`CountdownState`]. Only [`CountdownTimer::start`] arms it and
//! only the tick handler decrements and disarms it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use log::{debug, trace};

use crate::constants::TICK_PERIOD_US;
use crate::hal::{TickAction, TickTimer};
use crate::signal::InterruptSignalBridge;

/// Remaining milliseconds plus the armed flag.
#[derive(Debug)]
pub struct CountdownState {
    remaining_ms: AtomicU32,
    armed: AtomicBool,
}

static GLOBAL_COUNTDOWN: CountdownState = CountdownState::new();

impl CountdownState {
    pub const fn new() -> Self {
        Self {
            remaining_ms: AtomicU32::new(0),
            armed: AtomicBool::new(false),
        }
    }

    /// The countdown backing the one hardware timer.
    pub fn global() -> &'static CountdownState {
        &GLOBAL_COUNTDOWN
    }

    /// A private countdown for a simulated timer (tests, host tools).
    pub fn leaked() -> &'static CountdownState {
        Box::leak(Box::new(CountdownState::new()))
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms.load(Ordering::Acquire)
    }

    fn arm(&self, duration_ms: u32) {
        let was_armed = self.armed.swap(true, Ordering::AcqRel);
        assert!(
            !was_armed,
            "countdown already armed ({} ms left)",
            self.remaining_ms()
        );
        self.remaining_ms.store(duration_ms, Ordering::Release);
    }

    /// One tick: returns true when this tick brought the counter to zero.
    fn tick(&self) -> bool {
        if !self.is_armed() {
            return false;
        }
        let prev = self
            .remaining_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                Some(v.saturating_sub(1))
            })
            .unwrap_or(0);
        if prev <= 1 {
            self.armed.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Drop an armed countdown while tearing the timer down.
    fn force_disarm(&self) {
        self.remaining_ms.store(0, Ordering::Release);
        self.armed.store(false, Ordering::Release);
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-shot millisecond countdown signalling `TIMER_EXPIRED` to the worker.
pub struct CountdownTimer {
    timer: Box<dyn TickTimer>,
    state: &'static CountdownState,
    signals: InterruptSignalBridge,
    configured: bool,
}

impl CountdownTimer {
    pub fn new(
        timer: Box<dyn TickTimer>,
        state: &'static CountdownState,
        signals: InterruptSignalBridge,
    ) -> Self {
        Self {
            timer,
            state,
            signals,
            configured: false,
        }
    }

    /// Install the tick handler on the peripheral. Idempotent.
    pub fn configure(&mut self) {
        if self.configured {
            return;
        }
        let state = self.state;
        let signals = self.signals.clone();
        self.timer.configure_periodic_tick(Arc::new(move || {
            if state.tick() {
                signals.on_timer_expired();
                TickAction::Stop
            } else {
                TickAction::Continue
            }
        }));
        self.configured = true;
        debug!("countdown timer configured");
    }

    /// Arm the countdown for `duration_ms` milliseconds.
    ///
    /// # Panics
    ///
    /// If a countdown is already armed, or the timer was never configured.
    pub fn start(&mut self, duration_ms: u32) {
        assert!(self.configured, "countdown timer started before configure()");
        self.state.arm(duration_ms.max(1));
        trace!("countdown armed for {} ms", duration_ms);
        self.timer.set_reload(TICK_PERIOD_US);
        self.timer.start_oneshot();
    }

    /// True once the counter has reached zero.
    pub fn expired(&self) -> bool {
        !self.state.is_armed() && self.state.remaining_ms() == 0
    }

    pub fn is_armed(&self) -> bool {
        self.state.is_armed()
    }

    pub fn state(&self) -> &'static CountdownState {
        self.state
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if self.state.is_armed() {
            self.timer.stop();
            self.state.force_disarm();
        }
    }
}
