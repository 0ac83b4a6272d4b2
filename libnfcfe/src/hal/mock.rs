// libnfcfe/src/hal/mock.rs

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::hal::cycles::CycleCounter;
use crate::hal::timer::{TickAction, TickHandler, TickTimer};

#[derive(Default)]
struct TimerInner {
    handler: Option<TickHandler>,
    reload_us: u32,
    running: bool,
    auto_fire: bool,
    starts: usize,
    stops: usize,
    ticks: usize,
}

/// Mock tick timer for unit tests. Clones share state, so a test can keep a
/// handle after moving the timer into a driver.
///
/// In auto-fire mode `start_oneshot` runs the handler synchronously until it
/// asks to stop; otherwise ticks are delivered with [`MockTimer::fire`].
#[derive(Clone, Default)]
pub struct MockTimer {
    inner: Arc<Mutex<TimerInner>>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_firing() -> Self {
        let t = Self::new();
        t.lock().auto_fire = true;
        t
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TimerInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Deliver one tick if armed. Returns false when the timer was idle.
    pub fn fire(&self) -> bool {
        let handler = {
            let g = self.lock();
            if !g.running {
                return false;
            }
            g.handler.clone()
        };
        let Some(handler) = handler else {
            return false;
        };
        let action = handler();
        let mut g = self.lock();
        g.ticks += 1;
        if action == TickAction::Stop {
            g.running = false;
            g.stops += 1;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn is_configured(&self) -> bool {
        self.lock().handler.is_some()
    }

    pub fn reload_us(&self) -> u32 {
        self.lock().reload_us
    }

    pub fn starts(&self) -> usize {
        self.lock().starts
    }

    pub fn stops(&self) -> usize {
        self.lock().stops
    }

    pub fn ticks(&self) -> usize {
        self.lock().ticks
    }
}

impl TickTimer for MockTimer {
    fn configure_periodic_tick(&mut self, handler: TickHandler) {
        self.lock().handler = Some(handler);
    }

    fn set_reload(&mut self, period_us: u32) {
        self.lock().reload_us = period_us;
    }

    fn start_oneshot(&mut self) {
        let auto = {
            let mut g = self.lock();
            g.running = true;
            g.starts += 1;
            g.auto_fire
        };
        if auto {
            while self.fire() && self.is_running() {}
        }
    }

    fn stop(&mut self) {
        let mut g = self.lock();
        if g.running {
            g.running = false;
            g.stops += 1;
        }
    }
}

/// Shared cycle counter that advances by `step` on every read, so busy-poll
/// loops see time pass without sleeping.
#[derive(Debug, Clone)]
pub struct MockCycleCounter {
    now: Arc<AtomicU32>,
    step: u32,
    frequency_hz: u32,
}

impl MockCycleCounter {
    /// 1 MHz counter advancing `step` cycles per read.
    pub fn new(step: u32) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(0)),
            step,
            frequency_hz: 1_000_000,
        }
    }

    pub fn with_frequency(mut self, hz: u32) -> Self {
        self.frequency_hz = hz;
        self
    }

    /// Start near the wrap point to exercise wrapping arithmetic.
    pub fn starting_at(self, value: u32) -> Self {
        self.now.store(value, Ordering::SeqCst);
        self
    }

    pub fn advance(&self, cycles: u32) {
        self.now.fetch_add(cycles, Ordering::SeqCst);
    }

    pub fn peek(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}

impl CycleCounter for MockCycleCounter {
    fn cycles(&self) -> u32 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }

    fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }
}
