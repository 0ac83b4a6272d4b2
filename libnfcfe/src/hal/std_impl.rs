// libnfcfe/src/hal/std_impl.rs

//! Host implementations backed by `std` threads and `Instant`, so the driver
//! can run against a simulated engine on a desktop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::trace;

use crate::hal::cycles::CycleCounter;
use crate::hal::timer::{TickAction, TickHandler, TickTimer};

/// Tick timer emulated by a background thread that sleeps one period per
/// tick while armed.
pub struct StdTickTimer {
    handler: Option<TickHandler>,
    period: Duration,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl StdTickTimer {
    pub fn new() -> Self {
        Self {
            handler: None,
            period: Duration::from_millis(1),
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for StdTickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickTimer for StdTickTimer {
    fn configure_periodic_tick(&mut self, handler: TickHandler) {
        self.handler = Some(handler);
    }

    fn set_reload(&mut self, period_us: u32) {
        self.period = Duration::from_micros(period_us.max(1) as u64);
    }

    fn start_oneshot(&mut self) {
        let Some(handler) = self.handler.clone() else {
            return;
        };
        self.stop();

        // Each arming gets its own flag so a late tick from a previous run
        // cannot observe the new one.
        let running = Arc::new(AtomicBool::new(true));
        self.running = running.clone();
        let period = self.period;
        trace!("std tick timer armed, period={:?}", period);
        self.thread = Some(thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                thread::sleep(period);
                if !running.load(Ordering::Acquire) {
                    break;
                }
                if handler() == TickAction::Stop {
                    running.store(false, Ordering::Release);
                }
            }
        }));
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(t) = self.thread.take() {
            if t.thread().id() != thread::current().id() {
                let _ = t.join();
            }
        }
    }
}

impl Drop for StdTickTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Monotonic microsecond counter truncated to `u32`, standing in for a CPU
/// cycle counter.
#[derive(Debug, Clone, Copy)]
pub struct StdCycleCounter {
    origin: Instant,
}

impl StdCycleCounter {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for StdCycleCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleCounter for StdCycleCounter {
    fn cycles(&self) -> u32 {
        self.origin.elapsed().as_micros() as u32
    }

    fn frequency_hz(&self) -> u32 {
        1_000_000
    }
}
