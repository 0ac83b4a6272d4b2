// libnfcfe/src/hal/timer.rs

use std::sync::Arc;

/// What the timer does after running its tick handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Reload and tick again after one more period.
    Continue,
    /// Deconfigure the peripheral; no further ticks until `start_oneshot`.
    Stop,
}

/// Tick interrupt handler. Runs in interrupt context (or on a timer thread on
/// the host) and must not block.
pub type TickHandler = Arc<dyn Fn() -> TickAction + Send + Sync>;

/// Low-power timer peripheral driven one period at a time.
///
/// `start_oneshot` arms a single period. When it elapses the handler runs;
/// returning [`TickAction::Continue`] reloads the same period, returning
/// [`TickAction::Stop`] leaves the peripheral stopped.
pub trait TickTimer: Send {
    /// Install the interrupt handler. Called once at driver bring-up.
    fn configure_periodic_tick(&mut self, handler: TickHandler);

    /// Period of one tick in microseconds.
    fn set_reload(&mut self, period_us: u32);

    fn start_oneshot(&mut self);

    fn stop(&mut self);
}
