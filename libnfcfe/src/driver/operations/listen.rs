// libnfcfe/src/driver/operations/listen.rs

use std::thread;

use log::{debug, warn};

use crate::driver::Driver;
use crate::engine::{EngineState, RfEngine};
use crate::types::ListenIdentity;
use crate::utils::{CycleDeadline, bytes_to_hex};
use crate::{Error, Result};

impl<E: RfEngine> Driver<E> {
    /// Emulate an NFC-A device with `identity` until a reader activates it.
    ///
    /// Busy-polls the engine, yielding between steps, against a cycle-counter
    /// deadline of `timeout_ms`. Returns `Ok(false)` on timeout with the
    /// engine deactivated; on `Ok(true)` the session stays active for an
    /// exchange.
    ///
    /// # Panics
    ///
    /// If the driver is uninitialized or a session is already active.
    pub fn listen(&mut self, identity: &ListenIdentity, timeout_ms: u32) -> Result<bool> {
        self.begin_call("listen");
        assert_eq!(
            self.engine.state(),
            EngineState::Idle,
            "listen called while a session is active"
        );

        debug!(
            "listen: nfcid1={} sens_res={} sel_res={:#04x} timeout={}ms",
            identity.nfcid1.to_hex(),
            bytes_to_hex(&identity.sens_res),
            identity.sel_res,
            timeout_ms
        );
        self.power.exit_sleep(&mut self.engine)?;
        if let Err(code) = self.engine.listen_start(identity) {
            self.abort_session();
            return Err(Error::rejected("listen_start", code));
        }

        let deadline = CycleDeadline::start(&*self.cycles, timeout_ms);
        loop {
            self.engine.worker();
            if self.engine.state().is_activated() {
                debug!("listen: activated by reader");
                return Ok(true);
            }
            if self.stop_requested() {
                warn!("listen: cancelled");
                self.abort_session();
                return Err(Error::Cancelled);
            }
            if deadline.expired(&*self.cycles) {
                warn!("listen: no reader within {} ms", timeout_ms);
                self.close_session()?;
                return Ok(false);
            }
            thread::yield_now();
        }
    }
}
