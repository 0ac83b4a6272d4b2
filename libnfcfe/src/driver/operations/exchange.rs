// libnfcfe/src/driver/operations/exchange.rs

use std::thread;

use log::{debug, trace, warn};

use crate::driver::Driver;
use crate::engine::{ExchangeRequest, ExchangeStatus, RfEngine, StatusClass};
use crate::signal::WakeFlags;
use crate::types::TxRxContext;
use crate::utils::{CycleDeadline, frame_to_hex};
use crate::{Error, Result};

impl<E: RfEngine> Driver<E> {
    /// Run one transmit/receive exchange with the activated device.
    ///
    /// `ctx.tx`/`ctx.tx_bits` must already hold the framed command. On
    /// success `ctx.rx`/`ctx.rx_bits` hold the answer. The hard timeout
    /// restarts whenever the engine shows progress, so only a stalled
    /// exchange times out. A run of identical pending statuses with no
    /// engine event counts as no progress. Every error path leaves the
    /// engine deactivated and the front end in low power.
    pub fn exchange(&mut self, ctx: &mut TxRxContext<'_>, deactivate_after: bool) -> Result<()> {
        self.begin_call("exchange");
        if ctx.tx_bits > ctx.tx.len() * 8 {
            return Err(Error::InvalidLength {
                expected: ctx.tx_bits.div_ceil(8),
                actual: ctx.tx.len(),
            });
        }
        ctx.rx_bits = 0;

        trace!("exchange tx: {}", frame_to_hex(ctx.tx, ctx.tx_bits));
        let request = ExchangeRequest {
            tx: ctx.tx,
            tx_bits: ctx.tx_bits,
            kind: ctx.kind,
        };
        if let Err(code) = self.engine.exchange_start(&request) {
            self.abort_session();
            return Err(Error::rejected("exchange_start", code));
        }

        match self.run_exchange(ctx) {
            Ok(()) => {
                trace!("exchange rx: {}", frame_to_hex(ctx.received(), ctx.rx_bits));
                if deactivate_after {
                    self.close_session()?;
                }
                Ok(())
            }
            Err(e) => {
                warn!("exchange: {}", e);
                self.abort_session();
                Err(e)
            }
        }
    }

    fn run_exchange(&mut self, ctx: &mut TxRxContext<'_>) -> Result<()> {
        let mut deadline =
            CycleDeadline::start(&*self.cycles, self.config.exchange_hard_timeout_ms);
        let mut last = ExchangeStatus::Busy;
        let mut polls: u32 = 0;

        loop {
            self.engine.worker();
            let status = self.engine.exchange_status();
            polls = polls.wrapping_add(1);

            match status.class() {
                StatusClass::Complete => {
                    debug!("exchange: done after {} poll(s)", polls);
                    return self.copy_received(ctx);
                }
                StatusClass::Fatal => return Err(Error::ExchangeFatal(status)),
                StatusClass::Pending | StatusClass::Recoverable => {
                    let event = !self.signals.take(WakeFlags::ENGINE_EVENT).is_empty();
                    if event || status != last {
                        trace!("exchange: {:?} -> {:?}", last, status);
                        deadline.reset(&*self.cycles);
                        last = status;
                    } else if deadline.expired(&*self.cycles) {
                        return Err(Error::Timeout);
                    }
                    if self.stop_requested() {
                        return Err(Error::Cancelled);
                    }
                    thread::yield_now();
                }
            }
        }
    }

    fn copy_received(&self, ctx: &mut TxRxContext<'_>) -> Result<()> {
        let (frame, bits) = self.engine.received();
        let len = bits.div_ceil(8).min(frame.len());
        if ctx.rx.len() < len {
            return Err(Error::InvalidLength {
                expected: len,
                actual: ctx.rx.len(),
            });
        }
        ctx.rx[..len].copy_from_slice(&frame[..len]);
        ctx.rx_bits = bits.min(len * 8);
        Ok(())
    }
}
