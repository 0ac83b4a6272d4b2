// libnfcfe/src/engine/mock.rs

use std::collections::VecDeque;

use crate::engine::traits::{
    EngineCode, EngineResult, EngineState, EventCallback, ExchangeRequest, ExchangeStatus,
    RfEngine,
};
use crate::types::{DeviceDescriptor, ListenIdentity, TechMask};

/// Engine calls recorded by [`MockEngine`]. Worker steps and status polls are
/// only counted, not logged, since loops issue thousands of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Initialize,
    EnterLowPower,
    ExitLowPower,
    FieldOn,
    FieldOff,
    DiscoverStart {
        tech_mask: TechMask,
        device_limit: usize,
        total_duration_ms: u32,
    },
    ListenStart,
    Select(usize),
    Deactivate,
    ExchangeStart { tx: Vec<u8>, tx_bits: usize },
}

/// Scripted RF engine for unit tests. Each `worker()` step pops the next
/// state from `state_script`; each `exchange_status()` pops the next status
/// from `status_script` (and reports `Busy` once it runs dry).
#[derive(Default)]
pub struct MockEngine {
    pub calls: Vec<EngineCall>,
    pub state_script: VecDeque<EngineState>,
    pub status_script: VecDeque<ExchangeStatus>,
    pub devices: Vec<DeviceDescriptor>,
    pub rx_frame: Vec<u8>,
    pub rx_bits: usize,
    /// Fire the registered event callback after every worker step.
    pub notify_on_step: bool,
    /// Testing hook: operations that should fail with the given code.
    pub failures: Vec<(&'static str, EngineCode)>,
    pub worker_steps: usize,
    pub status_polls: usize,
    pub field: bool,
    pub low_power: bool,
    pub identity: Option<ListenIdentity>,
    state: EngineState,
    callback: Option<EventCallback>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue states the engine walks through, one per worker step.
    pub fn push_states(&mut self, states: &[EngineState]) {
        self.state_script.extend(states.iter().copied());
    }

    pub fn push_statuses(&mut self, statuses: &[ExchangeStatus]) {
        self.status_script.extend(statuses.iter().copied());
    }

    pub fn push_device(&mut self, device: DeviceDescriptor) {
        self.devices.push(device);
    }

    pub fn set_received(&mut self, frame: &[u8]) {
        self.rx_frame = frame.to_vec();
        self.rx_bits = frame.len() * 8;
    }

    /// Make every later call of `operation` fail with `code`.
    pub fn fail_on(&mut self, operation: &'static str, code: EngineCode) {
        self.failures.push((operation, code));
    }

    /// Force the current state, bypassing the script.
    pub fn set_state(&mut self, state: EngineState) {
        self.state = state;
    }

    /// Invoke the registered callback as the engine's interrupt would.
    pub fn fire_event(&self) {
        if let Some(cb) = &self.callback {
            cb();
        }
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    pub fn count(&self, call: &EngineCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    fn check(&self, operation: &'static str) -> EngineResult<()> {
        match self.failures.iter().find(|(op, _)| *op == operation) {
            Some((_, code)) => Err(*code),
            None => Ok(()),
        }
    }
}

impl RfEngine for MockEngine {
    fn initialize(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::Initialize);
        self.check("initialize")?;
        self.state = EngineState::Idle;
        Ok(())
    }

    fn set_event_callback(&mut self, callback: EventCallback) {
        self.callback = Some(callback);
    }

    fn enter_low_power(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::EnterLowPower);
        self.check("enter_low_power")?;
        self.field = false;
        self.low_power = true;
        Ok(())
    }

    fn exit_low_power(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::ExitLowPower);
        self.check("exit_low_power")?;
        self.low_power = false;
        Ok(())
    }

    fn field_on(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::FieldOn);
        self.check("field_on")?;
        self.field = true;
        Ok(())
    }

    fn field_off(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::FieldOff);
        self.check("field_off")?;
        self.field = false;
        Ok(())
    }

    fn discover_start(
        &mut self,
        tech_mask: TechMask,
        device_limit: usize,
        total_duration_ms: u32,
    ) -> EngineResult<()> {
        self.calls.push(EngineCall::DiscoverStart {
            tech_mask,
            device_limit,
            total_duration_ms,
        });
        self.check("discover_start")?;
        if self.state != EngineState::Idle {
            return Err(EngineCode::WRONG_STATE);
        }
        self.field = true;
        self.state = EngineState::Discovery;
        Ok(())
    }

    fn listen_start(&mut self, identity: &ListenIdentity) -> EngineResult<()> {
        self.calls.push(EngineCall::ListenStart);
        self.check("listen_start")?;
        if self.state != EngineState::Idle {
            return Err(EngineCode::WRONG_STATE);
        }
        self.identity = Some(*identity);
        self.state = EngineState::Discovery;
        Ok(())
    }

    fn select_candidate(&mut self, index: usize) -> EngineResult<()> {
        self.calls.push(EngineCall::Select(index));
        self.check("select_candidate")?;
        if self.state != EngineState::PollSelect {
            return Err(EngineCode::WRONG_STATE);
        }
        Ok(())
    }

    fn worker(&mut self) {
        self.worker_steps += 1;
        if let Some(next) = self.state_script.pop_front() {
            self.state = next;
        }
        if self.notify_on_step {
            self.fire_event();
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn deactivate(&mut self) -> EngineResult<()> {
        self.calls.push(EngineCall::Deactivate);
        self.check("deactivate")?;
        self.field = false;
        self.state = EngineState::Idle;
        Ok(())
    }

    fn discovered_devices(&self, out: &mut [DeviceDescriptor]) -> usize {
        let n = self.devices.len().min(out.len());
        out[..n].copy_from_slice(&self.devices[..n]);
        n
    }

    fn exchange_start(&mut self, request: &ExchangeRequest<'_>) -> EngineResult<()> {
        self.calls.push(EngineCall::ExchangeStart {
            tx: request.tx.to_vec(),
            tx_bits: request.tx_bits,
        });
        self.check("exchange_start")?;
        if !self.state.is_activated() {
            return Err(EngineCode::WRONG_STATE);
        }
        self.state = EngineState::DataExchange;
        Ok(())
    }

    fn exchange_status(&mut self) -> ExchangeStatus {
        self.status_polls += 1;
        let status = self.status_script.pop_front().unwrap_or(ExchangeStatus::Busy);
        if status == ExchangeStatus::Done {
            self.state = EngineState::DataExchangeDone;
        }
        status
    }

    fn received(&self) -> (&[u8], usize) {
        (&self.rx_frame, self.rx_bits)
    }
}
