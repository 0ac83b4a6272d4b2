// libnfcfe/src/engine/traits.rs

use std::sync::Arc;

use derive_more::Display;

use crate::types::{DeviceDescriptor, ExchangeKind, ListenIdentity, TechMask};

/// Raw return code of a synchronous engine call.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{:#06x}", _0)]
pub struct EngineCode(u16);

impl EngineCode {
    /// The call is not valid for the engine's current state.
    pub const WRONG_STATE: Self = Self(0x0001);
    /// The front end did not answer during bring-up or has not settled yet.
    pub const NOT_READY: Self = Self(0x0002);
    /// A parameter was out of range for the engine.
    pub const PARAM: Self = Self(0x0003);
    /// Bus error talking to the front end.
    pub const IO: Self = Self(0x0004);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineCode>;

/// Discrete engine states the driver reacts to. Anything finer grained stays
/// inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineState {
    #[default]
    Idle,
    Discovery,
    PollSelect,
    Activated,
    DataExchange,
    DataExchangeDone,
}

impl EngineState {
    /// A device (polled or emulated-for) is ready for an exchange.
    pub fn is_activated(&self) -> bool {
        matches!(
            self,
            EngineState::Activated | EngineState::DataExchange | EngineState::DataExchangeDone
        )
    }
}

/// Closed set of exchange outcomes reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExchangeStatus {
    Busy,
    Done,
    /// The engine parked the front end between frames and will resume.
    SleepRequest,
    /// The card asked for more time (S(WTX) / NFC-DEP RTOX).
    WaitingTimeExtension,
    /// A chained frame is still being assembled.
    Chaining,
    Timeout,
    Crc,
    Parity,
    Framing,
    Protocol,
    LinkLoss,
}

/// How the exchange loop treats a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Pending,
    Recoverable,
    Complete,
    Fatal,
}

impl ExchangeStatus {
    pub fn class(&self) -> StatusClass {
        match self {
            ExchangeStatus::Busy => StatusClass::Pending,
            ExchangeStatus::SleepRequest
            | ExchangeStatus::WaitingTimeExtension
            | ExchangeStatus::Chaining => StatusClass::Recoverable,
            ExchangeStatus::Done => StatusClass::Complete,
            ExchangeStatus::Timeout
            | ExchangeStatus::Crc
            | ExchangeStatus::Parity
            | ExchangeStatus::Framing
            | ExchangeStatus::Protocol
            | ExchangeStatus::LinkLoss => StatusClass::Fatal,
        }
    }

    /// Busy or recoverable: keep stepping the engine.
    pub fn is_in_progress(&self) -> bool {
        matches!(self.class(), StatusClass::Pending | StatusClass::Recoverable)
    }
}

/// Upper-layer hook the engine calls (possibly from interrupt context) when
/// it has produced new state to process.
pub type EventCallback = Arc<dyn Fn() + Send + Sync>;

/// Outbound half of an exchange, as handed to the engine.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeRequest<'a> {
    pub tx: &'a [u8],
    pub tx_bits: usize,
    pub kind: ExchangeKind,
}

/// Public surface of the external RF protocol engine. The engine is not
/// reentrant: only the worker thread calls these methods.
pub trait RfEngine {
    /// Bring up the front end.
    fn initialize(&mut self) -> EngineResult<()>;

    /// Register the hook invoked whenever the engine needs its worker run.
    fn set_event_callback(&mut self, callback: EventCallback);

    fn enter_low_power(&mut self) -> EngineResult<()>;

    fn exit_low_power(&mut self) -> EngineResult<()>;

    fn field_on(&mut self) -> EngineResult<()>;

    fn field_off(&mut self) -> EngineResult<()>;

    /// Start polling the given technologies. The engine stops on its own
    /// after `total_duration_ms` without a device.
    fn discover_start(
        &mut self,
        tech_mask: TechMask,
        device_limit: usize,
        total_duration_ms: u32,
    ) -> EngineResult<()>;

    /// Configure listen-only mode on NFC-A with the given identity.
    fn listen_start(&mut self, identity: &ListenIdentity) -> EngineResult<()>;

    /// Select one of the pending candidates while in `PollSelect`.
    fn select_candidate(&mut self, index: usize) -> EngineResult<()>;

    /// Advance the engine's internal state machine by one step.
    fn worker(&mut self);

    fn state(&self) -> EngineState;

    fn deactivate(&mut self) -> EngineResult<()>;

    /// Copy up to `out.len()` discovered devices into `out`, returning how
    /// many were written.
    fn discovered_devices(&self, out: &mut [DeviceDescriptor]) -> usize;

    fn exchange_start(&mut self, request: &ExchangeRequest<'_>) -> EngineResult<()>;

    fn exchange_status(&mut self) -> ExchangeStatus;

    /// Last received frame and its length in bits. Valid after `Done`.
    fn received(&self) -> (&[u8], usize);
}
