// libnfcfe/src/prelude.rs

pub use crate::config::DriverConfig;
pub use crate::driver::{DiscoveryRequest, Driver, DriverBuilder};
pub use crate::engine::{EngineCode, EngineState, ExchangeStatus, RfEngine, StatusClass};
pub use crate::power::PowerState;
pub use crate::signal::{InterruptSignalBridge, WakeFlags};
pub use crate::{
    ActivationParams, DeviceDescriptor, DiscoveredDeviceList, Error, ExchangeKind,
    ListenIdentity, Nfcid, Result, TechMask, Technology, TxRxContext,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, frame_to_hex, ms};
