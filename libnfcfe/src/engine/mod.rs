// libnfcfe/src/engine/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{EngineCall, MockEngine};
pub use traits::{
    EngineCode, EngineResult, EngineState, EventCallback, ExchangeRequest, ExchangeStatus,
    RfEngine, StatusClass,
};
