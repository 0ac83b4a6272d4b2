// libnfcfe/src/error.rs

use thiserror::Error;

use crate::engine::{EngineCode, ExchangeStatus};

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No terminal engine state was reached within the budget.
    #[error("operation timed out")]
    Timeout,

    /// A synchronous engine call refused the request.
    #[error("engine rejected {operation}: code={code}")]
    EngineRejected {
        operation: &'static str,
        code: EngineCode,
    },

    /// The exchange ended in a status outside the recoverable set.
    #[error("exchange failed: {0:?}")]
    ExchangeFatal(ExchangeStatus),

    /// `request_stop()` was observed at a wait/poll point.
    #[error("operation cancelled by stop request")]
    Cancelled,

    #[error("invalid buffer length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("missing driver component: {0}")]
    MissingComponent(&'static str),
}

impl Error {
    /// Wrap an engine return code for the named operation.
    pub fn rejected(operation: &'static str, code: EngineCode) -> Self {
        Error::EngineRejected { operation, code }
    }

    /// Timeouts and cancellations leave the driver idle; retrying is safe.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout | Error::Cancelled)
    }

    /// The device answered but the exchange broke; the user should present
    /// the card again rather than simply retry.
    pub fn is_fatal_exchange(&self) -> bool {
        matches!(self, Error::ExchangeFatal(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
