// libnfcfe/src/lib.rs

//! libnfcfe
//!
//! Driver for a contactless (13.56 MHz) RF front end sitting on top of an
//! external RF protocol engine: power sequencing, reader-mode discovery,
//! card emulation (listen) and bounded data exchange.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod countdown;
pub mod driver;
pub mod engine;
pub mod error;
pub mod hal;
pub mod power;
pub mod prelude;
pub mod signal;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the value types in `types` are available to consumers and to the
// `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
