//! Small helpers shared across the crate: hex formatting for frame logs and
//! deadline bookkeeping.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
