// libnfcfe/src/driver/mod.rs

mod handle;
pub use handle::Driver;

pub mod builder;
pub mod operations;

pub use builder::DriverBuilder;
pub use operations::DiscoveryRequest;
