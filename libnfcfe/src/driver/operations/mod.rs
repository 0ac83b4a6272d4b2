pub mod discovery;
pub mod exchange;
pub mod listen;

// `listen` and `exchange` add inherent methods on `Driver`; discovery also
// carries its request type.
pub use discovery::DiscoveryRequest;
