//! Hardware abstractions the driver sits on: a tick timer peripheral and a
//! free-running cycle counter. Host (`std_impl`) and test (`mock`)
//! implementations live next to the traits.

pub mod cycles;
pub mod mock;
pub mod std_impl;
pub mod timer;

pub use cycles::CycleCounter;
pub use mock::{MockCycleCounter, MockTimer};
pub use std_impl::{StdCycleCounter, StdTickTimer};
pub use timer::{TickAction, TickHandler, TickTimer};
