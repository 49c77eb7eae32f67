//! Core traits and types shared by cycle-stepped CPU cores and their hosts.
//!
//! A host owns the clock: it drives every component one tick at a time and
//! decides how CPU cycles interleave with other devices.

mod bus;
mod cpu;
mod observable;
mod tickable;
mod ticks;

pub use bus::{Bus, SimpleBus};
pub use cpu::{Cpu, Interrupt};
pub use observable::{Observable, Value};
pub use tickable::Tickable;
pub use ticks::Ticks;
