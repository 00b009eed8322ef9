//! Board-agnostic logic behind the YABM script bindings
//!
//! This crate contains the parts of the bindings that do real work
//! instead of forwarding to board code:
//!
//! - Textual IPv4 / fixed-width IPv6 address codec
//! - I2C transaction sequencer (scan, register and burst transfers)
//! - Switch MIB counter table and address arithmetic
//! - Board configuration types
//!
//! Hardware access goes through the traits in `yabm-hal` and
//! `embedded_hal::delay::DelayNs`.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod addr;
pub mod config;
pub mod i2c;
pub mod mib;

pub use addr::{AddrError, AddressFamily, IpAddress};
pub use config::{BoardConfig, BoardModel, I2cTimings};
pub use i2c::{I2cSequencer, ScanReport, Termination, TransactionError};
pub use mib::{MibCounter, MibReader};
