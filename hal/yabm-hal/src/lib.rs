//! YABM Hardware Abstraction Layer
//!
//! This crate defines the hardware collaborators that board support code
//! implements for each SoC (RTL8196C, RTL8196E, ...). The script-facing
//! logic in `yabm-core` is written against these traits only.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Script bindings (board firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yabm-core (codec, sequencer, MIB)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  yabm-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Bit-banged I2C byte primitives
//! - [`mib::MibSource`] - Switch MIB counter memory
//!
//! Millisecond delays use [`embedded_hal::delay::DelayNs`] directly.
//!
//! [`embedded_hal::delay::DelayNs`]: https://docs.rs/embedded-hal/1.0/embedded_hal/delay/trait.DelayNs.html

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod mib;

// Re-export key traits at crate root for convenience
pub use i2c::{I2cBus, I2cPins};
pub use mib::MibSource;
