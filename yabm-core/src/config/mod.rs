//! Configuration types
//!
//! Board identification and I2C wiring, stored as postcard binary data.

pub mod board;

pub use board::*;
