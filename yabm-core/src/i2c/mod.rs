//! I2C transaction sequencing
//!
//! Composes the byte primitives of [`yabm_hal::I2cBus`] into complete bus
//! transactions, checking the device acknowledgement after every byte.

pub mod sequencer;
pub mod transaction;

pub use sequencer::{I2cSequencer, ScanReport, SCAN_ADDRESS_COUNT};
pub use transaction::{
    address_byte, Direction, Phase, Step, Termination, TransactionError, TransactionState,
    MAX_ADDRESS,
};
