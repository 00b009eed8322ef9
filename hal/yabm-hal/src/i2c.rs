//! I2C bus abstractions
//!
//! Byte-level primitives of a bit-banged I2C master. Chip-specific code
//! drives the SCL/SDA lines; transaction sequencing is built on top of
//! these by `yabm-core`.

/// GPIO lines used for the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cPins {
    /// Clock line GPIO number
    pub scl: u8,
    /// Data line GPIO number
    pub sda: u8,
}

impl I2cPins {
    /// Create a pin pair
    pub const fn new(scl: u8, sda: u8) -> Self {
        Self { scl, sda }
    }
}

/// I2C bus master primitives
///
/// Every call runs to completion before returning. The bus is owned by a
/// single caller for the whole transaction; implementations do no locking.
pub trait I2cBus {
    /// Configure the SCL/SDA pins and release the bus to idle
    fn init(&mut self, pins: I2cPins);

    /// Clock one byte out onto the bus
    ///
    /// # Arguments
    /// * `byte` - Byte to send (address bytes carry the R/W bit in bit 0)
    /// * `start` - Issue a start condition before the byte
    /// * `stop` - Issue a stop condition after the byte
    ///
    /// Returns `true` if the addressed device acknowledged the byte.
    fn write_byte(&mut self, byte: u8, start: bool, stop: bool) -> bool;

    /// Clock one byte in from the bus
    ///
    /// When `stop` is set the master NACKs the byte and issues a stop
    /// condition, ending the read.
    fn read_byte(&mut self, stop: bool) -> u8;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    fn init(&mut self, pins: I2cPins) {
        T::init(self, pins)
    }

    fn write_byte(&mut self, byte: u8, start: bool, stop: bool) -> bool {
        T::write_byte(self, byte, start, stop)
    }

    fn read_byte(&mut self, stop: bool) -> u8 {
        T::read_byte(self, stop)
    }
}
