//! Board configuration types
//!
//! Identifies the SoC the firmware runs on and carries the I2C wiring and
//! timing. Stored in flash as postcard-serialized binary data when the
//! `serde` feature is enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use yabm_hal::i2c::I2cPins;

/// Magic number to identify a stored board configuration
pub const CONFIG_MAGIC: u32 = 0x5941_424D; // "YABM"

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Largest encoded configuration
#[cfg(feature = "serde")]
pub const MAX_CONFIG_SIZE: usize = 32;

/// Board (SoC family) identifiers exposed to scripts as `MODULE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BoardModel {
    #[default]
    Unknown = 0,
    Rtl8196c = 1,
    Bcm4712 = 2,
    Rtl8196e = 3,
    Bcm5350 = 4,
    Bcm5352 = 5,
    Bcm5354 = 6,
    Adm5120 = 7,
    Adm5120p = 8,
    Ks8695 = 9,
    Rtl8198 = 10,
    Rtl8197d = 11,
    /// Host build without hardware
    Dummy = 100,
}

impl BoardModel {
    /// Numeric `MODULE_*` identifier
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a model by identifier
    pub fn from_id(id: u8) -> Option<Self> {
        use BoardModel::*;

        let model = match id {
            0 => Unknown,
            1 => Rtl8196c,
            2 => Bcm4712,
            3 => Rtl8196e,
            4 => Bcm5350,
            5 => Bcm5352,
            6 => Bcm5354,
            7 => Adm5120,
            8 => Adm5120p,
            9 => Ks8695,
            10 => Rtl8198,
            11 => Rtl8197d,
            100 => Dummy,
            _ => return None,
        };
        Some(model)
    }

    /// Realtek SoCs carry the switch MIB block and the I2C bindings
    pub fn has_switch_mib(self) -> bool {
        matches!(
            self,
            BoardModel::Rtl8196c | BoardModel::Rtl8196e | BoardModel::Rtl8198 | BoardModel::Rtl8197d
        )
    }
}

/// Fixed waits used by the I2C sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cTimings {
    /// Bus settling time after each scan probe
    pub probe_delay_ms: u32,
    /// Wait between setting the register pointer and reading it back
    pub readback_delay_ms: u32,
}

impl Default for I2cTimings {
    fn default() -> Self {
        Self {
            probe_delay_ms: 10,
            readback_delay_ms: 10,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Layout version
    pub version: u8,
    /// SoC family
    pub model: BoardModel,
    /// GPIO used as I2C clock
    pub scl_pin: u8,
    /// GPIO used as I2C data
    pub sda_pin: u8,
    /// I2C sequencer waits
    pub i2c_timings: I2cTimings,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(BoardModel::default(), 0, 1)
    }
}

impl BoardConfig {
    /// Create a configuration with default timings
    pub const fn new(model: BoardModel, scl_pin: u8, sda_pin: u8) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            model,
            scl_pin,
            sda_pin,
            i2c_timings: I2cTimings {
                probe_delay_ms: 10,
                readback_delay_ms: 10,
            },
        }
    }

    /// Check if the stored header matches this build
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }

    /// Pins to hand to the I2C sequencer
    pub fn i2c_pins(&self) -> I2cPins {
        I2cPins::new(self.scl_pin, self.sda_pin)
    }
}

/// Configuration storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Encoding failed (buffer too small)
    Serialize,
    /// Stored bytes are not a configuration
    Deserialize,
    /// Magic or version mismatch
    InvalidHeader,
}

#[cfg(feature = "serde")]
impl BoardConfig {
    /// Encode into `buf`, returning the used prefix
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode and validate a stored configuration
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if !config.is_valid() {
            return Err(ConfigError::InvalidHeader);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids() {
        assert_eq!(BoardModel::Rtl8196c.id(), 1);
        assert_eq!(BoardModel::Dummy.id(), 100);
        assert_eq!(BoardModel::from_id(11), Some(BoardModel::Rtl8197d));
        assert_eq!(BoardModel::from_id(12), None);

        for id in (0..=11).chain([100]) {
            let model = BoardModel::from_id(id).unwrap();
            assert_eq!(model.id(), id);
        }
    }

    #[test]
    fn test_switch_mib_support() {
        assert!(BoardModel::Rtl8196c.has_switch_mib());
        assert!(BoardModel::Rtl8196e.has_switch_mib());
        assert!(!BoardModel::Bcm5354.has_switch_mib());
        assert!(!BoardModel::Dummy.has_switch_mib());
    }

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.model, BoardModel::Unknown);
        assert_eq!(config.i2c_timings, I2cTimings::default());
        assert_eq!(config.i2c_timings.probe_delay_ms, 10);
        assert_eq!(config.i2c_timings.readback_delay_ms, 10);
    }

    #[test]
    fn test_i2c_pins() {
        let config = BoardConfig::new(BoardModel::Rtl8196c, 9, 10);
        assert_eq!(config.i2c_pins(), I2cPins::new(9, 10));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_storage() {
        let config = BoardConfig::new(BoardModel::Rtl8196e, 4, 5);
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let encoded = config.to_slice(&mut buf).unwrap();

        assert_eq!(BoardConfig::from_bytes(encoded), Ok(config));
        assert_eq!(
            BoardConfig::from_bytes(&[0xFF; 4]),
            Err(ConfigError::Deserialize)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_rejects_foreign_header() {
        let mut config = BoardConfig::default();
        config.magic = 0xDEAD_BEEF;
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let encoded = config.to_slice(&mut buf).unwrap();

        assert_eq!(
            BoardConfig::from_bytes(encoded),
            Err(ConfigError::InvalidHeader)
        );
    }
}
