//! Switch MIB counters
//!
//! The Realtek switch keeps RFC 2863 / RFC 2819 style counters per port in
//! a memory-mapped block:
//!
//! ```text
//! address = MIB_BASE + direction + port * MIB_PORT_STRIDE + counter
//! ```
//!
//! Receive counters sit at direction offset 0x100, transmit counters at
//! 0x800. Octet counters are 64 bits wide in hardware; only their low word
//! is read.

use yabm_hal::mib::MibSource;

/// Start of the counter block
pub const MIB_BASE: u32 = 0xBB80_1000;

/// Bytes between consecutive ports within one direction
pub const MIB_PORT_STRIDE: u32 = 0x80;

/// Counter direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum MibDirection {
    In = 0x100,
    Out = 0x800,
}

impl MibDirection {
    /// Offset of this direction's block from [`MIB_BASE`]
    pub const fn offset(self) -> u32 {
        self as u32
    }

    /// Look up a direction by block offset
    pub fn from_offset(offset: u32) -> Option<Self> {
        match offset {
            0x100 => Some(MibDirection::In),
            0x800 => Some(MibDirection::Out),
            _ => None,
        }
    }
}

/// Receive-side counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum InCounter {
    IfInOctets = 0x00,
    IfInUcastPkts = 0x08,
    EtherStatsOctets = 0x0C,
    EtherStatsUndersizePkts = 0x14,
    EtherStatsFragments = 0x18,
    EtherStatsPkts64Octets = 0x1C,
    EtherStatsPkts65To127Octets = 0x20,
    EtherStatsPkts128To255Octets = 0x24,
    EtherStatsPkts256To511Octets = 0x28,
    EtherStatsPkts512To1023Octets = 0x2C,
    EtherStatsPkts1024To1518Octets = 0x30,
    EtherStatsOversizePkts = 0x34,
    EtherStatsJabbers = 0x38,
    EtherStatsMulticastPkts = 0x3C,
    EtherStatsBroadcastPkts = 0x40,
    Dot1dTpPortInDiscards = 0x44,
    EtherStatsDropEvents = 0x48,
    Dot3StatsFcsErrors = 0x4C,
    Dot3StatsSymbolErrors = 0x50,
    Dot3ControlInUnknownOpcodes = 0x54,
    Dot3InPauseFrames = 0x58,
}

impl InCounter {
    pub const ALL: [InCounter; 21] = [
        InCounter::IfInOctets,
        InCounter::IfInUcastPkts,
        InCounter::EtherStatsOctets,
        InCounter::EtherStatsUndersizePkts,
        InCounter::EtherStatsFragments,
        InCounter::EtherStatsPkts64Octets,
        InCounter::EtherStatsPkts65To127Octets,
        InCounter::EtherStatsPkts128To255Octets,
        InCounter::EtherStatsPkts256To511Octets,
        InCounter::EtherStatsPkts512To1023Octets,
        InCounter::EtherStatsPkts1024To1518Octets,
        InCounter::EtherStatsOversizePkts,
        InCounter::EtherStatsJabbers,
        InCounter::EtherStatsMulticastPkts,
        InCounter::EtherStatsBroadcastPkts,
        InCounter::Dot1dTpPortInDiscards,
        InCounter::EtherStatsDropEvents,
        InCounter::Dot3StatsFcsErrors,
        InCounter::Dot3StatsSymbolErrors,
        InCounter::Dot3ControlInUnknownOpcodes,
        InCounter::Dot3InPauseFrames,
    ];

    /// Offset of the counter within a port's block
    pub const fn offset(self) -> u32 {
        self as u32
    }

    /// Look up a counter by offset within a port's block
    pub fn from_offset(offset: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.offset() == offset)
    }
}

/// Transmit-side counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum OutCounter {
    IfOutOctets = 0x00,
    IfOutUcastPkts = 0x08,
    IfOutMulticastPkts = 0x0C,
    IfOutBroadcastPkts = 0x10,
    IfOutDiscards = 0x14,
    Dot3StatsSingleCollisionFrames = 0x18,
    Dot3StatsMultipleCollisionFrames = 0x1C,
    Dot3StatsDeferredTransmissions = 0x20,
    Dot3StatsLateCollisions = 0x24,
    Dot3StatsExcessiveCollisions = 0x28,
    Dot3OutPauseFrames = 0x2C,
    Dot1dBasePortDelayExceededDiscards = 0x30,
    EtherStatsCollisions = 0x34,
}

impl OutCounter {
    pub const ALL: [OutCounter; 13] = [
        OutCounter::IfOutOctets,
        OutCounter::IfOutUcastPkts,
        OutCounter::IfOutMulticastPkts,
        OutCounter::IfOutBroadcastPkts,
        OutCounter::IfOutDiscards,
        OutCounter::Dot3StatsSingleCollisionFrames,
        OutCounter::Dot3StatsMultipleCollisionFrames,
        OutCounter::Dot3StatsDeferredTransmissions,
        OutCounter::Dot3StatsLateCollisions,
        OutCounter::Dot3StatsExcessiveCollisions,
        OutCounter::Dot3OutPauseFrames,
        OutCounter::Dot1dBasePortDelayExceededDiscards,
        OutCounter::EtherStatsCollisions,
    ];

    /// Offset of the counter within a port's block
    pub const fn offset(self) -> u32 {
        self as u32
    }

    /// Look up a counter by offset within a port's block
    pub fn from_offset(offset: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.offset() == offset)
    }
}

/// Any counter, tagged with its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MibCounter {
    In(InCounter),
    Out(OutCounter),
}

impl MibCounter {
    /// Look up a counter from integer direction and counter offsets
    pub fn from_raw(direction: u32, offset: u32) -> Option<Self> {
        match MibDirection::from_offset(direction)? {
            MibDirection::In => InCounter::from_offset(offset).map(MibCounter::In),
            MibDirection::Out => OutCounter::from_offset(offset).map(MibCounter::Out),
        }
    }

    /// Block the counter lives in
    pub fn direction(self) -> MibDirection {
        match self {
            MibCounter::In(_) => MibDirection::In,
            MibCounter::Out(_) => MibDirection::Out,
        }
    }

    /// Offset of the counter within a port's block
    pub fn offset(self) -> u32 {
        match self {
            MibCounter::In(c) => c.offset(),
            MibCounter::Out(c) => c.offset(),
        }
    }

    /// Counter is 64 bits wide in hardware
    pub fn is_wide(self) -> bool {
        matches!(
            self,
            MibCounter::In(InCounter::IfInOctets)
                | MibCounter::In(InCounter::EtherStatsOctets)
                | MibCounter::Out(OutCounter::IfOutOctets)
        )
    }
}

impl From<InCounter> for MibCounter {
    fn from(counter: InCounter) -> Self {
        MibCounter::In(counter)
    }
}

impl From<OutCounter> for MibCounter {
    fn from(counter: OutCounter) -> Self {
        MibCounter::Out(counter)
    }
}

/// Physical address of a counter word
pub fn counter_address(port: u8, counter: MibCounter) -> u32 {
    MIB_BASE + counter.direction().offset() + u32::from(port) * MIB_PORT_STRIDE + counter.offset()
}

/// Counter reader over the memory-mapped block
pub struct MibReader<S> {
    source: S,
}

impl<S: MibSource> MibReader<S> {
    /// Create a reader over the counter block
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Give back the counter block
    pub fn release(self) -> S {
        self.source
    }

    /// Read a counter for one port
    ///
    /// Wide counters return their low 32 bits.
    pub fn read(&mut self, port: u8, counter: impl Into<MibCounter>) -> u32 {
        let address = counter_address(port, counter.into());
        self.source.read_word(address)
    }

    /// Read a counter named by integer offsets
    ///
    /// Returns `None` without touching the block if the pair does not name
    /// a known counter.
    pub fn read_raw(&mut self, port: u8, direction: u32, offset: u32) -> Option<u32> {
        let counter = MibCounter::from_raw(direction, offset)?;
        Some(self.read(port, counter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Mock counter block echoing the address it was asked for
    #[derive(Default)]
    struct MockMib {
        reads: Vec<u32>,
    }

    impl MibSource for MockMib {
        fn read_word(&mut self, address: u32) -> u32 {
            self.reads.push(address);
            address ^ 0xFFFF_FFFF
        }
    }

    #[test]
    fn test_counter_address() {
        assert_eq!(
            counter_address(0, InCounter::IfInOctets.into()),
            0xBB80_1100
        );
        assert_eq!(
            counter_address(2, InCounter::Dot3StatsFcsErrors.into()),
            0xBB80_1000 + 0x100 + 2 * 0x80 + 0x4C
        );
        assert_eq!(
            counter_address(4, OutCounter::EtherStatsCollisions.into()),
            0xBB80_1000 + 0x800 + 4 * 0x80 + 0x34
        );
    }

    #[test]
    fn test_offsets_are_unique_and_aligned() {
        for (i, a) in InCounter::ALL.iter().enumerate() {
            assert_eq!(a.offset() % 4, 0);
            assert!(a.offset() < MIB_PORT_STRIDE);
            for b in &InCounter::ALL[i + 1..] {
                assert_ne!(a.offset(), b.offset());
            }
        }
        for (i, a) in OutCounter::ALL.iter().enumerate() {
            assert_eq!(a.offset() % 4, 0);
            for b in &OutCounter::ALL[i + 1..] {
                assert_ne!(a.offset(), b.offset());
            }
        }
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(
            MibCounter::from_raw(0x100, 0x08),
            Some(MibCounter::In(InCounter::IfInUcastPkts))
        );
        assert_eq!(
            MibCounter::from_raw(0x800, 0x08),
            Some(MibCounter::Out(OutCounter::IfOutUcastPkts))
        );
        // Inside a wide counter, not a counter of its own
        assert_eq!(MibCounter::from_raw(0x100, 0x04), None);
        // Out side ends at 0x34
        assert_eq!(MibCounter::from_raw(0x800, 0x58), None);
        assert_eq!(MibCounter::from_raw(0x200, 0x00), None);
    }

    #[test]
    fn test_wide_counters() {
        assert!(MibCounter::from(InCounter::IfInOctets).is_wide());
        assert!(MibCounter::from(OutCounter::IfOutOctets).is_wide());
        assert!(!MibCounter::from(InCounter::IfInUcastPkts).is_wide());
    }

    #[test]
    fn test_reader() {
        let mut mib = MibReader::new(MockMib::default());

        let value = mib.read(1, InCounter::EtherStatsBroadcastPkts);
        let expected = 0xBB80_1000 + 0x100 + 0x80 + 0x40;
        assert_eq!(value, expected ^ 0xFFFF_FFFF);

        assert_eq!(mib.read_raw(0, 0x800, 0x14), Some(0xBB80_1814 ^ 0xFFFF_FFFF));
        assert_eq!(mib.read_raw(0, 0x800, 0x15), None);

        let source = mib.release();
        assert_eq!(source.reads, [expected, 0xBB80_1814]);
    }
}
