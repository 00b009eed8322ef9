//! Switch MIB counter access
//!
//! The Ethernet switch of the Realtek SoCs exposes its per-port
//! management counters as a memory-mapped block of 32-bit words.

/// Read access to the counter block
///
/// Implementations perform a volatile load of the word at `address`.
/// Address arithmetic lives in `yabm-core`.
pub trait MibSource {
    /// Read the 32-bit word at the given physical address
    fn read_word(&mut self, address: u32) -> u32;
}

impl<T: MibSource + ?Sized> MibSource for &mut T {
    fn read_word(&mut self, address: u32) -> u32 {
        T::read_word(self, address)
    }
}
