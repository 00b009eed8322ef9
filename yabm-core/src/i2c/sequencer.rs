//! I2C transaction sequencer
//!
//! Builds scan, probe, register and burst transfers out of the byte
//! primitives of an [`I2cBus`]. The sequencer owns the bus handle, so only
//! one transaction can be in flight at a time.
//!
//! # Usage
//!
//! ```ignore
//! let mut i2c = I2cSequencer::new(bus, delay);
//! i2c.init(config.i2c_pins());
//! if i2c.scan().any_found() {
//!     i2c.write_register(0x50, 0x10, 0x42)?;
//!     let value = i2c.read_register(0x50, 0x10)?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use yabm_hal::i2c::{I2cBus, I2cPins};

use super::transaction::{
    address_byte, Direction, Phase, Step, Termination, TransactionError, TransactionState,
    MAX_ADDRESS,
};
use crate::config::I2cTimings;

/// Number of 7-bit addresses probed by a scan
pub const SCAN_ADDRESS_COUNT: usize = MAX_ADDRESS as usize + 1;

/// Addresses that acknowledged during a scan, in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanReport {
    found: Vec<u8, SCAN_ADDRESS_COUNT>,
}

impl ScanReport {
    /// At least one device answered
    pub fn any_found(&self) -> bool {
        !self.found.is_empty()
    }

    /// Check if `address` answered
    pub fn contains(&self, address: u8) -> bool {
        self.found.contains(&address)
    }

    /// Answering addresses, ascending
    pub fn addresses(&self) -> &[u8] {
        &self.found
    }
}

/// Sequencer over one owned bus and delay provider
pub struct I2cSequencer<B, D> {
    bus: B,
    delay: D,
    timings: I2cTimings,
    state: TransactionState,
}

impl<B: I2cBus, D: DelayNs> I2cSequencer<B, D> {
    /// Create a sequencer with default timings
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_timings(bus, delay, I2cTimings::default())
    }

    /// Create a sequencer with explicit timings
    pub fn with_timings(bus: B, delay: D, timings: I2cTimings) -> Self {
        Self {
            bus,
            delay,
            timings,
            state: TransactionState::Idle,
        }
    }

    /// Give back the bus and delay provider
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// State the most recent transaction ended in
    ///
    /// A call rejected before reaching the bus leaves this at
    /// [`TransactionState::Idle`].
    pub fn last_state(&self) -> TransactionState {
        self.state
    }

    /// Configure the bus pins
    pub fn init(&mut self, pins: I2cPins) {
        self.bus.init(pins);
    }

    /// Probe every 7-bit address
    ///
    /// Each address gets a write-direction address byte framed by start
    /// and stop. The probe delay follows every attempt, acknowledged or not.
    pub fn scan(&mut self) -> ScanReport {
        let mut report = ScanReport::default();

        for address in 0..=MAX_ADDRESS {
            if self.probe_unchecked(address) {
                #[cfg(feature = "defmt")]
                defmt::info!("I2C device found at {=u8:#x}", address);
                // One slot per address, cannot overflow
                let _ = report.found.push(address);
            }
            self.delay.delay_ms(self.timings.probe_delay_ms);
        }

        report
    }

    /// Check whether a single device acknowledges its address
    pub fn probe(&mut self, address: u8) -> Result<bool, TransactionError> {
        self.state = TransactionState::Idle;
        check_address(address)?;
        Ok(self.probe_unchecked(address))
    }

    /// Read one register
    ///
    /// Sets the register pointer with a stopped write, waits the read-back
    /// delay, then reads one byte with a fresh start.
    pub fn read_register(&mut self, address: u8, register: u8) -> Result<u8, TransactionError> {
        self.state = TransactionState::Idle;
        check_address(address)?;

        self.send(address_byte(address, Direction::Write), true, false, Phase::Address)?;
        self.send(register, false, true, Phase::Register)?;
        self.delay.delay_ms(self.timings.readback_delay_ms);
        self.send(address_byte(address, Direction::Read), true, false, Phase::ReadAddress)?;

        let value = self.receive(true);
        self.finish();
        Ok(value)
    }

    /// Read one register, reporting any failure as 0
    ///
    /// This is the script-facing form: a failed transaction and a register
    /// that holds 0 are indistinguishable. Use [`Self::read_register`] when
    /// the difference matters.
    pub fn read_register_or_zero(&mut self, address: u8, register: u8) -> u8 {
        self.read_register(address, register).unwrap_or(0)
    }

    /// Write one register
    pub fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), TransactionError> {
        self.state = TransactionState::Idle;
        check_address(address)?;

        self.send(address_byte(address, Direction::Write), true, false, Phase::Address)?;
        self.send(register, false, false, Phase::Register)?;
        self.send(value, false, true, Phase::Value)?;

        self.finish();
        Ok(())
    }

    /// Write a run of bytes in one bus acquisition
    ///
    /// The first payload byte the device refuses ends the transfer; nothing
    /// after it is sent. With [`Termination::RepeatedStart`] the last byte
    /// goes out without a stop condition.
    pub fn burst_write(
        &mut self,
        address: u8,
        bytes: &[u8],
        termination: Termination,
    ) -> Result<(), TransactionError> {
        self.state = TransactionState::Idle;
        check_address(address)?;
        let Some((&last, body)) = bytes.split_last() else {
            return Err(TransactionError::EmptyPayload);
        };

        self.send(address_byte(address, Direction::Write), true, false, Phase::Address)?;
        for (index, &byte) in body.iter().enumerate() {
            self.send(byte, false, false, Phase::Payload(index))?;
        }
        let stop = termination == Termination::Stop;
        self.send(last, false, stop, Phase::Payload(body.len()))?;

        self.finish();
        Ok(())
    }

    /// Read `buf.len()` bytes in one bus acquisition
    ///
    /// Only the final byte carries the stop condition. An empty buffer
    /// returns immediately without touching the bus.
    pub fn burst_read_into(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), TransactionError> {
        self.state = TransactionState::Idle;
        check_address(address)?;
        if buf.is_empty() {
            return Ok(());
        }

        self.send(address_byte(address, Direction::Read), true, false, Phase::Address)?;
        let last = buf.len() - 1;
        for (index, slot) in buf.iter_mut().enumerate() {
            *slot = self.receive(index == last);
        }

        self.finish();
        Ok(())
    }

    /// Read `count` bytes into a fresh vector
    ///
    /// `Err(Nack(Phase::Address))` is the "no data" outcome, distinct from
    /// an empty vector for `count == 0`.
    pub fn burst_read<const N: usize>(
        &mut self,
        address: u8,
        count: usize,
    ) -> Result<Vec<u8, N>, TransactionError> {
        self.state = TransactionState::Idle;
        check_address(address)?;
        let mut data: Vec<u8, N> = Vec::new();
        data.resize(count, 0)
            .map_err(|_| TransactionError::BufferTooSmall)?;
        self.burst_read_into(address, &mut data)?;
        Ok(data)
    }

    fn probe_unchecked(&mut self, address: u8) -> bool {
        self.state = TransactionState::Idle;
        let acked = self
            .send(address_byte(address, Direction::Write), true, true, Phase::Address)
            .is_ok();
        if acked {
            self.finish();
        }
        acked
    }

    /// Send one byte and advance the state machine on the acknowledgement
    fn send(
        &mut self,
        byte: u8,
        start: bool,
        stop: bool,
        phase: Phase,
    ) -> Result<(), TransactionError> {
        if self.bus.write_byte(byte, start, stop) {
            self.state = self.state.transition(Step::Ack(phase));
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("I2C nack on byte {=u8:#x} during {}", byte, phase);
            self.state = self.state.transition(Step::Nack(phase));
            Err(TransactionError::Nack(phase))
        }
    }

    fn receive(&mut self, stop: bool) -> u8 {
        let byte = self.bus.read_byte(stop);
        self.state = self.state.transition(Step::Read);
        byte
    }

    fn finish(&mut self) {
        self.state = self.state.transition(Step::Finish);
    }
}

fn check_address(address: u8) -> Result<(), TransactionError> {
    if address > MAX_ADDRESS {
        return Err(TransactionError::InvalidAddress(address));
    }
    Ok(())
}
