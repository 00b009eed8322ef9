//! Per-transaction state machine
//!
//! Every sequencer operation walks
//! `Idle → AddressSent → [RegisterSent] → DataPhase → Done`, one
//! acknowledged byte at a time. A missing acknowledgement moves straight to
//! `Failed`, which is terminal.

/// Highest 7-bit device address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Transfer direction, carried in bit 0 of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Write = 0,
    Read = 1,
}

/// How the final byte of a burst write ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Termination {
    /// Release the bus with a stop condition
    #[default]
    Stop,
    /// Keep the bus so a repeated start can follow
    RepeatedStart,
}

/// Build the address byte for a 7-bit device address
pub const fn address_byte(address: u8, direction: Direction) -> u8 {
    (address << 1) | direction as u8
}

/// Transaction step that needs the device to acknowledge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Initial address byte (either direction)
    Address,
    /// Register index after a write address
    Register,
    /// Read-direction address after the register was set
    ReadAddress,
    /// Value byte of a single-register write
    Value,
    /// Payload byte of a burst write, by index
    Payload(usize),
}

/// Why a transaction did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionError {
    /// The device did not acknowledge the given step
    Nack(Phase),
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
    /// Burst write with nothing to send
    EmptyPayload,
    /// Requested read length exceeds the destination buffer
    BufferTooSmall,
}

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Byte for this phase was acknowledged
    Ack(Phase),
    /// Byte for this phase was not acknowledged
    Nack(Phase),
    /// A data byte was clocked in
    Read,
    /// Last byte of the transaction went out
    Finish,
}

/// Transaction states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionState {
    /// Nothing sent yet
    #[default]
    Idle,
    /// Device answered its address
    AddressSent,
    /// Register index accepted
    RegisterSent,
    /// Moving data bytes
    DataPhase,
    /// Every required acknowledgement arrived
    Done,
    /// Aborted at the given phase
    Failed(Phase),
}

impl TransactionState {
    /// Check if the transaction has ended, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Done | TransactionState::Failed(_))
    }

    /// Check if a byte was refused
    pub fn is_failed(&self) -> bool {
        matches!(self, TransactionState::Failed(_))
    }

    /// Process a step and return the next state
    pub fn transition(self, step: Step) -> Self {
        use Phase::*;
        use Step::*;
        use TransactionState::*;

        match (self, step) {
            // Terminal states absorb everything
            (Done, _) | (Failed(_), _) => self,

            // Any missing acknowledgement aborts
            (_, Nack(phase)) => Failed(phase),

            (Idle, Ack(Address)) => AddressSent,

            // Single-register read and write
            (AddressSent, Ack(Register)) => RegisterSent,
            (RegisterSent, Ack(ReadAddress)) => DataPhase,
            (RegisterSent, Ack(Value)) => DataPhase,

            // Burst transfers
            (AddressSent, Ack(Payload(_))) => DataPhase,
            (DataPhase, Ack(Payload(_))) => DataPhase,
            (AddressSent, Read) | (DataPhase, Read) => DataPhase,

            // Probe finishes right after the address
            (AddressSent, Finish) | (DataPhase, Finish) => Done,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_byte() {
        assert_eq!(address_byte(0x50, Direction::Write), 0xA0);
        assert_eq!(address_byte(0x50, Direction::Read), 0xA1);
        assert_eq!(address_byte(MAX_ADDRESS, Direction::Read), 0xFF);
    }

    #[test]
    fn test_register_read_path() {
        let state = TransactionState::Idle
            .transition(Step::Ack(Phase::Address))
            .transition(Step::Ack(Phase::Register));
        assert_eq!(state, TransactionState::RegisterSent);

        let state = state
            .transition(Step::Ack(Phase::ReadAddress))
            .transition(Step::Read)
            .transition(Step::Finish);
        assert_eq!(state, TransactionState::Done);
    }

    #[test]
    fn test_nack_fails_from_any_live_state() {
        let states = [
            TransactionState::Idle,
            TransactionState::AddressSent,
            TransactionState::RegisterSent,
            TransactionState::DataPhase,
        ];

        for state in states {
            let next = state.transition(Step::Nack(Phase::Register));
            assert_eq!(next, TransactionState::Failed(Phase::Register));
            assert!(next.is_terminal());
            assert!(next.is_failed());
        }
    }

    #[test]
    fn test_failed_is_terminal() {
        let failed = TransactionState::Failed(Phase::Address);
        assert_eq!(failed.transition(Step::Ack(Phase::Register)), failed);
        assert_eq!(failed.transition(Step::Finish), failed);
        assert_eq!(failed.transition(Step::Nack(Phase::Value)), failed);
    }

    #[test]
    fn test_done_only_after_acks() {
        // Finishing without an acknowledged address goes nowhere
        assert_eq!(
            TransactionState::Idle.transition(Step::Finish),
            TransactionState::Idle
        );

        let state = TransactionState::Idle
            .transition(Step::Ack(Phase::Address))
            .transition(Step::Ack(Phase::Payload(0)))
            .transition(Step::Ack(Phase::Payload(1)))
            .transition(Step::Finish);
        assert_eq!(state, TransactionState::Done);
        assert!(!state.is_failed());
    }
}
