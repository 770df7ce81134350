use core::fmt;

/// Conditions under which `Quince8` refuses to continue an operation
///
/// None of them leave the machine in an inconsistent state: the host may
/// report the error and keep stepping, or stop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// Instruction word matching none of the defined opcodes, fetched at `pc`
    ///
    /// `pc` already points past the word, so stepping again skips it.
    UnknownOpcode { opcode: u16, pc: u16 },
    /// Return from a subroutine while the stack is empty
    StackUnderflow { pc: u16 },
    /// Program does not fit between the start address and the end of memory
    ProgramTooLarge { size: usize, capacity: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode {:#06X} at {:#05X}", opcode, pc)
            }
            Error::StackUnderflow { pc } => {
                write!(f, "can't return at {:#05X}, not in subroutine", pc)
            }
            Error::ProgramTooLarge { size, capacity } => write!(
                f,
                "program of {} bytes exceeds {} bytes of program memory",
                size, capacity
            ),
        }
    }
}

impl std::error::Error for Error {}
