use std::fmt;
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Everything that can stop a Chip-8 program.
///
/// Execution-time errors are fatal to the current run: the engine halts rather
/// than guessing at what a malformed program meant to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    /// `size` is the number of bytes read, which stops one past `max` when
    /// reading from a `Read`
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("program counter {0:#06X} is outside of fetchable memory")]
    ProgramCounterOutOfRange(u16),

    #[error("memory access out of bounds at address {0:#06X}")]
    AddressOutOfRange(u16),

    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("stack overflow: subroutine calls nested deeper than the stack allows")]
    StackOverflow,

    #[error("stack underflow: attempted to return with an empty call stack")]
    StackUnderflow,

    #[error("invalid key code {0:#04X}, keys range from 0x0 to 0xF")]
    InvalidKeyCode(u8),

    #[error("unable to read ROM")]
    Io(#[source] IoError),
}

impl From<io::Error> for Chip8Error {
    fn from(e: io::Error) -> Self {
        Chip8Error::Io(IoError(Arc::new(e)))
    }
}

/// A shared `io::Error`, so that `Chip8Error` stays cheap to clone and compare
#[derive(Debug, Clone)]
pub struct IoError(Arc<io::Error>);

impl IoError {
    pub fn kind(&self) -> io::ErrorKind {
        self.0.kind()
    }
}

impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.kind() == other.kind() && self.0.to_string() == other.0.to_string())
    }
}

impl Eq for IoError {}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
