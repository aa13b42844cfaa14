pub use chip8::Chip8;
pub use config::{Config, Quirks};
pub use error::{Chip8Error, IoError, Result};
pub use host::{Headless, Host, Recorder};
pub use instruction::{step, StepResult};
pub use keypad::Keypad;
pub use loader::{load, load_from_reader, load_with, read_rom};
pub use state::{FrameBuffer, State};

mod chip8;
mod clock;
pub mod config;
pub mod constants;
mod error;
mod host;
mod instruction;
mod keypad;
mod loader;
mod opcode;
mod operations;
pub mod state;
