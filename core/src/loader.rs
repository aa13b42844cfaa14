use std::io::Read;

use log::debug;

use crate::config::Config;
use crate::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Chip8Error, Result};
use crate::state::State;

/// Load a rom into a fresh State with the default configuration
///
/// # Arguments
/// * `program` the raw bytes of a ROM
pub fn load(program: &[u8]) -> Result<State> {
    load_with(program, &Config::default())
}

/// Load a rom into a fresh State
/// - the sprite sheet occupies 0x000..0x050
/// - the program is copied to 0x200 onwards
///
/// Fails without producing a State if the program doesn't fit.
pub fn load_with(program: &[u8], config: &Config) -> Result<State> {
    if program.len() > MAX_PROGRAM_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size: program.len(),
            max: MAX_PROGRAM_SIZE,
        });
    }
    let mut state = State::with_config(config);
    state.write_bytes(PROGRAM_START, program)?;
    debug!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
    Ok(state)
}

/// Read a rom from some source, e.g. a file
///
/// # Arguments
/// * `reader` a reader that contains a ROM
///
/// Reads at most one byte more than fits, so an oversized source is rejected
/// without being read in full.
pub fn read_rom(reader: &mut dyn Read) -> Result<Vec<u8>> {
    let mut program = Vec::new();
    reader
        .take(MAX_PROGRAM_SIZE as u64 + 1)
        .read_to_end(&mut program)?;
    if program.len() > MAX_PROGRAM_SIZE {
        return Err(Chip8Error::RomTooLarge {
            size: program.len(),
            max: MAX_PROGRAM_SIZE,
        });
    }
    Ok(program)
}

/// Read a rom from some source and load it into a fresh State
pub fn load_from_reader(reader: &mut dyn Read, config: &Config) -> Result<State> {
    let program = read_rom(reader)?;
    load_with(&program, config)
}
