use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, Quirks};
use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_ADDRESS, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_SIZE,
};
use crate::error::{Chip8Error, Result};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), counting down at 60Hz
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
/// - 32x64 frame buffer
///     - `draw_flag` is raised whenever it changes and lowered once rendered
///
/// ## Input
/// - `key_wait` holds the keypad poll taken when `Fx0A` started waiting
#[derive(Clone, Debug)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub key_wait: Option<u64>,
    pub quirks: Quirks,
    rng: StdRng,
}

impl State {
    pub fn new() -> Self {
        State::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // 0x000 - 0x050 is reserved for a sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_ADDRESS as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            key_wait: None,
            quirks: config.quirks,
            rng,
        }
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8> {
        self.memory
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange(addr))
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        let byte = self
            .memory
            .get_mut(addr as usize)
            .ok_or(Chip8Error::AddressOutOfRange(addr))?;
        *byte = value;
        Ok(())
    }

    /// Reads the big-endian word at `addr` and `addr + 1`.
    pub fn read_word(&self, addr: u16) -> Result<u16> {
        let bytes = self.read_bytes(addr, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    /// Borrows `len` bytes of memory starting at `addr`.
    pub fn read_bytes(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::checked_range(addr, len)?;
        Ok(&self.memory[range])
    }

    /// Copies `data` into memory starting at `addr`, all or nothing.
    pub fn write_bytes(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let range = Self::checked_range(addr, data.len())?;
        self.memory[range].copy_from_slice(data);
        Ok(())
    }

    /// Fails with the first address past the end of memory
    fn checked_range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            let first_bad = start.max(MEMORY_SIZE).min(u16::MAX as usize) as u16;
            return Err(Chip8Error::AddressOutOfRange(first_bad));
        }
        Ok(start..end)
    }

    /// Vx; only the low nibble of `x` selects the register
    pub fn v(&self, x: u8) -> u8 {
        self.v[(x & 0xF) as usize]
    }

    pub fn set_v(&mut self, x: u8, value: u8) {
        self.v[(x & 0xF) as usize] = value;
    }

    /// VF = 1 if `set` else 0
    pub fn set_flag(&mut self, set: bool) {
        self.v[0xF] = u8::from(set);
    }

    /// Pushes a return address for a subroutine call.
    pub fn push(&mut self, addr: u16) -> Result<()> {
        let sp = self.sp as usize;
        if sp >= STACK_SIZE {
            return Err(Chip8Error::StackOverflow);
        }
        self.stack[sp] = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Counts both timers down by one, stopping at 0
    pub fn decrement_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    pub fn clear_frame_buffer(&mut self) {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
