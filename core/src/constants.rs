/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;
/// Highest valid memory address
pub const MAX_ADDRESS: u16 = 0xFFF;
/// Highest address an opcode can be fetched from (it spans two bytes)
pub const MAX_PC: u16 = 0xFFE;
/// Where the sprite sheet is loaded
pub const FONT_ADDRESS: u16 = 0x000;
/// Where ROMs are loaded and where execution starts
pub const PROGRAM_START: u16 = 0x200;
/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Maximum depth of nested subroutine calls
pub const STACK_SIZE: usize = 16;
/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;
/// Bytes in a single sprite sheet glyph
pub const GLYPH_SIZE: u16 = 5;

/// Default number of instructions executed per second
pub const CPU_HZ: u32 = 600;
/// Rate at which the delay and sound timers count down
pub const TIMER_HZ: u32 = 60;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, five rows of one byte each.
/// Only the four most significant bits of each row are drawn.
///
/// ```text
/// "0"      Binary   Hex
/// ****     11110000 0xF0
/// *  *     10010000 0x90
/// *  *     10010000 0x90
/// *  *     10010000 0x90
/// ****     11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
