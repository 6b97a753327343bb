/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Address at which loaded programs begin.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between PROGRAM_START and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Display dimensions measured in Chip-8 pixels.
pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// Maximum call depth of the return-address stack.
pub const STACK_SIZE: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Rate at which the delay and sound timers count down, in Hz.
pub const TIMER_RATE: u32 = 60;

/// Bytes per built-in font glyph.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// The built-in font: 16 glyphs of 5 bytes each covering the hex digits 0..F.
///
/// Loaded at address 0x000 when a machine is constructed. FX29 computes glyph
/// addresses as multiples of FONT_GLYPH_SIZE, so both the layout and the
/// contents must match what ROMs expect.
pub const FONT: [u8; 80] = [
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
