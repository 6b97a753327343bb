use std::io::Read;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT, KEY_COUNT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START,
    REGISTER_COUNT, STACK_SIZE,
};
use crate::error::Error;

/// The display is a flat row-major array of on/off pixels indexed as
/// `x + y * DISPLAY_WIDTH`.
pub type FrameBuffer = [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// The complete architectural state of a Chip-8 machine.
///
/// ## CPU
/// - (v) 16 8-bit registers V0..VF; VF doubles as the carry/borrow/collision
///   flag and is clobbered as a side effect of several instructions
/// - (index) a 16-bit register used for indirect memory access
/// - (pc) a 16-bit program counter, advanced 2 bytes per fetch
/// - (stack, sp) a 16-entry return-address stack; sp counts occupied slots
///
/// ## Timers
/// - (delay, sound) 8-bit counters that tick down to 0 at 60Hz, independently
///   of the instruction clock; see [`Machine::tick_timers`]
///
/// ## Memory
/// - 4096 bytes, with the font at 0x000..0x050 and programs from 0x200
/// - a 64x32 monochrome frame buffer
///
/// ## Input
/// - the pressed state of the 16 hex keys, written by the host between steps
///
/// The host driver owns the machine for its whole lifetime; the interpreter
/// only ever borrows it for the duration of a step.
pub struct Machine {
    pub v: [u8; REGISTER_COUNT],
    pub index: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay: u8,
    pub sound: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub display: FrameBuffer,
    pub keypad: [bool; KEY_COUNT],
    /// The most recently fetched instruction word; overwritten every step.
    pub opcode: u16,
    /// Set whenever an instruction changes the display; cleared by
    /// [`Machine::take_frame`].
    pub draw_flag: bool,
}

impl Machine {
    /// A zeroed machine with the font seeded at 0x000 and pc at 0x200.
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT.len()].copy_from_slice(&FONT);

        Machine {
            v: [0; REGISTER_COUNT],
            index: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay: 0,
            sound: 0,
            stack: [0; STACK_SIZE],
            memory,
            display: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            keypad: [false; KEY_COUNT],
            opcode: 0,
            draw_flag: false,
        }
    }

    /// Read a whole program and copy it into memory starting at 0x200.
    ///
    /// Registers and the pc are left alone so this can only be called on a
    /// fresh (or re-initialized) machine. Returns the program size in bytes.
    ///
    /// # Errors
    /// `Io` if the reader fails, `ProgramTooLarge` if the program doesn't fit
    /// above 0x200. Memory is untouched on either failure.
    pub fn load_program(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_bytes(&program)
    }

    /// Copy an in-memory program image to 0x200; see [`Machine::load_program`].
    pub fn load_bytes(&mut self, program: &[u8]) -> Result<usize, Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        Ok(program.len())
    }

    /// Mark a keypad key (0x0..=0xF) as held down.
    pub fn key_press(&mut self, key: u8) {
        self.keypad[key as usize] = true;
    }

    /// Mark a keypad key (0x0..=0xF) as released.
    pub fn key_release(&mut self, key: u8) {
        self.keypad[key as usize] = false;
    }

    /// One 60Hz timer tick: count both timers down, stopping at 0.
    ///
    /// The host drives this from elapsed wall-clock time rather than from the
    /// instruction loop, so the timer rate holds steady at any clock speed.
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// The frame buffer, if it changed since the last call.
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(&self.display)
        } else {
            None
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}
