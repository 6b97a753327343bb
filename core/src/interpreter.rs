use log::trace;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, MEMORY_SIZE};
use crate::error::Error;
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::quirks::Quirks;

/// Executes one instruction at a time against a borrowed [`Machine`].
///
/// The interpreter itself holds nothing but the quirk configuration; all
/// state lives in the machine, so the host is free to inspect the frame
/// buffer and write the keypad between steps.
pub struct Interpreter {
    quirks: Quirks,
}

impl Interpreter {
    pub fn new(quirks: Quirks) -> Self {
        Interpreter { quirks }
    }

    /// Advance the machine by exactly one instruction.
    ///
    /// Fetches the big-endian word at the pc, advances the pc by 2, and
    /// dispatches on the opcode. Timer ticks are not part of a step; the
    /// host drives [`Machine::tick_timers`] from its own 60Hz source.
    ///
    /// # Errors
    /// `OutOfBoundsFetch` if the pc has run past memory, `StackOverflow` on
    /// a 17-deep call, `UnknownOpcode` for anything outside the instruction
    /// set. None of these can be stepped past.
    pub fn step(&self, m: &mut Machine) -> Result<(), Error> {
        let op = self.fetch(m)?;
        trace!("{:04X} v{:02X?} i{:04X} pc{:04X}", op, m.v, m.index, m.pc);
        self.execute(m, op)
    }

    /// Combine the two bytes at the pc into an opcode and advance past them.
    fn fetch(&self, m: &mut Machine) -> Result<u16, Error> {
        let pc = m.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Error::OutOfBoundsFetch { pc: m.pc });
        }
        let op = u16::from(m.memory[pc]) << 8 | u16::from(m.memory[pc + 1]);
        m.opcode = op;
        m.pc += 2;
        Ok(op)
    }

    /// Dispatch on the top nibble, then on whatever low bits the family
    /// cases on. Every defined instruction has an arm; everything else is an
    /// `UnknownOpcode`.
    fn execute(&self, m: &mut Machine, op: u16) -> Result<(), Error> {
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => self.clear(m),
            (0x0, 0x0, 0xE, 0xE) => self.ret(m),
            (0x1, ..) => self.jump(m, op),
            (0x2, ..) => self.call(m, op)?,
            (0x3, ..) => self.skip_eq_imm(m, op),
            (0x4, ..) => self.skip_ne_imm(m, op),
            (0x5, .., 0x0) => self.skip_eq_reg(m, op),
            (0x6, ..) => self.load_imm(m, op),
            (0x7, ..) => self.add_imm(m, op),
            (0x8, .., 0x0) => self.copy(m, op),
            (0x8, .., 0x1) => self.or(m, op),
            (0x8, .., 0x2) => self.and(m, op),
            (0x8, .., 0x3) => self.xor(m, op),
            (0x8, .., 0x4) => self.add(m, op),
            (0x8, .., 0x5) => self.sub(m, op),
            (0x8, .., 0x6) => self.shift_right(m, op),
            (0x8, .., 0x7) => self.sub_reversed(m, op),
            (0x8, .., 0xE) => self.shift_left(m, op),
            (0x9, .., 0x0) => self.skip_ne_reg(m, op),
            (0xA, ..) => self.load_index(m, op),
            (0xB, ..) => self.jump_offset(m, op),
            (0xC, ..) => self.random(m, op),
            (0xD, ..) => self.draw(m, op),
            (0xE, .., 0x9, 0xE) => self.skip_key_pressed(m, op),
            (0xE, .., 0xA, 0x1) => self.skip_key_released(m, op),
            (0xF, .., 0x0, 0x7) => self.read_delay(m, op),
            (0xF, .., 0x0, 0xA) => self.wait_key(m, op),
            (0xF, .., 0x1, 0x5) => self.set_delay(m, op),
            (0xF, .., 0x1, 0x8) => self.set_sound(m, op),
            (0xF, .., 0x1, 0xE) => self.add_index(m, op),
            (0xF, .., 0x2, 0x9) => self.load_glyph(m, op),
            (0xF, .., 0x3, 0x3) => self.store_bcd(m, op),
            (0xF, .., 0x5, 0x5) => self.store_registers(m, op),
            (0xF, .., 0x6, 0x5) => self.load_registers(m, op),
            _ => return Err(Error::UnknownOpcode(op)),
        }
        Ok(())
    }

    /// 00E0: turn every pixel off
    fn clear(&self, m: &mut Machine) {
        m.display.fill(false);
        m.draw_flag = true;
    }

    /// 00EE: pc = stack.pop(); no-op when the stack is empty
    fn ret(&self, m: &mut Machine) {
        if m.sp == 0 {
            return;
        }
        m.sp -= 1;
        m.pc = m.stack[m.sp as usize];
    }

    /// 1NNN: pc = nnn
    fn jump(&self, m: &mut Machine, op: u16) {
        m.pc = op.nnn();
    }

    /// 2NNN: stack.push(pc); pc = nnn
    fn call(&self, m: &mut Machine, op: u16) -> Result<(), Error> {
        let sp = m.sp as usize;
        if sp == m.stack.len() {
            return Err(Error::StackOverflow);
        }
        m.stack[sp] = m.pc;
        m.sp += 1;
        m.pc = op.nnn();
        Ok(())
    }

    /// 3XNN: if vx == nn then pc += 2
    fn skip_eq_imm(&self, m: &mut Machine, op: u16) {
        if m.v[op.x() as usize] == op.nn() {
            m.pc += 2;
        }
    }

    /// 4XNN: if vx != nn then pc += 2
    fn skip_ne_imm(&self, m: &mut Machine, op: u16) {
        if m.v[op.x() as usize] != op.nn() {
            m.pc += 2;
        }
    }

    /// 5XY0: if vx == vy then pc += 2
    fn skip_eq_reg(&self, m: &mut Machine, op: u16) {
        if m.v[op.x() as usize] == m.v[op.y() as usize] {
            m.pc += 2;
        }
    }

    /// 6XNN: vx = nn
    fn load_imm(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] = op.nn();
    }

    /// 7XNN: vx += nn, wrapping; no flag
    fn add_imm(&self, m: &mut Machine, op: u16) {
        let x = op.x() as usize;
        m.v[x] = m.v[x].wrapping_add(op.nn());
    }

    /// 8XY0: vx = vy
    fn copy(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] = m.v[op.y() as usize];
    }

    /// 8XY1: vx |= vy
    fn or(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] |= m.v[op.y() as usize];
    }

    /// 8XY2: vx &= vy
    fn and(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] &= m.v[op.y() as usize];
    }

    /// 8XY3: vx ^= vy
    fn xor(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] ^= m.v[op.y() as usize];
    }

    /// 8XY4: vx += vy; vf = carry
    ///
    /// The flag is written after the result, so when x is F the flag wins.
    fn add(&self, m: &mut Machine, op: u16) {
        let (res, carry) = m.v[op.x() as usize].overflowing_add(m.v[op.y() as usize]);
        m.v[op.x() as usize] = res;
        m.v[0xF] = carry as u8;
    }

    /// 8XY5: vx -= vy; vf = 0 on borrow, else 1
    fn sub(&self, m: &mut Machine, op: u16) {
        let (res, borrow) = m.v[op.x() as usize].overflowing_sub(m.v[op.y() as usize]);
        m.v[op.x() as usize] = res;
        m.v[0xF] = !borrow as u8;
    }

    /// 8XY6: vx >>= 1; vf = the bit shifted out
    ///
    /// With the shift quirk, vy is shifted and the result lands in vx.
    fn shift_right(&self, m: &mut Machine, op: u16) {
        let source = if self.quirks.shift {
            m.v[op.y() as usize]
        } else {
            m.v[op.x() as usize]
        };
        m.v[op.x() as usize] = source >> 1;
        m.v[0xF] = source & 0x1;
    }

    /// 8XY7: vx = vy - vx; vf = 0 on borrow, else 1
    fn sub_reversed(&self, m: &mut Machine, op: u16) {
        let (res, borrow) = m.v[op.y() as usize].overflowing_sub(m.v[op.x() as usize]);
        m.v[op.x() as usize] = res;
        m.v[0xF] = !borrow as u8;
    }

    /// 8XYE: vx <<= 1; vf = the bit shifted out
    fn shift_left(&self, m: &mut Machine, op: u16) {
        let source = if self.quirks.shift {
            m.v[op.y() as usize]
        } else {
            m.v[op.x() as usize]
        };
        m.v[op.x() as usize] = source << 1;
        m.v[0xF] = source >> 7;
    }

    /// 9XY0: if vx != vy then pc += 2
    fn skip_ne_reg(&self, m: &mut Machine, op: u16) {
        if m.v[op.x() as usize] != m.v[op.y() as usize] {
            m.pc += 2;
        }
    }

    /// ANNN: index = nnn
    fn load_index(&self, m: &mut Machine, op: u16) {
        m.index = op.nnn();
    }

    /// BNNN: pc = nnn + v0
    ///
    /// With the jump quirk, pc = nnn + vx where x is the top nibble of nnn.
    fn jump_offset(&self, m: &mut Machine, op: u16) {
        let offset = if self.quirks.jump {
            m.v[op.x() as usize]
        } else {
            m.v[0x0]
        };
        m.pc = op.nnn() + u16::from(offset);
    }

    /// CXNN: vx = random byte & nn
    fn random(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] = rand::random::<u8>() & op.nn();
    }

    /// DXYN: XOR an n-row sprite from memory[index..] onto the display at
    /// (vx % 64, vy % 32); vf = 1 if any lit pixel was turned off.
    ///
    /// The starting position wraps but the sprite itself clips: rows below
    /// the bottom edge and columns past the right edge are not drawn.
    fn draw(&self, m: &mut Machine, op: u16) {
        let origin_x = m.v[op.x() as usize] as usize % DISPLAY_WIDTH;
        let origin_y = m.v[op.y() as usize] as usize % DISPLAY_HEIGHT;

        m.v[0xF] = 0;
        for row in 0..op.n() as usize {
            let y = origin_y + row;
            if y >= DISPLAY_HEIGHT {
                break;
            }
            let sprite = m.memory[m.index as usize + row];
            for col in 0..8 {
                let x = origin_x + col;
                if x >= DISPLAY_WIDTH {
                    break;
                }
                if sprite & (0x80 >> col) == 0 {
                    continue;
                }
                let pixel = &mut m.display[x + y * DISPLAY_WIDTH];
                if *pixel {
                    m.v[0xF] = 1;
                }
                *pixel = !*pixel;
            }
        }
        m.draw_flag = true;
    }

    /// EX9E: if key vx is down then pc += 2
    fn skip_key_pressed(&self, m: &mut Machine, op: u16) {
        if m.keypad[m.v[op.x() as usize] as usize] {
            m.pc += 2;
        }
    }

    /// EXA1: if key vx is up then pc += 2
    fn skip_key_released(&self, m: &mut Machine, op: u16) {
        if !m.keypad[m.v[op.x() as usize] as usize] {
            m.pc += 2;
        }
    }

    /// FX07: vx = delay timer
    fn read_delay(&self, m: &mut Machine, op: u16) {
        m.v[op.x() as usize] = m.delay;
    }

    /// FX0A: vx = the lowest key currently down; otherwise rewind the pc so
    /// the same instruction re-executes next step.
    ///
    /// This is how "wait for key" works without ever blocking: the host
    /// keeps stepping (and ticking timers) while the instruction busy-polls.
    fn wait_key(&self, m: &mut Machine, op: u16) {
        match m.keypad.iter().position(|&down| down) {
            Some(key) => m.v[op.x() as usize] = key as u8,
            None => m.pc -= 2,
        }
    }

    /// FX15: delay timer = vx
    fn set_delay(&self, m: &mut Machine, op: u16) {
        m.delay = m.v[op.x() as usize];
    }

    /// FX18: sound timer = vx
    fn set_sound(&self, m: &mut Machine, op: u16) {
        m.sound = m.v[op.x() as usize];
    }

    /// FX1E: index += vx; vf = 1 if the index leaves addressable memory
    fn add_index(&self, m: &mut Machine, op: u16) {
        m.index = m.index.wrapping_add(u16::from(m.v[op.x() as usize]));
        m.v[0xF] = (m.index as usize >= MEMORY_SIZE) as u8;
    }

    /// FX29: index = address of the font glyph for vx (vx in 0x0..=0xF)
    fn load_glyph(&self, m: &mut Machine, op: u16) {
        m.index = u16::from(m.v[op.x() as usize]) * FONT_GLYPH_SIZE;
    }

    /// FX33: memory[index..index+3] = the decimal digits of vx, hundreds first
    fn store_bcd(&self, m: &mut Machine, op: u16) {
        let value = m.v[op.x() as usize];
        let digits = [value / 100 % 10, value / 10 % 10, value % 10];
        let i = m.index as usize;
        m.memory[i..i + 3].copy_from_slice(&digits);
    }

    /// FX55: memory[index..] = v0..=vx
    ///
    /// With the index quirk, the index advances once per register copied.
    fn store_registers(&self, m: &mut Machine, op: u16) {
        let x = op.x() as usize;
        let i = m.index as usize;
        m.memory[i..=i + x].copy_from_slice(&m.v[..=x]);
        if self.quirks.index_increment {
            m.index += x as u16 + 1;
        }
    }

    /// FX65: v0..=vx = memory[index..]
    fn load_registers(&self, m: &mut Machine, op: u16) {
        let x = op.x() as usize;
        let i = m.index as usize;
        m.v[..=x].copy_from_slice(&m.memory[i..=i + x]);
        if self.quirks.index_increment {
            m.index += x as u16 + 1;
        }
    }
}
