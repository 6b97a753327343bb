/// # Opcodes
///
/// A Chip-8 opcode is a single big-endian 16-bit word. The top nibble selects
/// one of 16 instruction families; within a family the bottom nibble or byte
/// may select further. The remaining bits carry operands:
/// - `[_nnn]` a 12-bit address
/// - `[_x__]` the register Vx (or the upper bound of a register range V0..Vx)
/// - `[__y_]` the register Vy
/// - `[__nn]` an 8-bit immediate
/// - `[___n]` a 4-bit immediate (sprite height)
pub trait Opcode {
    /// The opcode's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The opcode's least significant byte.
    /// `[__nn]`
    fn nn(&self) -> u8;

    /// The opcode's low 12 bits.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        let op: u16 = 0xABCD;
        assert_eq!(op.x(), 0xB);
    }

    #[test]
    fn test_y() {
        let op: u16 = 0xABCD;
        assert_eq!(op.y(), 0xC);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xABCD;
        assert_eq!(op.n(), 0xD);
    }

    #[test]
    fn test_nn() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nn(), 0xCD);
    }

    #[test]
    fn test_nnn() {
        let op: u16 = 0xABCD;
        assert_eq!(op.nnn(), 0x0BCD);
    }
}
