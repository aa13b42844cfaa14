/// # Opcodes
///
/// Chip-8 opcodes are 16-bit big-endian words. Which instruction an opcode
/// names is decided by some combination of its nibbles:
/// - `[o___]` the instruction family; every opcode has one
/// - `[o__n]` a specific operation within a family (e.g. `8xy4` ADD)
/// - `[o_nn]` a specific operation within a family (e.g. `Fx33` BCD)
/// - `[onnn]` a fixed operation with no operands (e.g. `00E0` CLS)
///
/// The remaining nibbles carry operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an immediate byte
/// - `[_x__]` the register Vx, or the range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate (sprite height)
pub trait Opcode {
    /// The opcode's four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self >> 8) & 0xF) as u8
    }

    fn y(&self) -> u8 {
        ((self >> 4) & 0xF) as u8
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xD12F;
        assert_eq!(op.nibbles(), (0xD, 0x1, 0x2, 0xF));
    }

    #[test]
    fn test_operands() {
        let op: u16 = 0x8AB4;
        assert_eq!(op.x(), 0xA);
        assert_eq!(op.y(), 0xB);
        assert_eq!(op.n(), 0x4);
        assert_eq!(op.kk(), 0xB4);
        assert_eq!(op.addr(), 0xAB4);
    }
}
