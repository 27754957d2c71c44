/// # Fields
///
/// Every 16-bit value splits into the same set of fields, laid out as `[f x y n]`:
///
/// | field    | bits  | meaning                                          |
/// |----------|-------|--------------------------------------------------|
/// | `family` | 12-15 | picks the instruction group                      |
/// | `x`      | 8-11  | register Vx, or the last register of V0..Vx      |
/// | `y`      | 4-7   | register Vy                                      |
/// | `n`      | 0-3   | a 4-bit immediate or sub-operation selector      |
/// | `kk`     | 0-7   | an 8-bit immediate                               |
/// | `addr`   | 0-11  | a 12-bit address                                 |
///
/// The fields overlap, so which of them mean anything depends on the family.
/// Decoding never fails; `Instruction::from_op` decides whether the fields name a
/// real instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fields {
    pub family: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub kk: u8,
    pub addr: u16,
}

impl Fields {
    pub fn decode(op: u16) -> Self {
        let [high, low] = op.to_be_bytes();
        Fields {
            family: high >> 4,
            x: high & 0xF,
            y: low >> 4,
            n: low & 0xF,
            kk: low,
            addr: op & 0x0FFF,
        }
    }

    /// `(family, x, y, n)`, the shape the dispatch table matches on
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family, self.x, self.y, self.n)
    }
}

impl From<u16> for Fields {
    fn from(op: u16) -> Self {
        Fields::decode(op)
    }
}
