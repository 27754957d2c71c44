use crate::opcode::Fields;

/// A decoded Chip-8 instruction.
///
/// `x` and `y` are register indices, `kk` an immediate byte, `n` an immediate nibble
/// and `addr` a 12-bit address. Opcodes that don't name an instruction decode to
/// `Unsupported` so the engine can fault with the offending value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 00FD
    Halt,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipEqual { x: u8, kk: u8 },
    /// 4xkk
    SkipNotEqual { x: u8, kk: u8 },
    /// 5xy0
    SkipRegistersEqual { x: u8, y: u8 },
    /// 6xkk
    Load { x: u8, kk: u8 },
    /// 7xkk
    Add { x: u8, kk: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddRegisters { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    ShiftRight { x: u8, y: u8 },
    /// 8xy7
    SubReverse { x: u8, y: u8 },
    /// 8xyE
    ShiftLeft { x: u8, y: u8 },
    /// 9xy0
    SkipRegistersNotEqual { x: u8, y: u8 },
    /// Annn
    LoadIndex { addr: u16 },
    /// Bnnn (x is only read under the `jump_with_vx` quirk)
    JumpOffset { x: u8, addr: u16 },
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    SkipPressed { x: u8 },
    /// ExA1
    SkipNotPressed { x: u8 },
    /// Fx07
    LoadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    LoadSprite { x: u8 },
    /// Fx33
    Bcd { x: u8 },
    /// Fx55
    Store { x: u8 },
    /// Fx65
    Read { x: u8 },
    /// 00Cn (extended)
    ScrollDown { n: u8 },
    /// 00FB (extended)
    ScrollRight,
    /// 00FC (extended)
    ScrollLeft,
    /// 00FE (extended)
    LowRes,
    /// 00FF (extended)
    HighRes,
    /// Fx30 (extended)
    LoadLargeSprite { x: u8 },
    /// Fx75 (extended)
    SaveFlags { x: u8 },
    /// Fx85 (extended)
    LoadFlags { x: u8 },
    Unsupported(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn from_op(op: u16) -> Instruction {
        let fields = Fields::decode(op);
        let Fields { x, y, n, kk, addr, .. } = fields;
        match fields.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x0, 0x0, 0xC, _) => Instruction::ScrollDown { n },
            (0x0, 0x0, 0xF, 0xB) => Instruction::ScrollRight,
            (0x0, 0x0, 0xF, 0xC) => Instruction::ScrollLeft,
            (0x0, 0x0, 0xF, 0xD) => Instruction::Halt,
            (0x0, 0x0, 0xF, 0xE) => Instruction::LowRes,
            (0x0, 0x0, 0xF, 0xF) => Instruction::HighRes,
            (0x1, ..) => Instruction::Jump { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::SkipEqual { x, kk },
            (0x4, ..) => Instruction::SkipNotEqual { x, kk },
            (0x5, .., 0x0) => Instruction::SkipRegistersEqual { x, y },
            (0x6, ..) => Instruction::Load { x, kk },
            (0x7, ..) => Instruction::Add { x, kk },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddRegisters { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x, y },
            (0x8, .., 0x7) => Instruction::SubReverse { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x, y },
            (0x9, .., 0x0) => Instruction::SkipRegistersNotEqual { x, y },
            (0xA, ..) => Instruction::LoadIndex { addr },
            (0xB, ..) => Instruction::JumpOffset { x, addr },
            (0xC, ..) => Instruction::Random { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Instruction::SkipPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipNotPressed { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadSprite { x },
            (0xF, _, 0x3, 0x0) => Instruction::LoadLargeSprite { x },
            (0xF, _, 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::Store { x },
            (0xF, _, 0x6, 0x5) => Instruction::Read { x },
            (0xF, _, 0x7, 0x5) => Instruction::SaveFlags { x },
            (0xF, _, 0x8, 0x5) => Instruction::LoadFlags { x },
            _ => Instruction::Unsupported(op),
        }
    }

    /// Whether this instruction only exists in the extended (superset) instruction set
    pub fn is_extended(&self) -> bool {
        matches!(
            self,
            Instruction::ScrollDown { .. }
                | Instruction::ScrollRight
                | Instruction::ScrollLeft
                | Instruction::LowRes
                | Instruction::HighRes
                | Instruction::LoadLargeSprite { .. }
                | Instruction::SaveFlags { .. }
                | Instruction::LoadFlags { .. }
        )
    }
}
