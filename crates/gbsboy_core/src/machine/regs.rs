/// LR35902 registers the player reads or writes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        // Lower 4 bits of F always read as zero.
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }
}
