//! I/O register offsets (relative to `0xFF00`) and interrupt bits.

use bitflags::bitflags;

/// TIMA: timer counter.
pub const TIMA: u8 = 0x05;
/// TMA: timer modulo, reloaded into TIMA on overflow.
pub const TMA: u8 = 0x06;
/// TAC: timer control (bit 2 enable, bits 1-0 input clock select).
pub const TAC: u8 = 0x07;
/// IE: interrupt enable, the last byte of the address space.
pub const IE: u8 = 0xFF;

bitflags! {
    /// Interrupt sources as laid out in IE.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct Interrupts: u8 {
        const VBLANK = 0x01;
        const STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}
