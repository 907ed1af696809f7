//! Seams towards the rest of the emulator.
//!
//! The player never executes instructions itself. It only pokes bytes and
//! registers into whatever machine hosts it, then lets the host's CPU core run
//! until the next frame tick. These traits describe exactly what the player
//! needs from that machine.

use crate::display::SongStatus;
use crate::input::Buttons;

/// Address of the first I/O register. `write_io(reg, ..)` targets
/// `IO_BASE | reg`.
pub const IO_BASE: u16 = 0xFF00;

/// Memory and I/O side of the emulated machine.
pub trait Bus {
    /// CPU-visible read.
    fn read8(&mut self, addr: u16) -> u8;

    /// CPU-visible write. Writes into the ROM area may be swallowed by the
    /// mapper, just like on hardware.
    fn write8(&mut self, addr: u16, value: u8);

    /// Patch a byte of ROM bank 0 directly, bypassing any mapper.
    ///
    /// The synthesised trampolines live in ROM, which the CPU itself cannot
    /// write. Hosts with a flat address space can keep the default.
    fn write_rom(&mut self, addr: u16, value: u8) {
        self.write8(addr, value);
    }

    /// Write an I/O register by its offset from `0xFF00`.
    fn write_io(&mut self, reg: u8, value: u8) {
        self.write8(IO_BASE | reg as u16, value);
    }

    /// Switch the CPU between normal and CGB double-speed mode.
    ///
    /// DMG-only hosts ignore the request.
    fn set_double_speed(&mut self, _enabled: bool) {}
}

/// The subset of CPU state the player drives directly.
pub trait CpuRegisters {
    fn a(&self) -> u8;
    fn set_a(&mut self, value: u8);
    fn sp(&self) -> u16;
    fn set_sp(&mut self, value: u16);
    fn pc(&self) -> u16;
    fn set_pc(&mut self, value: u16);
    fn ime(&self) -> bool;
    fn set_ime(&mut self, enabled: bool);
}

/// Raw button state, sampled once per frame tick.
pub trait InputSource {
    fn poll_held(&mut self) -> Buttons;
}

impl InputSource for Buttons {
    fn poll_held(&mut self) -> Buttons {
        *self
    }
}

/// Where the status screen ends up.
pub trait StatusDisplay {
    /// Clear the screen and draw `status`. Called at least once per tick, so
    /// implementations must tolerate redundant redraws.
    fn clear_and_render_status(&mut self, status: &SongStatus);
}
