use crate::host::{Bus, CpuRegisters, IO_BASE};
use crate::io::{Interrupts, IE};

mod regs;

pub use regs::Registers;

/// Total addressable memory (64 KiB).
const MEMORY_SIZE: usize = 0x10000;
/// End of the cartridge ROM window.
const ROM_END: u16 = 0x7FFF;

/// Minimal host machine: a flat address space plus the CPU state the player
/// touches.
///
/// There is no instruction interpreter here. The machine records what the
/// player writes so that a CPU core can take over, and so that tests and the
/// CLI can inspect the synthesised image.
pub struct GbsMachine {
    pub regs: Registers,
    pub ime: bool,
    memory: [u8; MEMORY_SIZE],
    double_speed: bool,
}

impl Default for GbsMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GbsMachine {
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            memory: [0; MEMORY_SIZE],
            double_speed: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read without side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    pub fn peek16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.peek(addr), self.peek(addr.wrapping_add(1))])
    }

    /// Slice of memory starting at `addr`.
    pub fn memory_range(&self, addr: u16, len: usize) -> &[u8] {
        let start = addr as usize;
        let end = start.saturating_add(len).min(MEMORY_SIZE);
        &self.memory[start..end]
    }

    pub fn io(&self, reg: u8) -> u8 {
        self.peek(IO_BASE | reg as u16)
    }

    pub fn interrupt_enable(&self) -> Interrupts {
        Interrupts::from_bits_truncate(self.io(IE))
    }

    pub fn double_speed(&self) -> bool {
        self.double_speed
    }
}

impl Bus for GbsMachine {
    fn read8(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match addr {
            // No mapper: CPU writes into ROM have no effect.
            0x0000..=ROM_END => {
                log::trace!("machine: ignored ROM write {:#06X} <- {:#04X}", addr, value);
            }
            // Echo RAM mirrors WRAM.
            0xE000..=0xFDFF => {
                self.memory[addr as usize] = value;
                self.memory[(addr - 0x2000) as usize] = value;
            }
            _ => self.memory[addr as usize] = value,
        }
    }

    fn write_rom(&mut self, addr: u16, value: u8) {
        if addr <= ROM_END {
            self.memory[addr as usize] = value;
        } else {
            self.write8(addr, value);
        }
    }

    fn set_double_speed(&mut self, enabled: bool) {
        log::debug!("machine: double speed {}", if enabled { "on" } else { "off" });
        self.double_speed = enabled;
    }
}

impl CpuRegisters for GbsMachine {
    fn a(&self) -> u8 {
        self.regs.a
    }

    fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    fn sp(&self) -> u16 {
        self.regs.sp
    }

    fn set_sp(&mut self, value: u16) {
        self.regs.sp = value;
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    fn ime(&self) -> bool {
        self.ime
    }

    fn set_ime(&mut self, enabled: bool) {
        self.ime = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::TMA;

    #[test]
    fn cpu_writes_to_rom_are_ignored_but_patches_land() {
        let mut machine = GbsMachine::new();
        machine.write8(0x0050, 0xCD);
        assert_eq!(machine.peek(0x0050), 0x00);

        machine.write_rom(0x0050, 0xCD);
        assert_eq!(machine.peek(0x0050), 0xCD);
    }

    #[test]
    fn io_writes_land_in_high_page() {
        let mut machine = GbsMachine::new();
        machine.write_io(TMA, 0xBC);
        machine.write_io(IE, Interrupts::TIMER.bits());
        assert_eq!(machine.peek(0xFF06), 0xBC);
        assert_eq!(machine.io(TMA), 0xBC);
        assert_eq!(machine.interrupt_enable(), Interrupts::TIMER);
    }

    #[test]
    fn echo_ram_mirrors_wram() {
        let mut machine = GbsMachine::new();
        machine.write8(0xE123, 0x42);
        assert_eq!(machine.peek(0xC123), 0x42);
    }

    #[test]
    fn memory_range_clamps_at_top_of_memory() {
        let machine = GbsMachine::new();
        assert_eq!(machine.memory_range(0xFFFE, usize::MAX).len(), 2);
        assert_eq!(machine.memory_range(0x0100, 4).len(), 4);
    }

    #[test]
    fn af_masks_low_flag_bits() {
        let mut machine = GbsMachine::new();
        machine.regs.a = 0x12;
        machine.regs.f = 0xFF;
        assert_eq!(machine.regs.af(), 0x12F0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut machine = GbsMachine::new();
        machine.set_pc(0x1234);
        machine.set_double_speed(true);
        machine.write8(0xC000, 1);
        machine.reset();
        assert_eq!(machine.pc(), 0);
        assert!(!machine.double_speed());
        assert_eq!(machine.peek(0xC000), 0);
    }
}
