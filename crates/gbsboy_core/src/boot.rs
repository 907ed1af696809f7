//! Synthetic boot image.
//!
//! A GBS rip has no cartridge header, no reset code and no interrupt
//! handlers. We fabricate just enough of ROM bank 0 for the driver to run:
//!
//! ```text
//! 0x0000..0x003F  RST n   -> JP load_address + n
//! 0x0050          INT $50 -> CALL play_address ; RETI
//! 0x0100          entry   -> EI ; HALT ; JR -3
//! ```
//!
//! The init routine returns into the entry loop (see
//! [`SyntheticCallFrame`](crate::session::SyntheticCallFrame)), after which
//! the timer interrupt calls the play routine forever.

mod timer;

pub use timer::{
    TimerSettings, DEFAULT_TIMER_CONTROL, DEFAULT_TIMER_MODULO, DOUBLE_SPEED_FLAG, TIMER_ENABLE,
    VBLANK_RATE_HZ,
};

use crate::header::{GbsHeader, MAX_LOAD_ADDRESS};
use crate::host::Bus;
use crate::io::{Interrupts, IE, TAC, TIMA, TMA};

/// Timer interrupt vector.
pub const TIMER_VECTOR: u16 = 0x0050;
/// Where the boot loop lives and where init returns to.
pub const BOOT_ENTRY: u16 = 0x0100;
/// Number of RST vectors, each 8 bytes apart from 0x0000.
pub const RST_VECTOR_COUNT: u16 = 8;

pub mod opcode {
    pub const JP: u8 = 0xC3;
    pub const CALL: u8 = 0xCD;
    pub const RETI: u8 = 0xD9;
    pub const EI: u8 = 0xFB;
    pub const HALT: u8 = 0x76;
    pub const JR: u8 = 0x18;
}

/// Write a run of bytes into ROM starting at `addr`.
fn patch_rom(bus: &mut impl Bus, addr: u16, bytes: &[u8]) {
    for (offset, &byte) in bytes.iter().enumerate() {
        bus.write_rom(addr.wrapping_add(offset as u16), byte);
    }
}

/// `op lo hi` with a little-endian 16-bit operand.
fn with_address(op: u8, target: u16) -> [u8; 3] {
    let [lo, hi] = target.to_le_bytes();
    [op, lo, hi]
}

/// Program the timer, lay down the trampolines and enable the timer
/// interrupt.
///
/// Returns the timer settings that ended up in TMA/TAC.
pub fn build_boot_image(header: &GbsHeader, bus: &mut impl Bus) -> TimerSettings {
    let timer = TimerSettings::from_header(header);
    if timer.double_speed {
        bus.set_double_speed(true);
    }

    // Zero TIMA before the new modulo goes in so the first overflow comes a
    // full period later.
    bus.write_io(TIMA, 0x00);
    bus.write_io(TMA, timer.modulo);
    bus.write_io(TAC, timer.control);

    let [play_lo, play_hi] = header.play_address.to_le_bytes();
    patch_rom(
        bus,
        TIMER_VECTOR,
        &[opcode::CALL, play_lo, play_hi, opcode::RETI],
    );

    // Drivers built for a real cartridge use RST with the cartridge's own
    // vectors; forward each one to the same offset from the load address.
    for slot in 0..RST_VECTOR_COUNT {
        let vector = slot * 8;
        let target = header.load_address.wrapping_add(vector);
        patch_rom(bus, vector, &with_address(opcode::JP, target));
    }

    // JR -3 lands back on HALT.
    patch_rom(
        bus,
        BOOT_ENTRY,
        &[opcode::EI, opcode::HALT, opcode::JR, (-3i8) as u8],
    );

    bus.write_io(IE, Interrupts::TIMER.bits());

    log::info!(
        "GBS: boot image ready (TMA={} TAC={:#04X} double_speed={} play rate {:.2} Hz)",
        timer.modulo,
        timer.control,
        timer.double_speed,
        timer.play_rate_hz(),
    );

    timer
}

/// Copy the code/data payload to the load address.
///
/// Only the 32 KiB ROM window is filled; anything beyond it belongs to
/// switchable banks, which are the host's business. Returns the number of
/// bytes placed.
pub fn load_payload(header: &GbsHeader, payload: &[u8], bus: &mut impl Bus) -> usize {
    let start = header.load_address as usize;
    let room = (MAX_LOAD_ADDRESS as usize + 1).saturating_sub(start);
    let len = payload.len().min(room);

    if len < payload.len() {
        log::warn!(
            "GBS: payload is {} bytes but only {} fit below 0x8000; the rest needs bank switching",
            payload.len(),
            len
        );
    }

    patch_rom(bus, header.load_address, &payload[..len]);
    log::debug!("GBS: placed {} payload bytes at {:#06X}", len, start);
    len
}
