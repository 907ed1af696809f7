use crate::header::GbsHeader;

/// TAC bit 7 in a GBS header asks for CGB double-speed mode. It is not part
/// of the hardware register and is stripped before programming TAC.
pub const DOUBLE_SPEED_FLAG: u8 = 0x80;
/// TAC bit 2: timer enabled.
pub const TIMER_ENABLE: u8 = 0x04;

/// TMA used when the header leaves the tempo up to the player.
pub const DEFAULT_TIMER_MODULO: u8 = 188;
/// TAC used when the header leaves the tempo up to the player.
pub const DEFAULT_TIMER_CONTROL: u8 = 84;

/// Vertical blank rate of the DMG LCD.
pub const VBLANK_RATE_HZ: f64 = 4_194_304.0 / 70_224.0;

/// Effective timer programming derived from a header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimerSettings {
    pub modulo: u8,
    pub control: u8,
    pub double_speed: bool,
}

impl TimerSettings {
    /// Strip the double-speed flag and substitute the default tempo when both
    /// TMA and TAC are zero.
    ///
    /// The default works out to 4096 Hz / (256 - 188), about 60.2 calls per
    /// second, which is close to the frame rate most drivers expect.
    pub fn from_header(header: &GbsHeader) -> Self {
        let double_speed = header.timer_control & DOUBLE_SPEED_FLAG != 0;
        let mut modulo = header.timer_modulo;
        let mut control = header.timer_control & !DOUBLE_SPEED_FLAG;

        if modulo == 0 && control == 0 {
            modulo = DEFAULT_TIMER_MODULO;
            control = DEFAULT_TIMER_CONTROL;
        }

        Self {
            modulo,
            control,
            double_speed,
        }
    }

    pub fn timer_enabled(&self) -> bool {
        self.control & TIMER_ENABLE != 0
    }

    /// Timer input clock selected by TAC[1:0].
    pub fn input_clock_hz(&self) -> u32 {
        let base = match self.control & 0x03 {
            0x00 => 4_096,
            0x01 => 262_144,
            0x02 => 65_536,
            _ => 16_384,
        };
        if self.double_speed {
            base * 2
        } else {
            base
        }
    }

    /// How often the play routine runs.
    ///
    /// With the timer disabled, GBS drivers are called from vertical blank
    /// instead.
    pub fn play_rate_hz(&self) -> f64 {
        if !self.timer_enabled() {
            return VBLANK_RATE_HZ;
        }
        self.input_clock_hz() as f64 / (256 - self.modulo as u32) as f64
    }
}
