use crate::boot::{self, TimerSettings, BOOT_ENTRY};
use crate::config::PlayerConfig;
use crate::display::SongStatus;
use crate::header::{GbsFile, GbsHeader};
use crate::host::{Bus, CpuRegisters, InputSource, StatusDisplay};
use crate::input::InputTracker;

#[cfg(test)]
mod tests;

/// Fake caller for the init routine.
///
/// GBS init routines end in `RET`. Nothing called them, so we push a return
/// address by hand; when init returns, the CPU drops into the boot entry's
/// halt loop and waits for the timer interrupt.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SyntheticCallFrame {
    pub return_address: u16,
}

impl Default for SyntheticCallFrame {
    fn default() -> Self {
        Self {
            return_address: BOOT_ENTRY,
        }
    }
}

impl SyntheticCallFrame {
    /// Reset SP to `stack_top` and push the return address the way `CALL`
    /// does: high byte first, SP decrementing.
    pub fn install<H: Bus + CpuRegisters>(&self, host: &mut H, stack_top: u16) {
        let [lo, hi] = self.return_address.to_le_bytes();
        let mut sp = stack_top;

        sp = sp.wrapping_sub(1);
        host.write8(sp, hi);
        sp = sp.wrapping_sub(1);
        host.write8(sp, lo);

        host.set_sp(sp);
    }
}

/// One loaded GBS file and the song currently selected in it.
pub struct PlaybackSession {
    header: GbsHeader,
    selected: u8,
    input: InputTracker,
    config: PlayerConfig,
    timer: Option<TimerSettings>,
}

impl PlaybackSession {
    /// Create a session with the header's first song selected. Nothing is
    /// written to the machine yet.
    pub fn new(header: GbsHeader, config: PlayerConfig) -> Self {
        let selected = header.first_song_index();
        Self {
            header,
            selected,
            input: config.input_tracker(),
            config,
            timer: None,
        }
    }

    /// Boot a parsed file: payload, boot image, first song, status screen.
    pub fn start<H, D>(
        file: &GbsFile,
        config: PlayerConfig,
        host: &mut H,
        display: &mut D,
    ) -> Self
    where
        H: Bus + CpuRegisters,
        D: StatusDisplay,
    {
        boot::load_payload(&file.header, &file.payload, host);
        Self::boot(file.header.clone(), config, host, display)
    }

    /// Boot from a header alone. Used when the payload is already in place.
    pub fn boot<H, D>(
        header: GbsHeader,
        config: PlayerConfig,
        host: &mut H,
        display: &mut D,
    ) -> Self
    where
        H: Bus + CpuRegisters,
        D: StatusDisplay,
    {
        let mut session = Self::new(header, config);
        log::info!(
            "GBS: {:?} by {:?}, {} song(s), starting at song {}",
            session.header.title(),
            session.header.author(),
            session.header.song_count,
            session.selected as u16 + 1,
        );

        session.timer = Some(boot::build_boot_image(&session.header, host));
        session.load_song(host, display);
        session.redraw(display);
        session
    }

    pub fn header(&self) -> &GbsHeader {
        &self.header
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Timer settings in effect, once booted.
    pub fn timer(&self) -> Option<TimerSettings> {
        self.timer
    }

    /// Zero-based index of the selected song.
    pub fn selected(&self) -> u8 {
        self.selected
    }

    pub fn song_count(&self) -> u8 {
        self.header.song_count
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputTracker {
        &mut self.input
    }

    pub fn status(&self) -> SongStatus {
        SongStatus::new(&self.header, self.selected)
    }

    /// Point the CPU at the init routine for the selected song.
    ///
    /// A carries the song index, the stack is reset with a return address
    /// into the boot loop, and IME is cleared: init re-enables interrupts
    /// itself (or the boot loop's `EI` does once init returns).
    pub fn load_song<H, D>(&mut self, host: &mut H, display: &mut D)
    where
        H: Bus + CpuRegisters,
        D: StatusDisplay,
    {
        log::info!(
            "GBS: loading song {}/{} (init {:#06X})",
            self.selected as u16 + 1,
            self.header.song_count,
            self.header.init_address
        );

        host.set_a(self.selected);
        SyntheticCallFrame::default().install(host, self.header.stack_pointer);
        host.set_pc(self.header.init_address);
        host.set_ime(false);

        self.redraw(display);
    }

    /// Select a song directly. Out-of-range indices wrap.
    ///
    /// This only changes the selection; call `load_song` to hear it.
    pub fn select(&mut self, index: u8) {
        self.selected = index % self.song_count().max(1);
    }

    pub fn select_previous(&mut self) {
        self.selected = match self.selected {
            0 => self.song_count().saturating_sub(1),
            n => n - 1,
        };
        log::debug!("GBS: selected song {}", self.selected as u16 + 1);
    }

    pub fn select_next(&mut self) {
        let next = self.selected as u16 + 1;
        self.selected = if next >= self.song_count() as u16 {
            0
        } else {
            next as u8
        };
        log::debug!("GBS: selected song {}", self.selected as u16 + 1);
    }

    pub fn redraw(&self, display: &mut impl StatusDisplay) {
        display.clear_and_render_status(&self.status());
    }

    /// Per-frame input handling, called at vertical blank.
    pub fn on_frame_tick<S, H, D>(&mut self, source: &mut S, host: &mut H, display: &mut D)
    where
        S: InputSource,
        H: Bus + CpuRegisters,
        D: StatusDisplay,
    {
        self.input.refresh(source);
        let bindings = self.config.bindings;

        if self.input.is_repeat_triggered(bindings.previous) {
            self.select_previous();
            self.redraw(display);
        }
        if self.input.is_repeat_triggered(bindings.next) {
            self.select_next();
            self.redraw(display);
        }
        if self.input.is_just_pressed(bindings.restart) {
            self.load_song(host, display);
        }

        self.redraw(display);
    }
}
