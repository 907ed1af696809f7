use bitflags::bitflags;

use crate::host::InputSource;


/// Ticks a button must be held after its first press before it repeats.
pub const DEFAULT_REPEAT_DELAY: u32 = 14;
/// Ticks between repeats once repeating has started.
pub const DEFAULT_REPEAT_INTERVAL: u32 = 2;

bitflags! {
    /// Logical buttons of the host handheld.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Buttons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const RIGHT = 1 << 4;
        const LEFT = 1 << 5;
        const UP = 1 << 6;
        const DOWN = 1 << 7;
        const R = 1 << 8;
        const L = 1 << 9;
        const X = 1 << 10;
        const Y = 1 << 11;
    }
}

/// Edge and auto-repeat tracking on top of raw held-button masks.
///
/// `update` must be called exactly once per frame tick; all queries then
/// describe that tick. Repeat timing is counted in ticks, not wall-clock
/// time, so the cadence scales with the host's refresh rate.
///
/// The two repeat countdowns are shared between buttons: holding one
/// navigation button and tapping another restarts the delay for both.
#[derive(Clone, Debug)]
pub struct InputTracker {
    previous: Buttons,
    current: Buttons,
    just_pressed: Buttons,
    /// Buttons ignored until they are physically released.
    force_released: Buttons,
    repeat_start_timer: u32,
    repeat_timer: u32,
    repeat_delay: u32,
    repeat_interval: u32,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(DEFAULT_REPEAT_DELAY, DEFAULT_REPEAT_INTERVAL)
    }
}

impl InputTracker {
    pub fn new(repeat_delay: u32, repeat_interval: u32) -> Self {
        Self {
            previous: Buttons::empty(),
            current: Buttons::empty(),
            just_pressed: Buttons::empty(),
            force_released: Buttons::empty(),
            repeat_start_timer: 0,
            repeat_timer: 0,
            repeat_delay,
            repeat_interval,
        }
    }

    /// Sample `source` and advance one tick.
    pub fn refresh(&mut self, source: &mut impl InputSource) {
        let held = source.poll_held();
        self.update(held);
    }

    /// Advance one tick with the raw held mask for this frame.
    pub fn update(&mut self, held: Buttons) {
        self.previous = self.current;
        self.current = held;

        // A force-released button is honoured again only after the player
        // lets go of it.
        self.force_released &= held;
        self.current &= !self.force_released;

        self.just_pressed = (self.previous ^ self.current) & self.current;
        if !self.just_pressed.is_empty() {
            log::trace!("input: just pressed {:?}", self.just_pressed);
        }

        self.repeat_timer = self.repeat_timer.saturating_sub(1);
        self.repeat_start_timer = self.repeat_start_timer.saturating_sub(1);
    }

    #[inline]
    pub fn is_pressed(&self, buttons: Buttons) -> bool {
        self.current.intersects(buttons)
    }

    #[inline]
    pub fn is_just_pressed(&self, buttons: Buttons) -> bool {
        self.just_pressed.intersects(buttons)
    }

    /// Press-then-hold trigger.
    ///
    /// Fires on the tick a button goes down, then again once it has been held
    /// for the repeat delay, then every repeat interval while still held.
    pub fn is_repeat_triggered(&mut self, buttons: Buttons) -> bool {
        if self.is_just_pressed(buttons) {
            self.repeat_start_timer = self.repeat_delay;
            return true;
        }
        if self.is_pressed(buttons) && self.repeat_start_timer == 0 && self.repeat_timer == 0 {
            self.repeat_timer = self.repeat_interval;
            return true;
        }
        false
    }

    /// Treat `buttons` as released until the host reports them up.
    pub fn force_release(&mut self, buttons: Buttons) {
        self.force_released |= buttons;
        self.current &= !buttons;
    }

    pub fn pressed(&self) -> Buttons {
        self.current
    }

    pub fn just_pressed(&self) -> Buttons {
        self.just_pressed
    }
}
