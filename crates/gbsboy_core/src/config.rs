use typed_builder::TypedBuilder;

use crate::input::{Buttons, InputTracker, DEFAULT_REPEAT_DELAY, DEFAULT_REPEAT_INTERVAL};

/// Which buttons drive track navigation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyBindings {
    pub previous: Buttons,
    pub next: Buttons,
    /// Restarts the selected song from its init routine.
    pub restart: Buttons,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            previous: Buttons::LEFT,
            next: Buttons::RIGHT,
            restart: Buttons::A,
        }
    }
}

/// Player tuning. Every field has a default matching the handheld player, so
/// `PlayerConfig::default()` is what most callers want.
#[derive(TypedBuilder, Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlayerConfig {
    /// Ticks before a held navigation button starts repeating.
    #[builder(default = DEFAULT_REPEAT_DELAY)]
    pub repeat_delay: u32,
    /// Ticks between repeats.
    #[builder(default = DEFAULT_REPEAT_INTERVAL)]
    pub repeat_interval: u32,
    #[builder(default)]
    pub bindings: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PlayerConfig {
    pub(crate) fn input_tracker(&self) -> InputTracker {
        InputTracker::new(self.repeat_delay, self.repeat_interval)
    }
}
