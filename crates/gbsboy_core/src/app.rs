use gbsboy_common::{App, Key};

use crate::config::PlayerConfig;
use crate::display::TextConsole;
use crate::header::GbsFile;
use crate::input::Buttons;
use crate::machine::GbsMachine;
use crate::session::PlaybackSession;

/// Frontend-facing wrapper around a booted GBS file.
///
/// Key events between frames accumulate into a held-button mask; `update`
/// hands that mask to the session as this frame's raw input.
pub struct GbsApp {
    pub machine: GbsMachine,
    pub console: TextConsole,
    session: PlaybackSession,
    held: Buttons,
    should_exit: bool,
    frame_counter: u64,
}

impl GbsApp {
    pub fn new(file: &GbsFile, config: PlayerConfig) -> Self {
        let mut machine = GbsMachine::new();
        let mut console = TextConsole::new();
        let session = PlaybackSession::start(file, config, &mut machine, &mut console);
        Self {
            machine,
            console,
            session,
            held: Buttons::empty(),
            should_exit: false,
            frame_counter: 0,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaybackSession {
        &mut self.session
    }

    /// Select a song and restart playback from its init routine.
    pub fn play(&mut self, index: u8) {
        self.session.select(index);
        self.session.load_song(&mut self.machine, &mut self.console);
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn held(&self) -> Buttons {
        self.held
    }
}

/// Host key to handheld button.
///
/// - Arrow keys => D-pad
/// - Z => A, X => B
/// - A => Select, S => Start
/// - Q => L, W => R
pub fn map_key(key: Key) -> Buttons {
    match key {
        Key::Right => Buttons::RIGHT,
        Key::Left => Buttons::LEFT,
        Key::Up => Buttons::UP,
        Key::Down => Buttons::DOWN,
        Key::Z | Key::Return => Buttons::A,
        Key::X => Buttons::B,
        Key::A => Buttons::SELECT,
        Key::S => Buttons::START,
        Key::Q => Buttons::L,
        Key::W => Buttons::R,
        Key::Escape | Key::None => Buttons::empty(),
    }
}

impl App for GbsApp {
    fn init(&mut self) {
        log::info!("GBS player init: {}", self.title());
    }

    fn update(&mut self) {
        let mut held = self.held;
        self.session
            .on_frame_tick(&mut held, &mut self.machine, &mut self.console);
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        log::debug!("GBS key event: {:?} pressed={}", key, is_down);
        if key == Key::Escape && is_down {
            self.should_exit = true;
            return;
        }
        self.held.set(map_key(key), is_down);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!(
            "GBS player exit after {} frames on song {}",
            self.frame_counter,
            self.session.selected() as u16 + 1
        );
    }

    fn title(&self) -> String {
        let title = self.session.header().title();
        if title.is_empty() {
            "GBSBoy".to_string()
        } else {
            format!("GBSBoy - {title}")
        }
    }
}
