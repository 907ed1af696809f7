use crate::key::Key;

/// Frame-driven application interface shared by all frontends.
///
/// A frontend calls `update` once per display refresh and forwards key
/// transitions through `handle_key_event` between frames.
pub trait App {
    fn init(&mut self);
    fn update(&mut self);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn title(&self) -> String;
}
