/// Host keys a frontend can report.
///
/// This is deliberately frontend-neutral: a terminal loop, SDL window or test
/// harness maps whatever it receives onto these variants before handing them
/// to an [`App`](crate::App).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Z,
    X,
    A,
    S,
    Q,
    W,
    Return,
    Escape,
    None,
}
