pub mod app;
pub mod boot;
pub mod config;
pub mod display;
mod error;
pub mod header;
pub mod host;
pub mod input;
pub mod io;
pub mod machine;
pub mod session;

pub use app::GbsApp;
pub use boot::{build_boot_image, load_payload, TimerSettings};
pub use config::{KeyBindings, PlayerConfig};
pub use display::{SongStatus, TextConsole};
pub use error::{GbsError, Result};
pub use header::{GbsFile, GbsHeader};
pub use host::{Bus, CpuRegisters, InputSource, StatusDisplay};
pub use input::{Buttons, InputTracker};
pub use machine::GbsMachine;
pub use session::PlaybackSession;

/// Size of the fixed GBS header. Code and data start right after it.
pub const HEADER_SIZE: usize = 0x70;
