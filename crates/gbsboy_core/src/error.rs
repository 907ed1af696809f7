use thiserror::Error;

/// Everything that can go wrong while accepting a GBS file.
///
/// Once a header has been accepted, booting and navigation cannot fail: they
/// only ever write into the emulated machine.
#[derive(Debug, Error)]
pub enum GbsError {
    #[error("GBS data is too short: {len} bytes, header needs 0x70")]
    TooShort { len: usize },

    #[error("not a GBS file (magic {found:02X?})")]
    BadMagic { found: [u8; 3] },

    #[error("GBS header declares zero songs")]
    NoSongs,

    #[error("load address {address:#06X} is outside the ROM window 0x0400..=0x7FFF")]
    LoadAddressOutOfRange { address: u16 },

    #[error("failed to read GBS file")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GbsError>;
