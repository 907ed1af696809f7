//! GBS header model.
//!
//! The header is a fixed 0x70-byte block at the start of the file:
//!
//! | offset | size | field                       |
//! |--------|------|-----------------------------|
//! | 0x00   | 3    | magic `"GBS"`               |
//! | 0x03   | 1    | version (always 1)          |
//! | 0x04   | 1    | number of songs             |
//! | 0x05   | 1    | first song (1-based)        |
//! | 0x06   | 2    | load address (LE)           |
//! | 0x08   | 2    | init address (LE)           |
//! | 0x0A   | 2    | play address (LE)           |
//! | 0x0C   | 2    | stack pointer (LE)          |
//! | 0x0E   | 1    | timer modulo (TMA)          |
//! | 0x0F   | 1    | timer control (TAC)         |
//! | 0x10   | 32   | title                       |
//! | 0x30   | 32   | author                      |
//! | 0x50   | 32   | copyright                   |

use std::path::Path;

use crate::{GbsError, Result, HEADER_SIZE};

pub const MAGIC: [u8; 3] = *b"GBS";
/// Width of each metadata text field.
pub const TEXT_FIELD_LEN: usize = 32;

/// Lowest load address that does not overlap the synthesised vectors and
/// boot entry in ROM bank 0.
pub const MIN_LOAD_ADDRESS: u16 = 0x0400;
/// Last address of the 32 KiB cartridge ROM window.
pub const MAX_LOAD_ADDRESS: u16 = 0x7FFF;

/// Metadata text fields in header order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TextField {
    Title,
    Author,
    Copyright,
}

impl TextField {
    pub const ALL: [TextField; 3] = [TextField::Title, TextField::Author, TextField::Copyright];

    fn offset(self) -> usize {
        match self {
            TextField::Title => 0x10,
            TextField::Author => 0x30,
            TextField::Copyright => 0x50,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GbsHeader {
    pub magic: [u8; 3],
    pub version: u8,
    pub song_count: u8,
    /// First song as declared by the file (1-based).
    pub first_song: u8,
    pub load_address: u16,
    pub init_address: u16,
    pub play_address: u16,
    /// Value SP is reset to before every call into the init routine.
    pub stack_pointer: u16,
    pub timer_modulo: u8,
    pub timer_control: u8,
    title: [u8; TEXT_FIELD_LEN],
    author: [u8; TEXT_FIELD_LEN],
    copyright: [u8; TEXT_FIELD_LEN],
}

#[inline]
fn read_le_u16(raw: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([raw[offset], raw[offset + 1]])
}

fn read_text(raw: &[u8], offset: usize) -> [u8; TEXT_FIELD_LEN] {
    let mut field = [0u8; TEXT_FIELD_LEN];
    field.copy_from_slice(&raw[offset..offset + TEXT_FIELD_LEN]);
    field
}

impl GbsHeader {
    /// Read every field from its fixed offset.
    ///
    /// Nothing is checked here: garbage in gives garbage out. Use
    /// [`GbsHeader::parse`] for the validating path.
    pub fn read_fields(raw: &[u8; HEADER_SIZE]) -> Self {
        Self {
            magic: [raw[0x00], raw[0x01], raw[0x02]],
            version: raw[0x03],
            song_count: raw[0x04],
            first_song: raw[0x05],
            load_address: read_le_u16(raw, 0x06),
            init_address: read_le_u16(raw, 0x08),
            play_address: read_le_u16(raw, 0x0A),
            stack_pointer: read_le_u16(raw, 0x0C),
            timer_modulo: raw[0x0E],
            timer_control: raw[0x0F],
            title: read_text(raw, TextField::Title.offset()),
            author: read_text(raw, TextField::Author.offset()),
            copyright: read_text(raw, TextField::Copyright.offset()),
        }
    }

    /// Parse and sanity-check a header from the start of `data`.
    ///
    /// On top of the fixed-offset read this rejects short input, a wrong
    /// magic, a zero song count and load addresses that would overlap the
    /// synthesised boot code. Init, play and stack addresses are still taken
    /// verbatim.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let raw: &[u8; HEADER_SIZE] = data
            .get(..HEADER_SIZE)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(GbsError::TooShort { len: data.len() })?;

        let header = Self::read_fields(raw);

        if header.magic != MAGIC {
            return Err(GbsError::BadMagic {
                found: header.magic,
            });
        }
        if header.version != 1 {
            log::warn!(
                "GBS: unexpected header version {}, continuing anyway",
                header.version
            );
        }
        if header.song_count == 0 {
            return Err(GbsError::NoSongs);
        }
        if !(MIN_LOAD_ADDRESS..=MAX_LOAD_ADDRESS).contains(&header.load_address) {
            return Err(GbsError::LoadAddressOutOfRange {
                address: header.load_address,
            });
        }

        Ok(header)
    }

    /// Zero-based index of the song to start with.
    ///
    /// Files in the wild sometimes declare 0 or a song past the end; those
    /// start at the first song instead.
    pub fn first_song_index(&self) -> u8 {
        match self.first_song {
            n if (1..=self.song_count).contains(&n) => n - 1,
            n => {
                log::warn!(
                    "GBS: declared first song {} is outside 1..={}, starting at song 1",
                    n,
                    self.song_count
                );
                0
            }
        }
    }

    pub fn raw_text(&self, field: TextField) -> &[u8; TEXT_FIELD_LEN] {
        match field {
            TextField::Title => &self.title,
            TextField::Author => &self.author,
            TextField::Copyright => &self.copyright,
        }
    }

    /// Fixed-width rendering of a text field: exactly 32 characters, NUL
    /// bytes shown as spaces.
    pub fn text_block(&self, field: TextField) -> String {
        self.raw_text(field)
            .iter()
            .map(|&b| if b == 0 { ' ' } else { b as char })
            .collect()
    }

    /// Text up to the first NUL with trailing padding removed.
    pub fn text(&self, field: TextField) -> String {
        let raw = self.raw_text(field);
        let end = raw.iter().position(|&b| b == 0).unwrap_or(TEXT_FIELD_LEN);
        String::from_utf8_lossy(&raw[..end]).trim_end().to_string()
    }

    pub fn title(&self) -> String {
        self.text(TextField::Title)
    }

    pub fn author(&self) -> String {
        self.text(TextField::Author)
    }

    pub fn copyright(&self) -> String {
        self.text(TextField::Copyright)
    }
}

/// A loaded GBS file: validated header plus the code/data that follows it.
#[derive(Clone, Debug)]
pub struct GbsFile {
    pub header: GbsHeader,
    pub payload: Vec<u8>,
}

impl GbsFile {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = GbsHeader::parse(data)?;
        Ok(Self {
            header,
            payload: data[HEADER_SIZE..].to_vec(),
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }
}
