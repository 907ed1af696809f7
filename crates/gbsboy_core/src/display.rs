use crate::header::{GbsHeader, TextField};
use crate::host::StatusDisplay;

/// Everything the status screen shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SongStatus {
    /// 1-based number of the selected song.
    pub song_number: u16,
    pub song_count: u8,
    /// Title, author and copyright as fixed 32-character blocks.
    pub blocks: [String; 3],
}

impl SongStatus {
    pub fn new(header: &GbsHeader, selected_index: u8) -> Self {
        Self {
            song_number: selected_index as u16 + 1,
            song_count: header.song_count,
            blocks: TextField::ALL.map(|field| header.text_block(field)),
        }
    }

    pub fn headline(&self) -> String {
        format!("Song {} of {}", self.song_number, self.song_count)
    }

    /// Screen lines: headline, a blank line, then the three text blocks.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(5);
        lines.push(self.headline());
        lines.push(String::new());
        lines.extend(self.blocks.iter().cloned());
        lines
    }
}

/// Text-mode console that keeps the last rendered screen in memory.
#[derive(Default, Debug)]
pub struct TextConsole {
    lines: Vec<String>,
    redraws: u64,
}

impl TextConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of redraws since creation.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }
}

impl StatusDisplay for TextConsole {
    fn clear_and_render_status(&mut self, status: &SongStatus) {
        self.lines = status.lines();
        self.redraws = self.redraws.wrapping_add(1);
    }
}
