//! Startup configuration.

use std::path::PathBuf;

/// Where clips live unless told otherwise.
pub const DEFAULT_AUDIO_DIR: &str = "game_audio";

/// How a game is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Play clips as well as printing text. On by default only in builds
    /// with the `audio` feature.
    pub audio: bool,
    /// Replay a known mansion. `None` picks a fresh one.
    pub game_number: Option<u32>,
    /// Directory holding `<clip>.wav` files.
    pub audio_dir: PathBuf,
    /// Clear the terminal before each answer.
    pub clear_screen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            audio: cfg!(feature = "audio"),
            game_number: None,
            audio_dir: PathBuf::from(DEFAULT_AUDIO_DIR),
            clear_screen: true,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text only, no screen clearing. What tests and pipes want.
    pub fn plain() -> Self {
        Self::default().with_audio(false).with_clear_screen(false)
    }

    pub fn with_audio(mut self, audio: bool) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_game_number(mut self, game_number: u32) -> Self {
        self.game_number = Some(game_number);
        self
    }

    pub fn with_audio_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.audio_dir = dir.into();
        self
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }
}
