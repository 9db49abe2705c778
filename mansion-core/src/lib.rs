//! Game engine for a talking Mystery Mansion board-game companion.
//!
//! The physical board game is played as usual. The companion stands in for
//! the electronic unit: it knows which furniture hides what, asks whether
//! players hold the right item cards, hands out clues and announces the win.
//!
//! This crate provides:
//! - A reproducible mansion layout per game number
//! - Game state tracking (current room, revealed clues, unlocked rooms)
//! - A cue sequencer that turns player actions into narration
//! - Text and audio presenters, with rodio behind the `audio` feature
//! - A console control loop
//!
//! # Quick Start
//!
//! ```no_run
//! use mansion_core::{console, select_presenter, GameConfig, GameSession, MansionContent};
//! use std::io;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::new().with_game_number(2016);
//!     let content = MansionContent::builtin()?;
//!     let presenter = select_presenter(&config, io::stdout());
//!     let mut session = GameSession::from_config(&config, &content, presenter)?;
//!
//!     let outcome = console::run(
//!         &mut session,
//!         io::stdin().lock(),
//!         io::stdout(),
//!         console::ConsoleOptions { clear_screen: config.clear_screen },
//!     )?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

#[cfg(feature = "audio")]
pub mod audio;
pub mod board;
pub mod config;
pub mod console;
pub mod content;
pub mod cue;
pub mod input;
pub mod layout;
pub mod narration;
pub mod notes;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod testing;

// Primary public API
pub use board::{Board, BoardError, ClueId, Furniture, FurnitureId, Resolution, Room, RoomId};
pub use config::GameConfig;
pub use console::{ConsoleError, Outcome};
pub use content::{ContentError, MansionContent};
pub use cue::{Clip, Cue, CueId};
pub use input::{parse_action, UnrecognizedInput};
pub use layout::Mansion;
pub use narration::{select_presenter, NarrationError, NarrationPresenter};
pub use sequencer::{CueResult, PlayerAction, Sequencer, Turn};
pub use session::GameSession;
pub use state::{GameState, InvalidMoveError, InvalidSearchError, Tracker};
