//! Testing utilities for the companion.
//!
//! This module provides tools for unit and integration tests:
//! - A small hand-built board and mansion with one note of each kind
//! - Presenters and audio sinks that record or fail on demand
//! - `TestHarness` for scripted game scenarios
//! - `run_script` for driving the console loop from a string

use crate::board::{Board, BoardBuilder, ClueId, Furniture, FurnitureId, Resolution, Room, RoomId};
use crate::console::{self, ConsoleError, ConsoleOptions, Outcome};
use crate::content::{MansionContent, Phrases};
use crate::cue::{Clip, Cue, CueCatalog, CueId};
use crate::layout::Mansion;
use crate::narration::{AudioSink, NarrationError, NarrationPresenter, TextPresenter};
use crate::notes::{Ask, Hint, Note};
use crate::sequencer::{CueResult, PlayerAction, Sequencer};
use crate::session::GameSession;
use crate::state::GameState;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::rc::Rc;

/// Game number of the sample mansion.
pub const SAMPLE_GAME_NUMBER: u32 = 2016;

// ============================================================================
// Sample boards
// ============================================================================

/// Foyer, Library, Kitchen, a locked Study and an Attic with an entry clue.
///
/// ```text
/// Kitchen(21) - Foyer(11) - Library(13) - Study(31, locked) - Attic(33)
/// ```
fn sample_builder() -> BoardBuilder {
    let mut builder = Board::builder()
        .room(Room::new(11, "Foyer"))
        .room(Room::new(13, "Library"))
        .room(Room::new(21, "Kitchen"))
        .room(Room::new(31, "Study").locked())
        .room(Room::new(33, "Attic").with_entry_clue("Fresh footprints in the dust lead back down the stairs."))
        .door(11, 13)
        .door(11, 21)
        .door(13, 31)
        .door(31, 33)
        .start(11);
    let pieces = [
        (221, "Clock", 11),
        (121, "Sofa", 11),
        (144, "Large Bookcase", 13),
        (131, "Small Bookcase", 13),
        (134, "Oven", 21),
        (133, "Sink", 21),
        (213, "Piano", 31),
        (214, "Telescope", 33),
    ];
    for (code, name, room) in pieces {
        builder = builder.furniture(Furniture::new(code, name)).place(code, room);
    }
    builder
}

/// The sample board, solved by walking into the Attic.
pub fn sample_board() -> Board {
    sample_builder()
        .resolution(Resolution::new(RoomId(33), [ClueId::Room(RoomId(33))]))
        .build()
        .expect("sample board is valid")
}

/// The sample board with a note of every kind. The money is in the Oven.
///
/// | furniture            | note                                        |
/// |----------------------|---------------------------------------------|
/// | 221 Clock            | trapdoor                                    |
/// | 121 Sofa             | look in the Large Bookcase                  |
/// | 144 Large Bookcase   | clue card                                   |
/// | 131 Small Bookcase   | clue card guarded by the Tape and the Cook  |
/// | 134 Oven             | money guarded by the Map and the Butler     |
/// | 213 Piano            | secret guarded by the Letter: not the Attic |
/// | 214 Telescope        | not in the Sink                             |
/// | 133 Sink             | nothing                                     |
pub fn sample_mansion() -> Mansion {
    let board = sample_builder()
        .resolution(Resolution::new(RoomId(21), [ClueId::Money]))
        .build()
        .expect("sample board is valid");
    let notes = BTreeMap::from([
        (FurnitureId(221), Note::Trapdoor),
        (FurnitureId(121), Note::Hint(Hint::LookIn(FurnitureId(144)))),
        (FurnitureId(144), Note::ClueCard { asks: Vec::new() }),
        (
            FurnitureId(131),
            Note::ClueCard {
                asks: vec![Ask::Item("Tape".to_string()), Ask::Person("Cook".to_string())],
            },
        ),
        (
            FurnitureId(134),
            Note::Money {
                item: "Map".to_string(),
                person: "Butler".to_string(),
            },
        ),
        (
            FurnitureId(213),
            Note::Secret {
                ask: Ask::Item("Letter".to_string()),
                hint: Hint::NotInRoom(RoomId(33)),
            },
        ),
        (FurnitureId(214), Note::Hint(Hint::NotInFurniture(FurnitureId(133)))),
    ]);
    Mansion::from_parts(SAMPLE_GAME_NUMBER, board, notes)
}

/// Phrases from the built-in content.
pub fn sample_phrases() -> Phrases {
    MansionContent::builtin()
        .expect("built-in content is valid")
        .phrases
}

pub fn sample_catalog() -> CueCatalog {
    CueCatalog::new(sample_phrases())
}

// ============================================================================
// Output capture
// ============================================================================

/// A cloneable in-memory writer. Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Remembers every cue it is shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    cues: Rc<RefCell<Vec<Cue>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }

    pub fn ids(&self) -> Vec<CueId> {
        self.cues.borrow().iter().map(|c| c.id).collect()
    }
}

impl NarrationPresenter for RecordingPresenter {
    fn present(&mut self, cue: &Cue) -> Result<(), NarrationError> {
        self.cues.borrow_mut().push(cue.clone());
        Ok(())
    }
}

/// Remembers every clip it is asked to play.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    played: Rc<RefCell<Vec<Clip>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Rc<RefCell<Vec<Clip>>> {
        Rc::clone(&self.played)
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, clip: &Clip) -> Result<(), NarrationError> {
        self.played.borrow_mut().push(clip.clone());
        Ok(())
    }
}

/// An audio sink that fails every clip.
#[derive(Debug, Clone, Copy)]
pub enum FailingSink {
    /// The device went away.
    Unavailable,
    /// The clip file does not exist.
    Missing,
}

impl FailingSink {
    pub fn unavailable() -> Self {
        FailingSink::Unavailable
    }

    pub fn missing() -> Self {
        FailingSink::Missing
    }
}

impl AudioSink for FailingSink {
    fn play(&mut self, clip: &Clip) -> Result<(), NarrationError> {
        match self {
            FailingSink::Unavailable => Err(NarrationError::AudioBackendUnavailable(
                "device disconnected".to_string(),
            )),
            FailingSink::Missing => Err(NarrationError::MissingClip(PathBuf::from(format!(
                "game_audio/{clip:?}.wav"
            )))),
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Drives a [`Sequencer`] turn by turn, keeping the state between turns.
pub struct TestHarness {
    sequencer: Sequencer,
    state: GameState,
    results: Vec<CueResult>,
}

impl TestHarness {
    /// A harness on the sample mansion.
    pub fn new() -> Self {
        Self::with_mansion(sample_mansion())
    }

    pub fn with_mansion(mansion: Mansion) -> Self {
        let sequencer = Sequencer::new(mansion, sample_phrases());
        let state = sequencer.initial_state();
        Self {
            sequencer,
            state,
            results: Vec::new(),
        }
    }

    pub fn act(&mut self, action: PlayerAction) -> &CueResult {
        let turn = self.sequencer.next_cue(&self.state, action);
        self.state = turn.state;
        self.results.push(turn.result);
        &self.results[self.results.len() - 1]
    }

    /// Walk into the room called `name`.
    pub fn go(&mut self, name: &str) -> &CueResult {
        let room = self.room(name);
        self.act(PlayerAction::Move(room))
    }

    pub fn search(&mut self, code: u16) -> &CueResult {
        self.act(PlayerAction::Search(FurnitureId(code)))
    }

    pub fn answer(&mut self, yes: bool) -> &CueResult {
        self.act(PlayerAction::Answer(yes))
    }

    pub fn room(&self, name: &str) -> RoomId {
        self.sequencer
            .board()
            .room_named(name)
            .unwrap_or_else(|| panic!("no room called {name}"))
            .id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn last(&self) -> Option<&CueResult> {
        self.results.last()
    }

    pub fn last_text(&self) -> String {
        self.last().map(|r| r.cue().text()).unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert the player stands in the room called `name`.
pub fn assert_in_room(harness: &TestHarness, name: &str) {
    assert_eq!(
        harness.state().current_room,
        harness.room(name),
        "expected to be in the {name}"
    );
}

/// Assert the last cue has the given id.
pub fn assert_last_cue(harness: &TestHarness, id: CueId) {
    let last = harness.last().map(|r| r.cue().id);
    assert_eq!(last, Some(id), "last cue was {last:?}");
}

/// Run the console loop on `mansion` with `script` as the typed input.
///
/// Returns how the game ended and everything printed, prompts included.
pub fn run_script(mansion: Mansion, script: &str) -> Result<(Outcome, String), ConsoleError> {
    let content = MansionContent::builtin().expect("built-in content is valid");
    let out = SharedBuffer::new();
    let mut session = GameSession::new(mansion, &content, Box::new(TextPresenter::new(out.clone())));
    let outcome = console::run(
        &mut session,
        Cursor::new(script.to_string()),
        out.clone(),
        ConsoleOptions::default(),
    )?;
    Ok((outcome, out.contents()))
}
