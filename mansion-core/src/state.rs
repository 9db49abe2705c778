//! Game state and the tracker that mutates it.
//!
//! [`GameState`] is a plain value owned by the control loop. The
//! [`Tracker`] borrows the board, takes a state, and is the only thing that
//! changes it. Every mutation keeps three invariants:
//!
//! - `current_room` is always a room on the board,
//! - `revealed_clues` and `unlocked` never shrink,
//! - `solved` never goes back to `false`.

use crate::board::{Board, ClueId, Furniture, FurnitureId, RoomId};
use crate::notes::Ask;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Clue cards the companion hands out before players must take one from
/// each other.
pub const MAX_CLUE_CARDS: u8 = 10;

/// Why a move was refused.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("There is no room {0}")]
    UnknownRoom(RoomId),
    #[error("Room {to} is not next to room {from}")]
    NotAdjacent { from: RoomId, to: RoomId },
    #[error("You are already in room {0}")]
    AlreadyThere(RoomId),
    #[error("Room {0} is locked")]
    Locked(RoomId),
}

/// Why a piece of furniture cannot be searched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidSearchError {
    #[error("There is no furniture {0}")]
    UnknownFurniture(FurnitureId),
    #[error("Furniture {furniture} is not in room {room}")]
    NotHere { furniture: FurnitureId, room: RoomId },
}

/// A yes/no question waiting for the player's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pending {
    /// "This room is locked. Do you have a key?"
    Key { room: RoomId },
    /// Questions guarding the note in `furniture`; the first one is being asked.
    Asks {
        furniture: FurnitureId,
        remaining: Vec<Ask>,
    },
}

/// Result of handing out a clue card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOutcome {
    Found,
    /// The companion is out of cards.
    TakeFromPlayer,
}

/// Snapshot of one game's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub current_room: RoomId,
    pub revealed_clues: BTreeSet<ClueId>,
    pub solved: bool,
    pub unlocked: BTreeSet<RoomId>,
    pub clue_cards: u8,
    /// Furniture whose clue card was already handed out.
    pub spent_notes: BTreeSet<FurnitureId>,
    pub pending: Option<Pending>,
    pub moves: u32,
}

impl GameState {
    /// A fresh game in the board's start room.
    pub fn new(board: &Board) -> Self {
        Self {
            current_room: board.start(),
            revealed_clues: BTreeSet::new(),
            solved: false,
            unlocked: BTreeSet::new(),
            clue_cards: 0,
            spent_notes: BTreeSet::new(),
            pending: None,
            moves: 0,
        }
    }

    pub fn has_clue(&self, clue: ClueId) -> bool {
        self.revealed_clues.contains(&clue)
    }

    pub fn is_unlocked(&self, room: RoomId) -> bool {
        self.unlocked.contains(&room)
    }

    /// One-line JSON snapshot for the debug log.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Applies moves and discoveries to a [`GameState`].
#[derive(Debug)]
pub struct Tracker<'a> {
    board: &'a Board,
    state: GameState,
}

impl<'a> Tracker<'a> {
    /// Start a new game on `board`.
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            state: GameState::new(board),
        }
    }

    /// Continue from an existing state.
    pub fn resume(board: &'a Board, state: GameState) -> Self {
        Self { board, state }
    }

    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Read-only snapshot of the current state.
    pub fn current_state(&self) -> GameState {
        self.state.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Walk through a door into `room`.
    ///
    /// On success the room's entry clue is revealed and the resolution
    /// condition is checked. On failure the state is untouched.
    pub fn apply_move(&mut self, room: RoomId) -> Result<GameState, InvalidMoveError> {
        let target = self
            .board
            .room(room)
            .ok_or(InvalidMoveError::UnknownRoom(room))?;
        let from = self.state.current_room;
        if room == from {
            return Err(InvalidMoveError::AlreadyThere(room));
        }
        if !self.board.is_adjacent(from, room) {
            return Err(InvalidMoveError::NotAdjacent { from, to: room });
        }
        if target.locked && !self.state.is_unlocked(room) {
            return Err(InvalidMoveError::Locked(room));
        }

        self.state.current_room = room;
        self.state.moves += 1;
        if target.entry_clue.is_some() {
            self.state.revealed_clues.insert(ClueId::Room(room));
        }
        self.check_resolution();
        Ok(self.current_state())
    }

    /// The furniture to search, if it stands in the current room.
    pub fn locate(&self, furniture: FurnitureId) -> Result<&'a Furniture, InvalidSearchError> {
        let piece = self
            .board
            .furniture(furniture)
            .ok_or(InvalidSearchError::UnknownFurniture(furniture))?;
        let room = self.state.current_room;
        let here = self
            .board
            .room(room)
            .map(|r| r.contains_furniture(furniture))
            .unwrap_or(false);
        if !here {
            return Err(InvalidSearchError::NotHere { furniture, room });
        }
        Ok(piece)
    }

    /// Unlock a room with a key. Unknown rooms are ignored.
    pub fn unlock(&mut self, room: RoomId) {
        if self.board.contains(room) {
            self.state.unlocked.insert(room);
        }
    }

    /// Record a clue. Returns `true` if it was new.
    pub fn reveal(&mut self, clue: ClueId) -> bool {
        let new = self.state.revealed_clues.insert(clue);
        self.check_resolution();
        new
    }

    /// Drop through the trapdoor back to the start room.
    pub fn fall_to_start(&mut self) {
        self.state.current_room = self.board.start();
    }

    /// Hand out the clue card hidden in `furniture`.
    pub fn take_clue_card(&mut self, furniture: FurnitureId) -> CardOutcome {
        self.state.spent_notes.insert(furniture);
        self.state.revealed_clues.insert(ClueId::Card(furniture));
        if self.state.clue_cards < MAX_CLUE_CARDS {
            self.state.clue_cards += 1;
            CardOutcome::Found
        } else {
            CardOutcome::TakeFromPlayer
        }
    }

    pub fn set_pending(&mut self, pending: Pending) {
        self.state.pending = Some(pending);
    }

    pub fn clear_pending(&mut self) -> Option<Pending> {
        self.state.pending.take()
    }

    fn check_resolution(&mut self) {
        if self
            .board
            .resolution()
            .is_met(self.state.current_room, &self.state.revealed_clues)
        {
            self.state.solved = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_board;

    #[test]
    fn test_new_state_starts_in_foyer() {
        let board = sample_board();
        let tracker = Tracker::new(&board);
        let state = tracker.current_state();
        assert_eq!(state.current_room, board.room_named("Foyer").unwrap().id);
        assert!(state.revealed_clues.is_empty());
        assert!(!state.solved);
    }

    #[test]
    fn test_move_to_adjacent_room() {
        let board = sample_board();
        let library = board.room_named("Library").unwrap().id;
        let mut tracker = Tracker::new(&board);
        let state = tracker.apply_move(library).unwrap();
        assert_eq!(state.current_room, library);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn test_state_snapshot_is_json() {
        let board = sample_board();
        let library = board.room_named("Library").unwrap().id;
        let mut tracker = Tracker::new(&board);
        let state = tracker.apply_move(library).unwrap();
        let json = state.to_json().unwrap();
        assert!(json.contains("\"current_room\":13"), "{json}");
        assert!(json.contains("\"moves\":1"), "{json}");
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_move_to_distant_room_fails_without_change() {
        let board = sample_board();
        let attic = board.room_named("Attic").unwrap().id;
        let mut tracker = Tracker::new(&board);
        let before = tracker.current_state();
        let err = tracker.apply_move(attic).unwrap_err();
        assert!(matches!(err, InvalidMoveError::NotAdjacent { .. }));
        assert_eq!(tracker.current_state(), before);
    }

    #[test]
    fn test_move_to_unknown_room() {
        let board = sample_board();
        let mut tracker = Tracker::new(&board);
        assert_eq!(
            tracker.apply_move(RoomId(99)),
            Err(InvalidMoveError::UnknownRoom(RoomId(99)))
        );
    }

    #[test]
    fn test_move_to_same_room() {
        let board = sample_board();
        let mut tracker = Tracker::new(&board);
        let start = board.start();
        assert_eq!(
            tracker.apply_move(start),
            Err(InvalidMoveError::AlreadyThere(start))
        );
    }

    #[test]
    fn test_locked_room_needs_unlock() {
        let board = sample_board();
        let library = board.room_named("Library").unwrap().id;
        let study = board.room_named("Study").unwrap().id;
        let mut tracker = Tracker::new(&board);
        tracker.apply_move(library).unwrap();
        assert_eq!(
            tracker.apply_move(study),
            Err(InvalidMoveError::Locked(study))
        );
        tracker.unlock(study);
        assert_eq!(tracker.apply_move(study).unwrap().current_room, study);
    }

    #[test]
    fn test_entry_clue_revealed_and_solves() {
        let board = sample_board();
        let mut tracker = Tracker::new(&board);
        for name in ["Library", "Study", "Attic"] {
            let id = board.room_named(name).unwrap().id;
            tracker.unlock(id);
            tracker.apply_move(id).unwrap();
        }
        let state = tracker.current_state();
        let attic = board.room_named("Attic").unwrap().id;
        assert!(state.has_clue(ClueId::Room(attic)));
        assert!(state.solved);

        // Walking away does not unsolve.
        let study = board.room_named("Study").unwrap().id;
        assert!(tracker.apply_move(study).unwrap().solved);
    }

    #[test]
    fn test_clue_cards_run_out() {
        let board = sample_board();
        let mut tracker = Tracker::new(&board);
        for code in 0..MAX_CLUE_CARDS {
            assert_eq!(
                tracker.take_clue_card(FurnitureId(500 + u16::from(code))),
                CardOutcome::Found
            );
        }
        assert_eq!(
            tracker.take_clue_card(FurnitureId(600)),
            CardOutcome::TakeFromPlayer
        );
        assert_eq!(tracker.state().clue_cards, MAX_CLUE_CARDS);
        assert!(tracker.state().spent_notes.contains(&FurnitureId(600)));
    }

    #[test]
    fn test_locate_only_in_current_room() {
        let board = sample_board();
        let library = board.room_named("Library").unwrap().id;
        let mut tracker = Tracker::new(&board);
        assert_eq!(
            tracker.locate(FurnitureId(144)).unwrap_err(),
            InvalidSearchError::NotHere {
                furniture: FurnitureId(144),
                room: board.start()
            }
        );
        tracker.apply_move(library).unwrap();
        assert_eq!(tracker.locate(FurnitureId(144)).unwrap().name, "Large Bookcase");
        assert_eq!(
            tracker.locate(FurnitureId(999)).unwrap_err(),
            InvalidSearchError::UnknownFurniture(FurnitureId(999))
        );
    }

    #[test]
    fn test_fall_to_start() {
        let board = sample_board();
        let library = board.room_named("Library").unwrap().id;
        let mut tracker = Tracker::new(&board);
        tracker.apply_move(library).unwrap();
        tracker.fall_to_start();
        assert_eq!(tracker.state().current_room, board.start());
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let board = sample_board();
        let mut tracker = Tracker::new(&board);
        assert!(tracker.reveal(ClueId::Hint(FurnitureId(144))));
        assert!(!tracker.reveal(ClueId::Hint(FurnitureId(144))));
        assert_eq!(tracker.state().revealed_clues.len(), 1);
    }
}
