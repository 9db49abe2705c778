//! Turns player actions into cues.
//!
//! The [`Sequencer`] owns the generated mansion and the cue catalog. It never
//! holds game state: each call to [`Sequencer::next_cue`] takes the current
//! [`GameState`] and hands back the next one alongside the cue to present.

use crate::board::{Board, ClueId, FurnitureId, RoomId};
use crate::content::Phrases;
use crate::cue::{Cue, CueCatalog};
use crate::layout::Mansion;
use crate::notes::Note;
use crate::state::{CardOutcome, GameState, InvalidMoveError, InvalidSearchError, Pending, Tracker};
use log::{debug, warn};

/// Something the player did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Walk into a room.
    Move(RoomId),
    /// Present the last cue again.
    Repeat,
    Quit,
    /// Look inside a piece of furniture in the current room.
    Search(FurnitureId),
    /// Answer the pending yes/no question.
    Answer(bool),
    /// Find furniture codes by name.
    Lookup(String),
    /// Where am I and how am I doing.
    Look,
    Help,
}

/// What the control loop should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueResult {
    Continue(Cue),
    /// The mystery is solved. The game is over.
    Solved(Cue),
    /// The player left. Carries the farewell.
    Quit(Cue),
}

impl CueResult {
    pub fn cue(&self) -> &Cue {
        match self {
            CueResult::Continue(cue) | CueResult::Solved(cue) | CueResult::Quit(cue) => cue,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, CueResult::Continue(_))
    }
}

/// One step of the game: the state after the action and what to present.
#[derive(Debug, Clone)]
pub struct Turn {
    pub state: GameState,
    pub result: CueResult,
}

pub struct Sequencer {
    mansion: Mansion,
    catalog: CueCatalog,
    last: Option<Cue>,
}

impl Sequencer {
    pub fn new(mansion: Mansion, phrases: Phrases) -> Self {
        Self {
            mansion,
            catalog: CueCatalog::new(phrases),
            last: None,
        }
    }

    pub fn mansion(&self) -> &Mansion {
        &self.mansion
    }

    pub fn board(&self) -> &Board {
        self.mansion.board()
    }

    pub fn catalog(&self) -> &CueCatalog {
        &self.catalog
    }

    /// The last cue handed out, if any.
    pub fn last_cue(&self) -> Option<&Cue> {
        self.last.as_ref()
    }

    /// A fresh state for this mansion.
    pub fn initial_state(&self) -> GameState {
        GameState::new(self.board())
    }

    /// The opening cue: welcome, then a look around the start room.
    pub fn start(&mut self) -> Cue {
        let cue = self.opening();
        self.last = Some(cue.clone());
        cue
    }

    /// Process one action against `state`.
    ///
    /// `Repeat` and `Quit` never change the state. Once the mystery is solved
    /// every other action answers with the win cue, and `Repeat` stays terminal.
    pub fn next_cue(&mut self, state: &GameState, action: PlayerAction) -> Turn {
        debug!("Action {:?} in room {}", action, state.current_room);

        match action {
            PlayerAction::Repeat => {
                let cue = self.last.clone().unwrap_or_else(|| self.opening());
                return self.finish(state.clone(), cue);
            }
            PlayerAction::Quit => {
                return Turn {
                    state: state.clone(),
                    result: CueResult::Quit(self.catalog.goodbye()),
                };
            }
            _ => {}
        }

        let (next, cue) = if state.solved {
            (state.clone(), self.catalog.win())
        } else {
            let mut tracker = Tracker::resume(self.mansion.board(), state.clone());
            let cue = self.dispatch(&mut tracker, action);
            (tracker.into_state(), cue)
        };
        self.last = Some(cue.clone());
        self.finish(next, cue)
    }

    fn finish(&self, state: GameState, cue: Cue) -> Turn {
        debug!(
            "Now in room {} with {} clues{}",
            state.current_room,
            state.revealed_clues.len(),
            if state.solved { ", solved" } else { "" }
        );
        match state.to_json() {
            Ok(json) => debug!("State: {json}"),
            Err(err) => warn!("Could not snapshot state: {err}"),
        }
        let result = if state.solved {
            CueResult::Solved(cue)
        } else {
            CueResult::Continue(cue)
        };
        Turn { state, result }
    }

    fn opening(&self) -> Cue {
        let board = self.board();
        self.catalog
            .welcome(self.mansion.game_number())
            .then(self.catalog.room(board, board.start(), false))
    }

    fn dispatch(&self, tracker: &mut Tracker<'_>, action: PlayerAction) -> Cue {
        match action {
            PlayerAction::Answer(yes) => self.answer(tracker, yes),
            PlayerAction::Look => self.catalog.status(
                self.board(),
                tracker.state(),
                self.mansion.game_number(),
            ),
            PlayerAction::Help => self.catalog.help(),
            PlayerAction::Move(room) => {
                self.decline(tracker);
                self.enter(tracker, room)
            }
            PlayerAction::Search(furniture) => {
                self.decline(tracker);
                self.search(tracker, furniture)
            }
            PlayerAction::Lookup(query) => {
                self.decline(tracker);
                self.catalog.lookup(&self.board().search_furniture(&query))
            }
            PlayerAction::Repeat | PlayerAction::Quit => self.catalog.invalid(),
        }
    }

    fn decline(&self, tracker: &mut Tracker<'_>) {
        if let Some(pending) = tracker.clear_pending() {
            debug!("Question {pending:?} left unanswered");
        }
    }

    fn enter(&self, tracker: &mut Tracker<'_>, room: RoomId) -> Cue {
        let seen = tracker.state().has_clue(ClueId::Room(room));
        match tracker.apply_move(room) {
            Ok(_) => self.catalog.room(self.board(), room, !seen),
            Err(InvalidMoveError::Locked(room)) => {
                tracker.set_pending(Pending::Key { room });
                self.catalog.locked(room)
            }
            Err(err) => {
                debug!("Move refused: {err}");
                self.catalog.no_such_move(self.board(), &err)
            }
        }
    }

    fn search(&self, tracker: &mut Tracker<'_>, furniture: FurnitureId) -> Cue {
        let piece = match tracker.locate(furniture) {
            Ok(piece) => piece,
            Err(InvalidSearchError::NotHere { furniture, .. }) => {
                return match self.board().furniture(furniture) {
                    Some(piece) => self.catalog.not_here(piece),
                    None => self.catalog.invalid(),
                };
            }
            Err(InvalidSearchError::UnknownFurniture(_)) => return self.catalog.invalid(),
        };
        let intro = self.catalog.searching(piece);

        let outcome = match self.mansion.note(furniture) {
            None => self.catalog.clue_none(),
            Some(_) if tracker.state().spent_notes.contains(&furniture) => {
                self.catalog.clue_none()
            }
            Some(note) => {
                let asks = note.asks();
                match asks.first().cloned() {
                    Some(first) => {
                        tracker.set_pending(Pending::Asks {
                            furniture,
                            remaining: asks,
                        });
                        self.catalog.ask(&first)
                    }
                    None => self.reveal(tracker, furniture, note),
                }
            }
        };
        intro.then(outcome)
    }

    fn answer(&self, tracker: &mut Tracker<'_>, yes: bool) -> Cue {
        match tracker.clear_pending() {
            None => self.catalog.nothing_pending(),
            Some(_) if !yes => self.catalog.sorry(),
            Some(Pending::Key { room }) => {
                tracker.unlock(room);
                self.enter(tracker, room)
            }
            Some(Pending::Asks {
                furniture,
                mut remaining,
            }) => {
                if !remaining.is_empty() {
                    remaining.remove(0);
                }
                if let Some(next) = remaining.first().cloned() {
                    tracker.set_pending(Pending::Asks {
                        furniture,
                        remaining,
                    });
                    return self.catalog.ask(&next);
                }
                match self.mansion.note(furniture) {
                    Some(note) => self.reveal(tracker, furniture, note),
                    None => self.catalog.clue_none(),
                }
            }
        }
    }

    /// Read out a note whose questions, if any, were all answered.
    fn reveal(&self, tracker: &mut Tracker<'_>, furniture: FurnitureId, note: &Note) -> Cue {
        if let Some(clue) = note.clue(furniture) {
            if !note.is_clue_card() {
                tracker.reveal(clue);
            }
        }
        match note {
            Note::ClueCard { .. } => match tracker.take_clue_card(furniture) {
                CardOutcome::Found => self.catalog.clue_found(),
                CardOutcome::TakeFromPlayer => self.catalog.clue_take(),
            },
            Note::Trapdoor => {
                tracker.fall_to_start();
                self.catalog.trapdoor()
            }
            Note::Secret { hint, .. } => self.catalog.secret(self.board(), *hint),
            Note::Hint(hint) => self.catalog.hint(self.board(), *hint),
            Note::Money { .. } => self.catalog.win(),
        }
    }
}
