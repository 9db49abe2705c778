//! Cues: what the companion says and plays after each action.

use crate::board::{Board, Furniture, RoomId};
use crate::content::{Phrase, Phrases};
use crate::notes::{Ask, Hint};
use crate::state::{GameState, InvalidMoveError};

/// Pitch and length of the secret-message warning beeps.
const BEEP_HERTZ: u32 = 900;
const BEEP_MILLIS: u64 = 175;
const BEEP_GAP_MILLIS: u64 = 25;
const SECRET_BEEPS: usize = 3;

/// Identifies what a cue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueId {
    Welcome,
    Room(RoomId),
    NoSuchMove,
    Locked(RoomId),
    Sorry,
    NoClue,
    Trapdoor,
    Ask,
    ClueFound,
    ClueTake,
    Secret,
    Hint,
    Win,
    NotHere,
    Invalid,
    Lookup,
    NothingPending,
    Status,
    Help,
    Goodbye,
}

/// One piece of audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clip {
    /// A recorded clip, named relative to the audio directory without extension.
    Sound(String),
    Beep { hertz: u32, millis: u64 },
    Pause { millis: u64 },
}

/// A unit of narration: text lines and the audio that goes with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub id: CueId,
    pub room: Option<RoomId>,
    pub lines: Vec<String>,
    pub clips: Vec<Clip>,
    /// Held back until the player asks to see it.
    pub held: Option<Box<Cue>>,
}

impl Cue {
    pub fn new(id: CueId) -> Self {
        Self {
            id,
            room: None,
            lines: Vec::new(),
            clips: Vec::new(),
            held: None,
        }
    }

    fn from_phrase(id: CueId, phrase: &Phrase) -> Self {
        Self {
            id,
            room: None,
            lines: phrase.text.clone(),
            clips: phrase.clips.iter().cloned().map(Clip::Sound).collect(),
            held: None,
        }
    }

    pub fn in_room(mut self, room: RoomId) -> Self {
        self.room = Some(room);
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Play `self` first, then `next`. The result is identified as `next`.
    pub fn then(mut self, next: Cue) -> Cue {
        self.lines.extend(next.lines);
        self.clips.extend(next.clips);
        Cue {
            id: next.id,
            room: next.room.or(self.room),
            lines: self.lines,
            clips: self.clips,
            held: next.held,
        }
    }

    /// Keep `rest` back until the player asks for it.
    pub fn hold(mut self, rest: Cue) -> Self {
        self.held = Some(Box::new(rest));
        self
    }

    /// All of the cue's text, held part included.
    pub fn text(&self) -> String {
        match &self.held {
            Some(rest) => format!("{}\n{}", self.lines.join("\n"), rest.text()),
            None => self.lines.join("\n"),
        }
    }
}

/// Builds cues from the content's phrases and the board.
#[derive(Debug, Clone)]
pub struct CueCatalog {
    phrases: Phrases,
}

impl CueCatalog {
    pub fn new(phrases: Phrases) -> Self {
        Self { phrases }
    }

    pub fn welcome(&self, game_number: u32) -> Cue {
        let number = game_number.to_string();
        Cue::from_phrase(
            CueId::Welcome,
            &self.phrases.welcome.render(&[("number", &number)]),
        )
    }

    /// Entering a room: its name, its furniture, and its entry clue when
    /// `first_visit` reveals it.
    pub fn room(&self, board: &Board, room: RoomId, first_visit: bool) -> Cue {
        let Some(room) = board.room(room) else {
            return self.invalid();
        };
        let clip = room.clip();
        let phrase = self
            .phrases
            .room
            .render(&[("room", &room.name), ("room_clip", &clip)]);
        let mut cue = Cue::from_phrase(CueId::Room(room.id), &phrase).in_room(room.id);
        for piece in room.furniture.iter().filter_map(|f| board.furniture(*f)) {
            cue = cue
                .line(format!("- {piece}"))
                .clip(Clip::Sound(piece.clip()));
        }
        if first_visit {
            if let Some(clue) = &room.entry_clue {
                cue = cue.line(clue.clone());
            }
        }
        cue
    }

    pub fn no_such_move(&self, board: &Board, err: &InvalidMoveError) -> Cue {
        let name = |id: RoomId| {
            board
                .room(id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let detail = match err {
            InvalidMoveError::UnknownRoom(id) => format!("There is no room {id}."),
            InvalidMoveError::NotAdjacent { from, to } => {
                format!("The {} is not next to the {}.", name(*to), name(*from))
            }
            InvalidMoveError::AlreadyThere(id) => format!("You are already in the {}.", name(*id)),
            InvalidMoveError::Locked(id) => format!("The {} is locked.", name(*id)),
        };
        Cue::from_phrase(CueId::NoSuchMove, &self.phrases.no_such_move).line(detail)
    }

    pub fn locked(&self, room: RoomId) -> Cue {
        Cue::from_phrase(CueId::Locked(room), &self.phrases.room_locked).in_room(room)
    }

    pub fn sorry(&self) -> Cue {
        Cue::from_phrase(CueId::Sorry, &self.phrases.sorry)
    }

    pub fn clue_none(&self) -> Cue {
        Cue::from_phrase(CueId::NoClue, &self.phrases.clue_none)
    }

    pub fn trapdoor(&self) -> Cue {
        Cue::from_phrase(CueId::Trapdoor, &self.phrases.trapdoor)
    }

    pub fn clue_found(&self) -> Cue {
        Cue::from_phrase(CueId::ClueFound, &self.phrases.clue_found)
    }

    pub fn clue_take(&self) -> Cue {
        Cue::from_phrase(CueId::ClueTake, &self.phrases.clue_take)
    }

    pub fn win(&self) -> Cue {
        Cue::from_phrase(CueId::Win, &self.phrases.win)
    }

    pub fn invalid(&self) -> Cue {
        Cue::from_phrase(CueId::Invalid, &self.phrases.invalid)
    }

    pub fn nothing_pending(&self) -> Cue {
        Cue::from_phrase(CueId::NothingPending, &self.phrases.nothing_pending)
    }

    pub fn goodbye(&self) -> Cue {
        Cue::from_phrase(CueId::Goodbye, &self.phrases.goodbye)
    }

    pub fn help(&self) -> Cue {
        Cue::from_phrase(CueId::Help, &self.phrases.help)
    }

    pub fn ask(&self, ask: &Ask) -> Cue {
        let clip = ask.clip();
        let phrase = match ask {
            Ask::Item(item) => self
                .phrases
                .ask_item
                .render(&[("item", item), ("item_clip", &clip)]),
            Ask::Person(person) => self
                .phrases
                .ask_person
                .render(&[("person", person), ("person_clip", &clip)]),
        };
        Cue::from_phrase(CueId::Ask, &phrase)
    }

    /// The furniture being searched, announced before its note.
    pub fn searching(&self, furniture: &Furniture) -> Cue {
        Cue::new(CueId::NoClue)
            .line(furniture.to_string())
            .clip(Clip::Sound(furniture.clip()))
    }

    pub fn not_here(&self, furniture: &Furniture) -> Cue {
        let phrase = self
            .phrases
            .not_here
            .render(&[("furniture", furniture.spoken_name())]);
        Cue::from_phrase(CueId::NotHere, &phrase)
    }

    pub fn hint(&self, board: &Board, hint: Hint) -> Cue {
        let phrase = match hint {
            Hint::NotInRoom(room) => {
                let (place, clip) = board
                    .room(room)
                    .map(|r| (r.name.clone(), r.clip()))
                    .unwrap_or_default();
                self.phrases
                    .hint_not_in
                    .render(&[("place", &place), ("place_clip", &clip)])
            }
            Hint::NotInFurniture(furniture) => {
                let (place, clip) = board
                    .furniture(furniture)
                    .map(|f| (f.name.clone(), f.clip()))
                    .unwrap_or_default();
                self.phrases
                    .hint_not_in
                    .render(&[("place", &place), ("place_clip", &clip)])
            }
            Hint::LookIn(furniture) => {
                let (name, clip) = board
                    .furniture(furniture)
                    .map(|f| (f.name.clone(), f.clip()))
                    .unwrap_or_default();
                self.phrases
                    .hint_look
                    .render(&[("furniture", &name), ("furniture_clip", &clip)])
            }
        };
        Cue::from_phrase(CueId::Hint, &phrase)
    }

    /// Secret banner and three warning beeps. The hint itself is held until
    /// the player is ready to read it.
    pub fn secret(&self, board: &Board, hint: Hint) -> Cue {
        let mut cue = Cue::from_phrase(CueId::Secret, &self.phrases.secret);
        for _ in 0..SECRET_BEEPS {
            cue = cue
                .clip(Clip::Beep {
                    hertz: BEEP_HERTZ,
                    millis: BEEP_MILLIS,
                })
                .clip(Clip::Pause {
                    millis: BEEP_GAP_MILLIS,
                });
        }
        cue.hold(self.hint(board, hint))
    }

    pub fn lookup(&self, matches: &[&Furniture]) -> Cue {
        if matches.is_empty() {
            return Cue::from_phrase(CueId::Lookup, &self.phrases.no_match);
        }
        matches.iter().fold(
            Cue::from_phrase(CueId::Lookup, &self.phrases.matches),
            |cue, piece| cue.line(format!("- {piece}")),
        )
    }

    pub fn status(&self, board: &Board, state: &GameState, game_number: u32) -> Cue {
        let room = board
            .room(state.current_room)
            .map(|r| r.name.as_str())
            .unwrap_or("nowhere");
        let mut cue = Cue::new(CueId::Status)
            .in_room(state.current_room)
            .line(format!("You are in the {room} ({}).", state.current_room))
            .line(format!("Clue cards found: {}", state.clue_cards))
            .line(format!("Clues revealed: {}", state.revealed_clues.len()))
            .line(format!("Game number: {game_number}"));
        if !state.unlocked.is_empty() {
            let names: Vec<&str> = state
                .unlocked
                .iter()
                .filter_map(|id| board.room(*id))
                .map(|r| r.name.as_str())
                .collect();
            cue = cue.line(format!("Unlocked: {}", names.join(", ")));
        }
        cue
    }
}
