//! Static game content.
//!
//! Room names, doors, furniture, the cards in the box and every spoken
//! phrase live in `data/mansion.json`, embedded at compile time. Phrases may
//! contain `{name}` placeholders in both their text and their clip names.

use crate::board::{BoardError, Furniture, FurnitureId, RoomId};
use crate::layout::NOTES_PER_GAME;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

const BUILTIN: &str = include_str!("../data/mansion.json");

/// Most furniture a single room can hold.
pub const ROOM_CAPACITY: usize = 4;

/// Errors from loading or validating content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid board: {0}")]
    Board(#[from] BoardError),

    #[error("Content has no {0}")]
    Empty(&'static str),

    #[error("Room {room} has {count} pieces of home furniture, at most 4 fit")]
    OverfullRoom { room: RoomId, count: usize },

    #[error("{found} pieces of furniture cannot hold {needed} notes")]
    TooFewFurniture { needed: usize, found: usize },

    #[error("{furniture} pieces of furniture do not fit in {rooms} rooms")]
    TooMuchFurniture { furniture: usize, rooms: usize },
}

/// A room as written in the content file.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomDef {
    pub code: u8,
    pub name: String,
    pub doors: Vec<u8>,
    /// Furniture that always stands in this room.
    #[serde(default)]
    pub furniture: Vec<u16>,
    #[serde(default)]
    pub entry_clue: Option<String>,
}

/// A piece of furniture as written in the content file.
#[derive(Debug, Clone, Deserialize)]
pub struct FurnitureDef {
    pub code: u16,
    pub name: String,
}

impl From<&FurnitureDef> for Furniture {
    fn from(def: &FurnitureDef) -> Self {
        Furniture::new(def.code, def.name.clone())
    }
}

/// A spoken phrase: lines of text and the clips that voice them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Phrase {
    pub text: Vec<String>,
    #[serde(default)]
    pub clips: Vec<String>,
}

impl Phrase {
    /// Substitute `{key}` placeholders in text and clip names.
    pub fn render(&self, vars: &[(&str, &str)]) -> Phrase {
        let fill = |s: &String| {
            vars.iter()
                .fold(s.clone(), |acc, (key, value)| {
                    acc.replace(&format!("{{{key}}}"), value)
                })
        };
        Phrase {
            text: self.text.iter().map(fill).collect(),
            clips: self.clips.iter().map(fill).collect(),
        }
    }
}

/// Every phrase the companion can say.
#[derive(Debug, Clone, Deserialize)]
pub struct Phrases {
    pub welcome: Phrase,
    pub room: Phrase,
    pub no_such_move: Phrase,
    pub room_locked: Phrase,
    pub sorry: Phrase,
    pub clue_none: Phrase,
    pub trapdoor: Phrase,
    pub ask_item: Phrase,
    pub ask_person: Phrase,
    pub clue_found: Phrase,
    pub clue_take: Phrase,
    pub secret: Phrase,
    pub hint_not_in: Phrase,
    pub hint_look: Phrase,
    pub win: Phrase,
    pub not_here: Phrase,
    pub invalid: Phrase,
    pub matches: Phrase,
    pub no_match: Phrase,
    pub nothing_pending: Phrase,
    pub goodbye: Phrase,
    pub help: Phrase,
}

/// The complete content of the game box.
#[derive(Debug, Clone, Deserialize)]
pub struct MansionContent {
    pub start: u8,
    pub rooms: Vec<RoomDef>,
    pub furniture: Vec<FurnitureDef>,
    pub items: Vec<String>,
    pub people: Vec<String>,
    pub phrases: Phrases,
}

impl MansionContent {
    /// The content shipped with the game.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN)
    }

    /// Parse and validate content from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: MansionContent = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    pub fn room(&self, code: RoomId) -> Option<&RoomDef> {
        self.rooms.iter().find(|r| r.code == code.0)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.items.is_empty() {
            return Err(ContentError::Empty("items"));
        }
        if self.people.is_empty() {
            return Err(ContentError::Empty("people"));
        }

        let mut rooms = BTreeSet::new();
        for room in &self.rooms {
            if !rooms.insert(room.code) {
                return Err(BoardError::DuplicateRoom(RoomId(room.code)).into());
            }
            if room.furniture.len() > ROOM_CAPACITY {
                return Err(ContentError::OverfullRoom {
                    room: RoomId(room.code),
                    count: room.furniture.len(),
                });
            }
        }
        if !rooms.contains(&self.start) {
            return Err(BoardError::UnknownRoom(RoomId(self.start)).into());
        }
        for room in &self.rooms {
            if let Some(door) = room.doors.iter().find(|d| !rooms.contains(d)) {
                return Err(BoardError::UnknownRoom(RoomId(*door)).into());
            }
        }

        let mut catalog = BTreeSet::new();
        for piece in &self.furniture {
            if !catalog.insert(piece.code) {
                return Err(BoardError::DuplicateFurniture(FurnitureId(piece.code)).into());
            }
        }
        let mut homed = BTreeSet::new();
        for room in &self.rooms {
            for piece in &room.furniture {
                if !catalog.contains(piece) {
                    return Err(BoardError::UnknownFurniture(FurnitureId(*piece)).into());
                }
                if !homed.insert(*piece) {
                    return Err(BoardError::DuplicateFurniture(FurnitureId(*piece)).into());
                }
            }
        }

        if self.furniture.len() < NOTES_PER_GAME {
            return Err(ContentError::TooFewFurniture {
                needed: NOTES_PER_GAME,
                found: self.furniture.len(),
            });
        }
        if self.furniture.len() > self.rooms.len() * ROOM_CAPACITY {
            return Err(ContentError::TooMuchFurniture {
                furniture: self.furniture.len(),
                rooms: self.rooms.len(),
            });
        }

        Ok(())
    }
}
