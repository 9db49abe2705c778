//! Board topology: rooms, doors, furniture and the resolution condition.
//!
//! A [`Board`] is immutable once built. The mansion layout generator builds
//! one per game; tests build small ones by hand with [`BoardBuilder`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

// ============================================================================
// ID Types
// ============================================================================

/// Two-digit room code printed on the room tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u8);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Three-digit furniture code printed on the furniture card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FurnitureId(pub u16);

impl fmt::Display for FurnitureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}", self.0)
    }
}

/// A piece of mystery-solving information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClueId {
    /// Noticed on entering a room.
    Room(RoomId),
    /// A clue card handed out from a piece of furniture.
    Card(FurnitureId),
    /// A hint note read from a piece of furniture.
    Hint(FurnitureId),
    /// A secret message read from a piece of furniture.
    Secret(FurnitureId),
    /// The hidden money itself.
    Money,
}

// ============================================================================
// Rooms and Furniture
// ============================================================================

/// A room on the board.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub doors: BTreeSet<RoomId>,
    pub furniture: Vec<FurnitureId>,
    /// Text noticed the first time the room is entered.
    pub entry_clue: Option<String>,
    pub locked: bool,
}

impl Room {
    pub fn new(code: u8, name: impl Into<String>) -> Self {
        Self {
            id: RoomId(code),
            name: name.into(),
            doors: BTreeSet::new(),
            furniture: Vec::new(),
            entry_clue: None,
            locked: false,
        }
    }

    pub fn with_entry_clue(mut self, text: impl Into<String>) -> Self {
        self.entry_clue = Some(text.into());
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn has_door_to(&self, other: RoomId) -> bool {
        self.doors.contains(&other)
    }

    pub fn contains_furniture(&self, furniture: FurnitureId) -> bool {
        self.furniture.contains(&furniture)
    }

    /// Name of the narration clip for this room.
    pub fn clip(&self) -> String {
        format!("rooms/{}", self.name.to_lowercase())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.name)
    }
}

/// A piece of furniture that can be searched.
#[derive(Debug, Clone)]
pub struct Furniture {
    pub id: FurnitureId,
    pub name: String,
}

impl Furniture {
    pub fn new(code: u16, name: impl Into<String>) -> Self {
        Self {
            id: FurnitureId(code),
            name: name.into(),
        }
    }

    /// Name without the numbering suffix duplicates carry ("Sofa", "Black Armchair").
    pub fn spoken_name(&self) -> &str {
        match self.name.find('#') {
            Some(idx) => self.name[..idx].trim_end(),
            None => &self.name,
        }
    }

    /// Name of the narration clip for this piece.
    pub fn clip(&self) -> String {
        format!("furniture/{}", self.spoken_name().to_lowercase())
    }
}

impl fmt::Display for Furniture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.name)
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// The room/clue combination that marks the mystery solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub room: RoomId,
    pub clues: BTreeSet<ClueId>,
}

impl Resolution {
    pub fn new(room: RoomId, clues: impl IntoIterator<Item = ClueId>) -> Self {
        Self {
            room,
            clues: clues.into_iter().collect(),
        }
    }

    pub fn is_met(&self, room: RoomId, revealed: &BTreeSet<ClueId>) -> bool {
        room == self.room && self.clues.is_subset(revealed)
    }
}

// ============================================================================
// Board
// ============================================================================

/// Errors from assembling a board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Room {0} is defined twice")]
    DuplicateRoom(RoomId),
    #[error("Furniture {0} is defined twice")]
    DuplicateFurniture(FurnitureId),
    #[error("Unknown room: {0}")]
    UnknownRoom(RoomId),
    #[error("Unknown furniture: {0}")]
    UnknownFurniture(FurnitureId),
    #[error("Furniture {furniture} is placed in both room {first} and room {second}")]
    FurnitureInTwoRooms {
        furniture: FurnitureId,
        first: RoomId,
        second: RoomId,
    },
    #[error("No start room specified")]
    MissingStart,
    #[error("No resolution specified")]
    MissingResolution,
    #[error("The start room {0} cannot be locked")]
    LockedStart(RoomId),
}

/// The fixed topology the player moves through.
#[derive(Debug, Clone)]
pub struct Board {
    rooms: BTreeMap<RoomId, Room>,
    furniture: BTreeMap<FurnitureId, Furniture>,
    start: RoomId,
    resolution: Resolution,
}

impl Board {
    pub fn builder() -> BoardBuilder {
        BoardBuilder::default()
    }

    pub fn start(&self) -> RoomId {
        self.start
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn contains(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }

    pub fn room(&self, room: RoomId) -> Option<&Room> {
        self.rooms.get(&room)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Find a room by name, ignoring case and surrounding whitespace.
    pub fn room_named(&self, name: &str) -> Option<&Room> {
        let name = name.trim();
        self.rooms
            .values()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn is_adjacent(&self, from: RoomId, to: RoomId) -> bool {
        self.rooms
            .get(&from)
            .map(|r| r.has_door_to(to))
            .unwrap_or(false)
    }

    pub fn furniture(&self, furniture: FurnitureId) -> Option<&Furniture> {
        self.furniture.get(&furniture)
    }

    pub fn all_furniture(&self) -> impl Iterator<Item = &Furniture> {
        self.furniture.values()
    }

    /// The room a piece of furniture stands in.
    pub fn room_of(&self, furniture: FurnitureId) -> Option<&Room> {
        self.rooms
            .values()
            .find(|r| r.contains_furniture(furniture))
    }

    /// Furniture whose name contains `query`, ignoring case.
    pub fn search_furniture(&self, query: &str) -> Vec<&Furniture> {
        let query = query.trim().to_lowercase();
        self.furniture
            .values()
            .filter(|f| f.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Rooms reachable from the start room through doors, ignoring locks.
    pub fn reachable(&self) -> BTreeSet<RoomId> {
        let mut seen = BTreeSet::from([self.start]);
        let mut frontier = vec![self.start];
        while let Some(id) = frontier.pop() {
            if let Some(room) = self.rooms.get(&id) {
                for door in &room.doors {
                    if seen.insert(*door) {
                        frontier.push(*door);
                    }
                }
            }
        }
        seen
    }
}

/// Builder for [`Board`]. Doors are made symmetric on build.
#[derive(Debug, Clone, Default)]
pub struct BoardBuilder {
    rooms: Vec<Room>,
    furniture: Vec<Furniture>,
    doors: Vec<(RoomId, RoomId)>,
    placements: Vec<(FurnitureId, RoomId)>,
    start: Option<RoomId>,
    resolution: Option<Resolution>,
}

impl BoardBuilder {
    pub fn room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn door(mut self, a: u8, b: u8) -> Self {
        self.doors.push((RoomId(a), RoomId(b)));
        self
    }

    pub fn furniture(mut self, furniture: Furniture) -> Self {
        self.furniture.push(furniture);
        self
    }

    /// Put a piece of furniture in a room.
    pub fn place(mut self, furniture: u16, room: u8) -> Self {
        self.placements.push((FurnitureId(furniture), RoomId(room)));
        self
    }

    pub fn start(mut self, room: u8) -> Self {
        self.start = Some(RoomId(room));
        self
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn build(self) -> Result<Board, BoardError> {
        let mut rooms = BTreeMap::new();
        for room in self.rooms {
            let id = room.id;
            if rooms.insert(id, room).is_some() {
                return Err(BoardError::DuplicateRoom(id));
            }
        }

        let mut furniture = BTreeMap::new();
        for piece in self.furniture {
            let id = piece.id;
            if furniture.insert(id, piece).is_some() {
                return Err(BoardError::DuplicateFurniture(id));
            }
        }

        // Doors declared on the rooms themselves count too.
        let mut doors = self.doors;
        for room in rooms.values() {
            doors.extend(room.doors.iter().map(|d| (room.id, *d)));
        }
        for (a, b) in doors {
            if !rooms.contains_key(&b) {
                return Err(BoardError::UnknownRoom(b));
            }
            rooms
                .get_mut(&a)
                .ok_or(BoardError::UnknownRoom(a))?
                .doors
                .insert(b);
            if let Some(other) = rooms.get_mut(&b) {
                other.doors.insert(a);
            }
        }

        for (piece, room) in self.placements {
            rooms
                .get_mut(&room)
                .ok_or(BoardError::UnknownRoom(room))?
                .furniture
                .push(piece);
        }

        let mut placed: BTreeMap<FurnitureId, RoomId> = BTreeMap::new();
        for room in rooms.values() {
            for piece in &room.furniture {
                if !furniture.contains_key(piece) {
                    return Err(BoardError::UnknownFurniture(*piece));
                }
                if let Some(first) = placed.insert(*piece, room.id) {
                    return Err(BoardError::FurnitureInTwoRooms {
                        furniture: *piece,
                        first,
                        second: room.id,
                    });
                }
            }
        }

        let start = self.start.ok_or(BoardError::MissingStart)?;
        let start_room = rooms.get(&start).ok_or(BoardError::UnknownRoom(start))?;
        if start_room.locked {
            return Err(BoardError::LockedStart(start));
        }

        let resolution = self.resolution.ok_or(BoardError::MissingResolution)?;
        if !rooms.contains_key(&resolution.room) {
            return Err(BoardError::UnknownRoom(resolution.room));
        }

        Ok(Board {
            rooms,
            furniture,
            start,
            resolution,
        })
    }
}
