//! Mansion layout generation.
//!
//! Every game is reproducible from its game number: the number seeds the RNG
//! that furnishes the rooms, locks doors and hides the notes.

use crate::board::{Board, BoardError, ClueId, Furniture, FurnitureId, Resolution, Room, RoomId};
use crate::content::{MansionContent, ROOM_CAPACITY};
use crate::notes::{Ask, Hint, Note};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

const CLUE_CARDS: usize = 11;
const SECRETS: usize = 2;
const NOT_IN_HINTS: usize = 6;
const LOOK_IN_HINTS: usize = 4;

/// Notes hidden in every game: money, clue cards, trapdoor, secrets, the
/// doubly guarded clue card and the hints.
pub const NOTES_PER_GAME: usize = 1 + CLUE_CARDS + 1 + SECRETS + 1 + NOT_IN_HINTS + LOOK_IN_HINTS;

/// Highest game number handed out for a new game.
pub const MAX_GAME_NUMBER: u32 = 9999;

/// Pick a game number for a new game.
pub fn random_game_number() -> u32 {
    rand::thread_rng().gen_range(1..=MAX_GAME_NUMBER)
}

/// One generated mansion: the board plus what its furniture hides.
#[derive(Debug, Clone)]
pub struct Mansion {
    game_number: u32,
    board: Board,
    notes: BTreeMap<FurnitureId, Note>,
}

impl Mansion {
    /// Generate the mansion for `game_number`.
    pub fn generate(content: &MansionContent, game_number: u32) -> Result<Self, BoardError> {
        let mut rng = StdRng::seed_from_u64(u64::from(game_number));

        let mut rooms: Vec<Room> = content
            .rooms
            .iter()
            .map(|def| {
                let mut room = Room::new(def.code, def.name.clone());
                room.doors = def.doors.iter().map(|d| RoomId(*d)).collect();
                room.furniture = def.furniture.iter().map(|f| FurnitureId(*f)).collect();
                room.entry_clue = def.entry_clue.clone();
                room
            })
            .collect();

        furnish(&mut rooms, content, &mut rng);
        lock(&mut rooms, RoomId(content.start), &mut rng);

        let placed: BTreeMap<FurnitureId, RoomId> = rooms
            .iter()
            .flat_map(|r| r.furniture.iter().map(move |f| (*f, r.id)))
            .collect();
        let (notes, money_room) = hide_notes(&placed, content, &mut rng);

        let mut builder = Board::builder()
            .start(content.start)
            .resolution(Resolution::new(money_room, [ClueId::Money]));
        for def in &content.furniture {
            builder = builder.furniture(Furniture::from(def));
        }
        for room in rooms {
            builder = builder.room(room);
        }
        let board = builder.build()?;

        log::debug!(
            "Generated mansion {game_number}: money in room {money_room}, locked {:?}",
            board.rooms().filter(|r| r.locked).map(|r| r.id).collect::<Vec<_>>()
        );

        Ok(Self {
            game_number,
            board,
            notes,
        })
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn note(&self, furniture: FurnitureId) -> Option<&Note> {
        self.notes.get(&furniture)
    }

    pub fn notes(&self) -> impl Iterator<Item = (&FurnitureId, &Note)> {
        self.notes.iter()
    }

    /// Where the money is hidden.
    pub fn money(&self) -> Option<FurnitureId> {
        self.notes
            .iter()
            .find(|(_, note)| matches!(note, Note::Money { .. }))
            .map(|(id, _)| *id)
    }

    /// Build a mansion from a hand-made board and notes.
    pub fn from_parts(game_number: u32, board: Board, notes: BTreeMap<FurnitureId, Note>) -> Self {
        Self {
            game_number,
            board,
            notes,
        }
    }
}

/// Deal the furniture without a home room over the rooms, at most
/// [`ROOM_CAPACITY`] pieces each.
fn furnish(rooms: &mut [Room], content: &MansionContent, rng: &mut StdRng) {
    let homed: BTreeSet<FurnitureId> = rooms
        .iter()
        .flat_map(|r| r.furniture.iter().copied())
        .collect();
    let mut spare: Vec<FurnitureId> = content
        .furniture
        .iter()
        .map(|f| FurnitureId(f.code))
        .filter(|f| !homed.contains(f))
        .collect();
    spare.shuffle(rng);

    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.shuffle(rng);

    while !spare.is_empty() {
        let before = spare.len();
        for &i in &order {
            if rooms[i].furniture.len() < ROOM_CAPACITY {
                if let Some(piece) = spare.pop() {
                    rooms[i].furniture.push(piece);
                }
            }
        }
        if spare.len() == before {
            break;
        }
    }
}

/// Lock one or two rooms. The start room always stays open.
fn lock(rooms: &mut [Room], start: RoomId, rng: &mut StdRng) {
    let count = rng.gen_range(1..=2);
    let candidates: Vec<usize> = (0..rooms.len()).filter(|i| rooms[*i].id != start).collect();
    for i in candidates.choose_multiple(rng, count) {
        rooms[*i].locked = true;
    }
}

fn hide_notes(
    placed: &BTreeMap<FurnitureId, RoomId>,
    content: &MansionContent,
    rng: &mut StdRng,
) -> (BTreeMap<FurnitureId, Note>, RoomId) {
    let mut pool: Vec<FurnitureId> = placed.keys().copied().collect();
    pool.shuffle(rng);

    let mut notes = BTreeMap::new();
    let pick = |rng: &mut StdRng| -> String {
        content.items.choose(rng).cloned().unwrap_or_default()
    };
    let pick_person = |rng: &mut StdRng| -> String {
        content.people.choose(rng).cloned().unwrap_or_default()
    };

    // Content validation guarantees enough furniture for every pop below.
    let money = pool.pop().unwrap_or(FurnitureId(0));
    let money_room = placed.get(&money).copied().unwrap_or(RoomId(content.start));
    notes.insert(
        money,
        Note::Money {
            item: pick(rng),
            person: pick_person(rng),
        },
    );

    let other_furniture: Vec<FurnitureId> =
        placed.keys().copied().filter(|f| *f != money).collect();
    let other_rooms: Vec<RoomId> = content
        .rooms
        .iter()
        .map(|r| RoomId(r.code))
        .filter(|r| *r != money_room)
        .collect();

    let mut clue_furniture = Vec::with_capacity(CLUE_CARDS);
    for piece in pool.drain(pool.len().saturating_sub(CLUE_CARDS)..).rev() {
        notes.insert(piece, Note::ClueCard { asks: Vec::new() });
        clue_furniture.push(piece);
    }

    if let Some(piece) = pool.pop() {
        notes.insert(piece, Note::Trapdoor);
    }

    for _ in 0..SECRETS {
        let ask = if rng.gen_bool(0.5) {
            Ask::Item(pick(rng))
        } else {
            Ask::Person(pick_person(rng))
        };
        let room = other_rooms.choose(rng).copied().unwrap_or(money_room);
        if let Some(piece) = pool.pop() {
            notes.insert(
                piece,
                Note::Secret {
                    ask,
                    hint: Hint::NotInRoom(room),
                },
            );
        }
    }

    if let Some(piece) = pool.pop() {
        let asks = vec![Ask::Item(pick(rng)), Ask::Person(pick_person(rng))];
        notes.insert(piece, Note::ClueCard { asks });
    }

    for _ in 0..NOT_IN_HINTS {
        if let (Some(target), Some(piece)) = (other_furniture.choose(rng).copied(), pool.pop()) {
            notes.insert(piece, Note::Hint(Hint::NotInFurniture(target)));
        }
    }

    for _ in 0..LOOK_IN_HINTS {
        if let (Some(target), Some(piece)) = (clue_furniture.choose(rng).copied(), pool.pop()) {
            notes.insert(piece, Note::Hint(Hint::LookIn(target)));
        }
    }

    log::debug!("{} pieces of furniture hide nothing", pool.len());
    (notes, money_room)
}
