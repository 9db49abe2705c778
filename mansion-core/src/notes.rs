//! What the furniture hides.

use crate::board::{ClueId, FurnitureId, RoomId};
use serde::{Deserialize, Serialize};

/// A question the companion asks before revealing a note.
///
/// Items and people are physical cards the players collect on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ask {
    /// "Do you have the Map?"
    Item(String),
    /// "Is the Butler with you?"
    Person(String),
}

impl Ask {
    pub fn name(&self) -> &str {
        match self {
            Ask::Item(name) | Ask::Person(name) => name,
        }
    }

    /// Items and people share one clip folder.
    pub fn clip(&self) -> String {
        format!("items/{}", self.name().to_lowercase())
    }
}

/// A hint the companion reads out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    NotInRoom(RoomId),
    NotInFurniture(FurnitureId),
    LookIn(FurnitureId),
}

/// The note hidden in a piece of furniture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    /// The money. Finding it wins the game.
    Money { item: String, person: String },
    /// A clue card, possibly guarded by questions.
    ClueCard { asks: Vec<Ask> },
    /// Sends the player back to the entrance.
    Trapdoor,
    /// A secret message guarded by one question.
    Secret { ask: Ask, hint: Hint },
    Hint(Hint),
}

impl Note {
    /// Questions that must all be answered "yes" before the note is revealed.
    pub fn asks(&self) -> Vec<Ask> {
        match self {
            Note::Money { item, person } => {
                vec![Ask::Item(item.clone()), Ask::Person(person.clone())]
            }
            Note::ClueCard { asks } => asks.clone(),
            Note::Secret { ask, .. } => vec![ask.clone()],
            Note::Trapdoor | Note::Hint(_) => Vec::new(),
        }
    }

    /// The clue revealed when this note is read in `furniture`.
    pub fn clue(&self, furniture: FurnitureId) -> Option<ClueId> {
        match self {
            Note::Money { .. } => Some(ClueId::Money),
            Note::ClueCard { .. } => Some(ClueId::Card(furniture)),
            Note::Secret { .. } => Some(ClueId::Secret(furniture)),
            Note::Hint(_) => Some(ClueId::Hint(furniture)),
            Note::Trapdoor => None,
        }
    }

    pub fn is_clue_card(&self) -> bool {
        matches!(self, Note::ClueCard { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_asks_item_then_person() {
        let note = Note::Money {
            item: "Map".to_string(),
            person: "Maid".to_string(),
        };
        assert_eq!(
            note.asks(),
            vec![Ask::Item("Map".to_string()), Ask::Person("Maid".to_string())]
        );
        assert_eq!(note.clue(FurnitureId(213)), Some(ClueId::Money));
    }

    #[test]
    fn test_trapdoor_reveals_nothing() {
        assert!(Note::Trapdoor.asks().is_empty());
        assert_eq!(Note::Trapdoor.clue(FurnitureId(111)), None);
    }

    #[test]
    fn test_ask_clip() {
        assert_eq!(Ask::Person("Chauffeur".to_string()).clip(), "items/chauffeur");
    }
}
