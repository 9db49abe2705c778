//! Parsing one console line into a [`PlayerAction`].

use crate::board::{Board, FurnitureId, RoomId};
use crate::sequencer::PlayerAction;
use thiserror::Error;

/// A line that is not an action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UnrecognizedInput {
    #[error("Nothing entered")]
    Empty,
    #[error("{0} is neither a room nor a furniture number")]
    BadNumber(String),
}

/// Parse a line typed at the prompt.
///
/// Two digits walk into a room, three digits search furniture, and room
/// names (optionally after `go`) walk too. Anything else that is not a
/// command is looked up as a furniture name.
pub fn parse_action(line: &str, board: &Board) -> Result<PlayerAction, UnrecognizedInput> {
    let line = line.trim();
    if line.is_empty() {
        return Err(UnrecognizedInput::Empty);
    }

    if line.chars().all(|c| c.is_ascii_digit()) {
        return match line.len() {
            2 => line
                .parse()
                .map(|code| PlayerAction::Move(RoomId(code)))
                .map_err(|_| UnrecognizedInput::BadNumber(line.to_string())),
            3 => line
                .parse()
                .map(|code| PlayerAction::Search(FurnitureId(code)))
                .map_err(|_| UnrecognizedInput::BadNumber(line.to_string())),
            _ => Err(UnrecognizedInput::BadNumber(line.to_string())),
        };
    }

    let lower = line.to_lowercase();
    let action = match lower.as_str() {
        "y" | "yes" => PlayerAction::Answer(true),
        "n" | "no" => PlayerAction::Answer(false),
        "r" | "repeat" => PlayerAction::Repeat,
        "q" | "quit" | "exit" => PlayerAction::Quit,
        "look" | "l" => PlayerAction::Look,
        "help" | "?" | "h" => PlayerAction::Help,
        _ => {
            let target = lower.strip_prefix("go ").unwrap_or(&lower);
            match board.room_named(target) {
                Some(room) => PlayerAction::Move(room.id),
                None => PlayerAction::Lookup(line.to_string()),
            }
        }
    };
    Ok(action)
}
