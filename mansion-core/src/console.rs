//! The console control loop: read a line, play it, present the cue.

use crate::input::{parse_action, UnrecognizedInput};
use crate::layout::{random_game_number, MAX_GAME_NUMBER};
use crate::sequencer::{CueResult, PlayerAction};
use crate::session::GameSession;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const PROMPT: &str = "Enter a room or furniture number, or a furniture name to look up: ";
const ANSWER_PROMPT: &str = "y/n: ";
const HOLD_PROMPT: &str = "Press Enter to view.";

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved { moves: u32 },
    Quit,
}

/// Console options that do not affect the game itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOptions {
    pub clear_screen: bool,
}

/// Play `session` until it is solved, the player quits, or input ends.
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut out: W,
    options: ConsoleOptions,
) -> Result<Outcome, ConsoleError> {
    if options.clear_screen {
        clear(&mut out)?;
    }
    session.start();

    let mut lines = input.lines();
    loop {
        let prompt = if session.state().pending.is_some() {
            ANSWER_PROMPT
        } else {
            PROMPT
        };
        write!(out, "{prompt}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            session.act(PlayerAction::Quit);
            return Ok(Outcome::Quit);
        };
        let line = line?;

        let action = match parse_action(&line, session.board()) {
            Ok(action) => action,
            Err(UnrecognizedInput::Empty) => continue,
            Err(e) => {
                session.reject(&e);
                continue;
            }
        };

        if options.clear_screen {
            clear(&mut out)?;
        }
        match session.act(action) {
            CueResult::Continue(cue) => {
                if cue.held.is_some() {
                    write!(out, "{HOLD_PROMPT}")?;
                    out.flush()?;
                    if let Some(line) = lines.next() {
                        line?;
                    }
                    writeln!(out)?;
                    session.reveal_held(&cue);
                }
            }
            CueResult::Solved(_) => {
                let moves = session.state().moves;
                info!("Game {} solved in {moves} moves", session.game_number());
                return Ok(Outcome::Solved { moves });
            }
            CueResult::Quit(_) => {
                info!("Game {} abandoned after {} turns", session.game_number(), session.turns());
                return Ok(Outcome::Quit);
            }
        }
    }
}

/// Ask for a game number to replay, or start a new one on an empty line.
pub fn ask_game_number<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<u32, ConsoleError> {
    writeln!(out, "Welcome to Mystery Mansion!")?;
    write!(out, "Press Enter to start a new game, or enter a game number to continue: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(random_game_number());
    }
    match line.parse::<u32>() {
        Ok(n) if (1..=MAX_GAME_NUMBER).contains(&n) => Ok(n),
        _ => {
            writeln!(out, "Invalid value entered. Starting a new game.")?;
            Ok(random_game_number())
        }
    }
}

fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()
}
