//! Mystery Mansion talking companion.
//!
//! Stands in for the electronic unit of the board game: enter room numbers
//! as you walk, furniture numbers as you search, and answer its questions.
//!
//! ```bash
//! cargo run -p mansion -- --game 2016 --no-audio
//! cargo run -p mansion --features audio -- --audio-dir game_audio
//! ```

mod cli;

use clap::Parser;
use mansion_core::console::{self, ConsoleOptions, Outcome};
use mansion_core::{select_presenter, GameSession, Mansion, MansionContent};
use std::io;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = cli::Args::parse();
    cli::setup_logging(args.debug)?;

    let content = MansionContent::builtin()?;
    let mut config = args.to_config();
    let game_number = match config.game_number {
        Some(n) => n,
        None => console::ask_game_number(io::stdin().lock(), io::stdout())?,
    };
    config = config.with_game_number(game_number);
    log::info!("Starting game {game_number} with {config:?}");

    let mansion = Mansion::generate(&content, game_number)?;
    let presenter = select_presenter(&config, io::stdout());
    let mut session = GameSession::new(mansion, &content, presenter);

    let options = ConsoleOptions {
        clear_screen: config.clear_screen,
    };
    match console::run(&mut session, io::stdin().lock(), io::stdout(), options)? {
        Outcome::Solved { moves } => {
            log::info!("Game {game_number} won after {moves} moves");
        }
        Outcome::Quit => log::info!("Game {game_number} ended early"),
    }
    Ok(())
}
