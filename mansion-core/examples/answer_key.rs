//! Print where everything is hidden in one mansion.
//!
//! ```bash
//! cargo run -p mansion-core --example answer_key -- 2016
//! ```

use mansion_core::{Mansion, MansionContent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let game_number = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => mansion_core::layout::random_game_number(),
    };
    let content = MansionContent::builtin()?;
    let mansion = Mansion::generate(&content, game_number)?;
    let board = mansion.board();

    println!("=== Game {game_number} ===\n");
    for room in board.rooms() {
        let lock = if room.locked { " [locked]" } else { "" };
        println!("{room}{lock}");
        for id in &room.furniture {
            let Some(piece) = board.furniture(*id) else {
                continue;
            };
            match mansion.note(*id) {
                Some(note) => println!("   {piece}  ->  {note:?}"),
                None => println!("   {piece}"),
            }
        }
    }
    println!("\nMoney: {:?}", mansion.money());
    Ok(())
}
