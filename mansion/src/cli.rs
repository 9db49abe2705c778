//! Command line arguments and logging setup.

use clap::Parser;
use mansion_core::GameConfig;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

const DEBUG_LOG: &str = "debug.log";

/// Talking companion for the Mystery Mansion board game.
#[derive(Debug, Parser)]
#[command(name = "mansion", version, about)]
pub struct Args {
    /// Replay the mansion with this game number instead of asking.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=9999))]
    pub game: Option<u32>,

    /// Play clips as well as printing text. Defaults to on when built with audio.
    #[arg(long, env = "MANSION_AUDIO", default_value_t = cfg!(feature = "audio"), action = clap::ArgAction::Set)]
    pub audio: bool,

    /// Text only. Overrides --audio.
    #[arg(long)]
    pub no_audio: bool,

    /// Directory holding the narration clips.
    #[arg(long, env = "MANSION_AUDIO_DIR", default_value = mansion_core::config::DEFAULT_AUDIO_DIR)]
    pub audio_dir: PathBuf,

    /// Keep the scrollback instead of clearing the screen every turn.
    #[arg(long)]
    pub no_clear: bool,

    /// Write a debug log to debug.log.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn to_config(&self) -> GameConfig {
        let mut config = GameConfig::new()
            .with_audio(self.audio && !self.no_audio)
            .with_audio_dir(&self.audio_dir)
            .with_clear_screen(!self.no_clear);
        if let Some(game) = self.game {
            config = config.with_game_number(game);
        }
        config
    }
}

/// Warnings go to stderr; `--debug` adds a full log file.
pub fn setup_logging(debug: bool) -> Result<(), Box<dyn Error>> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    if debug {
        loggers.push(WriteLogger::new(
            LevelFilter::Debug,
            ConfigBuilder::new()
                .set_target_level(LevelFilter::Error)
                .build(),
            File::create(DEBUG_LOG)?,
        ));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}
