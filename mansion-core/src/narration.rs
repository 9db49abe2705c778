//! Presenting cues: printed text, and clips when audio is available.
//!
//! A presenter is chosen once at startup by [`select_presenter`]. The audio
//! presenter always prints first, so losing the sound device mid-game costs
//! nothing but the sound.

use crate::config::GameConfig;
use crate::cue::{Clip, Cue};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("Audio backend unavailable: {0}")]
    AudioBackendUnavailable(String),

    #[error("Missing audio clip: {}", .0.display())]
    MissingClip(PathBuf),

    #[error("Could not play {clip}: {reason}")]
    Playback { clip: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Something that can put a cue in front of the players.
pub trait NarrationPresenter {
    fn present(&mut self, cue: &Cue) -> Result<(), NarrationError>;

    /// Whether clips are currently being played.
    fn has_audio(&self) -> bool {
        false
    }
}

/// Something that can play a single clip, blocking until it ends.
pub trait AudioSink {
    fn play(&mut self, clip: &Clip) -> Result<(), NarrationError>;
}

/// Prints cue text, one line per line.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NarrationPresenter for TextPresenter<W> {
    fn present(&mut self, cue: &Cue) -> Result<(), NarrationError> {
        for line in &cue.lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Prints cue text, then plays its clips.
pub struct AudioPresenter<W: Write> {
    text: TextPresenter<W>,
    sink: Option<Box<dyn AudioSink>>,
}

impl<W: Write> AudioPresenter<W> {
    pub fn new(out: W, sink: Box<dyn AudioSink>) -> Self {
        Self {
            text: TextPresenter::new(out),
            sink: Some(sink),
        }
    }
}

impl<W: Write> NarrationPresenter for AudioPresenter<W> {
    fn present(&mut self, cue: &Cue) -> Result<(), NarrationError> {
        self.text.present(cue)?;

        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        let mut lost = false;
        for clip in &cue.clips {
            match sink.play(clip) {
                Ok(()) => {}
                Err(NarrationError::AudioBackendUnavailable(reason)) => {
                    warn!("Audio stopped working ({reason}), continuing with text only");
                    lost = true;
                    break;
                }
                Err(e) => warn!("Skipping clip {clip:?}: {e}"),
            }
        }
        if lost {
            self.sink = None;
        }
        Ok(())
    }

    fn has_audio(&self) -> bool {
        self.sink.is_some()
    }
}

/// Pick the presenter for this session.
pub fn select_presenter<W: Write + 'static>(
    config: &GameConfig,
    out: W,
) -> Box<dyn NarrationPresenter> {
    select_presenter_with(config, out, open_sink)
}

/// Like [`select_presenter`], with the audio backend supplied by `open`.
pub fn select_presenter_with<W, F>(config: &GameConfig, out: W, open: F) -> Box<dyn NarrationPresenter>
where
    W: Write + 'static,
    F: FnOnce(&GameConfig) -> Result<Box<dyn AudioSink>, NarrationError>,
{
    if !config.audio {
        info!("Audio disabled, text only");
        return Box::new(TextPresenter::new(out));
    }
    match open(config) {
        Ok(sink) => {
            info!("Playing clips from {}", config.audio_dir.display());
            Box::new(AudioPresenter::new(out, sink))
        }
        Err(e) => {
            warn!("{e}, continuing with text only");
            Box::new(TextPresenter::new(out))
        }
    }
}

#[cfg(feature = "audio")]
fn open_sink(config: &GameConfig) -> Result<Box<dyn AudioSink>, NarrationError> {
    let sink = crate::audio::RodioSink::open(&config.audio_dir)?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "audio"))]
fn open_sink(_config: &GameConfig) -> Result<Box<dyn AudioSink>, NarrationError> {
    Err(NarrationError::AudioBackendUnavailable(
        "built without the audio feature".to_string(),
    ))
}
