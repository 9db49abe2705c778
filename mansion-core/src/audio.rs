//! Clip playback through rodio.

use crate::cue::Clip;
use crate::narration::{AudioSink, NarrationError};
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

const BEEP_VOLUME: f32 = 0.2;

/// Plays `<dir>/<clip>.wav` on the default output device.
pub struct RodioSink {
    // Dropping the stream silences the handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    dir: PathBuf,
}

impl RodioSink {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, NarrationError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| NarrationError::AudioBackendUnavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn clip_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.wav"))
    }

    fn sink(&self) -> Result<Sink, NarrationError> {
        Sink::try_new(&self.handle)
            .map_err(|e| NarrationError::AudioBackendUnavailable(e.to_string()))
    }
}

impl AudioSink for RodioSink {
    fn play(&mut self, clip: &Clip) -> Result<(), NarrationError> {
        match clip {
            Clip::Sound(name) => {
                let path = self.clip_path(name);
                let file = File::open(&path).map_err(|_| NarrationError::MissingClip(path))?;
                let source = Decoder::new(BufReader::new(file)).map_err(|e| {
                    NarrationError::Playback {
                        clip: name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                let sink = self.sink()?;
                sink.append(source);
                sink.sleep_until_end();
            }
            Clip::Beep { hertz, millis } => {
                let tone = SineWave::new(*hertz as f32)
                    .take_duration(Duration::from_millis(*millis))
                    .amplify(BEEP_VOLUME);
                let sink = self.sink()?;
                sink.append(tone);
                sink.sleep_until_end();
            }
            Clip::Pause { millis } => thread::sleep(Duration::from_millis(*millis)),
        }
        Ok(())
    }
}
