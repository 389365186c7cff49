//! Audio playback engine.
//!
//! Thin wrapper around a rodio output stream and sink. The engine is owned
//! by the runtime (the output stream is not `Send`) and mutated only through
//! effects; the reducer sees playback purely as [`AudioEvent`]s.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::source::Source;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::events::AudioEvent;

pub struct AudioEngine {
    // Kept alive for the duration of playback; dropping it silences the sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl AudioEngine {
    /// Opens the default audio output device.
    ///
    /// # Errors
    /// Returns an error when no output device is available.
    pub fn new() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }

    /// Decodes the downloaded bytes and starts playback from the beginning.
    ///
    /// Returns the track duration when the decoder knows it; streamed
    /// formats often report `None` until playback progresses.
    ///
    /// # Errors
    /// Returns an error when the bytes are not a playable audio format.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<Option<Duration>> {
        self.stop();

        let decoder =
            Decoder::new(Cursor::new(bytes)).context("Failed to decode narration audio")?;
        let duration = decoder.total_duration();

        let sink = Sink::try_new(&self.handle).context("Failed to create audio sink")?;
        sink.append(decoder);
        sink.play();
        self.sink = Some(sink);

        Ok(duration)
    }

    /// Pauses playback if playing, resumes it if paused.
    pub fn toggle(&self) {
        if let Some(sink) = &self.sink {
            if sink.is_paused() {
                sink.play();
            } else {
                sink.pause();
            }
        }
    }

    /// Seeks relative to the current position, clamped at the start.
    pub fn seek_by(&self, seconds: i64) {
        let Some(sink) = &self.sink else {
            return;
        };
        let position = sink.get_pos();
        let target = if seconds >= 0 {
            position.saturating_add(Duration::from_secs(seconds.unsigned_abs()))
        } else {
            position.saturating_sub(Duration::from_secs(seconds.unsigned_abs()))
        };
        // Not every decoder supports seeking; a failed seek leaves playback
        // where it was.
        if let Err(error) = sink.try_seek(target) {
            tracing::debug!(%error, "audio seek failed");
        }
    }

    /// Seeks to an absolute position.
    pub fn seek_to(&self, position: Duration) {
        if let Some(sink) = &self.sink
            && let Err(error) = sink.try_seek(position)
        {
            tracing::debug!(%error, "audio seek failed");
        }
    }

    /// Stops playback and drops the loaded track.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Samples playback state, reporting progress or the end of the track.
    ///
    /// Returns `None` when nothing is loaded.
    pub fn poll(&mut self) -> Option<AudioEvent> {
        let sink = self.sink.as_ref()?;
        if sink.empty() {
            self.sink = None;
            return Some(AudioEvent::Finished);
        }
        Some(AudioEvent::Progress {
            position: sink.get_pos(),
            playing: !sink.is_paused(),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.sink.is_some()
    }
}
