use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use image::RgbImage;
use tracing::info;

use super::record::FrameRecord;
use super::HandDetector;
use crate::error::{HandpanError, Result};
use crate::gesture::HandObservation;

/// Plays back a recorded session, one JSON line per frame, ignoring the frames it is given.
///
/// Blank lines and lines starting with `#` are skipped.
pub struct ReplayDetector {
    frames: Vec<FrameRecord>,
    cursor: usize,
    confidence: f32,
    looping: bool,
}

impl ReplayDetector {
    pub fn open(path: &Path, confidence: f32) -> Result<Self> {
        let file = File::open(path)?;
        let detector = Self::from_reader(BufReader::new(file), confidence)?;
        info!(path = %path.display(), frames = detector.len(), "loaded recording");
        Ok(detector)
    }

    pub fn from_reader(reader: impl BufRead, confidence: f32) -> Result<Self> {
        let mut frames = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let record = serde_json::from_str(trimmed).map_err(|e| {
                HandpanError::Detector(format!("recording line {}: {e}", number + 1))
            })?;
            frames.push(record);
        }
        Ok(Self::from_records(frames, confidence))
    }

    pub fn from_records(frames: Vec<FrameRecord>, confidence: f32) -> Self {
        Self {
            frames,
            cursor: 0,
            confidence,
            looping: false,
        }
    }

    /// Start over from the first frame instead of failing at the end.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }
}

impl HandDetector for ReplayDetector {
    fn name(&self) -> String {
        format!("Replay ({} frames)", self.frames.len())
    }

    fn detect(&mut self, _frame: &RgbImage) -> Result<Vec<HandObservation>> {
        if self.cursor >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return Err(HandpanError::ReplayExhausted {
                    frames: self.frames.len(),
                });
            }
            self.cursor = 0;
        }
        let record = self.frames[self.cursor].clone();
        self.cursor += 1;
        record.into_observations(self.confidence)
    }
}

/// Writes detector output as a recording that [`ReplayDetector`] can play back.
pub struct SessionRecorder<W: Write> {
    out: W,
    frames: usize,
}

impl SessionRecorder<File> {
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> SessionRecorder<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    pub fn record(&mut self, hands: &[HandObservation]) -> Result<()> {
        let line = serde_json::to_string(&FrameRecord::from_observations(hands))?;
        writeln!(self.out, "{line}")?;
        self.frames += 1;
        Ok(())
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
