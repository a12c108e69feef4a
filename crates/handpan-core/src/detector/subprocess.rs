use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use image::RgbImage;
use tracing::{debug, info};

use super::record::FrameRecord;
use super::HandDetector;
use crate::config::DetectorConfig;
use crate::consts::DETECTOR_READY_SIGNAL;
use crate::error::{HandpanError, Result};
use crate::gesture::HandObservation;

const RGB_CHANNELS: u32 = 3;

/// Landmark detector running as a child process.
///
/// Protocol: the child prints `READY` once its model is loaded. For every frame it reads a
/// header of three little-endian `u32` (width, height, channels) followed by the raw RGB
/// bytes, and answers with one JSON line shaped like [`FrameRecord`].
pub struct SubprocessDetector {
    child: Child,
    stdin: ChildStdin,
    lines: mpsc::Receiver<std::io::Result<String>>,
    confidence: f32,
    frame_timeout: Duration,
    /// Responses still in flight for frames that already timed out.
    stale_responses: usize,
}

impl SubprocessDetector {
    pub fn spawn(config: &DetectorConfig) -> Result<Self> {
        info!(program = %config.program, args = ?config.args, "starting hand detector");

        let mut child = Command::new(&config.program)
            .args(&config.args)
            .arg("--confidence")
            .arg(config.confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| HandpanError::Detector("detector stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HandpanError::Detector("detector stdout unavailable".into()))?;

        // Reads block, so they happen on their own thread and arrive here with a deadline.
        let (tx, lines) = mpsc::channel();
        std::thread::Builder::new()
            .name("handpan-detector-reader".into())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })?;

        let detector = Self {
            child,
            stdin,
            lines,
            confidence: config.confidence,
            frame_timeout: Duration::from_millis(config.frame_timeout_ms),
            stale_responses: 0,
        };

        let ready = detector.read_line(Duration::from_millis(config.startup_timeout_ms))?;
        if ready.trim() != DETECTOR_READY_SIGNAL {
            return Err(HandpanError::Detector(format!(
                "detector did not signal ready, got {:?}",
                ready.trim()
            )));
        }

        info!("hand detector ready");
        Ok(detector)
    }

    fn read_line(&self, timeout: Duration) -> Result<String> {
        match self.lines.recv_timeout(timeout) {
            Ok(line) => Ok(line?),
            Err(RecvTimeoutError::Timeout) => Err(HandpanError::DetectorTimeout {
                millis: timeout.as_millis() as u64,
            }),
            Err(RecvTimeoutError::Disconnected) => {
                Err(HandpanError::Detector("detector process exited".into()))
            }
        }
    }

    fn send_frame(&mut self, frame: &RgbImage) -> Result<()> {
        let (width, height) = frame.dimensions();
        self.stdin.write_all(&width.to_le_bytes())?;
        self.stdin.write_all(&height.to_le_bytes())?;
        self.stdin.write_all(&RGB_CHANNELS.to_le_bytes())?;
        self.stdin.write_all(frame.as_raw())?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Throw away late answers to frames that were already given up on.
    fn drain_stale(&mut self) -> Result<()> {
        while self.stale_responses > 0 {
            self.read_line(self.frame_timeout)?;
            self.stale_responses -= 1;
            debug!(remaining = self.stale_responses, "dropped late detector response");
        }
        Ok(())
    }
}

impl HandDetector for SubprocessDetector {
    fn name(&self) -> String {
        "Landmark detector process".into()
    }

    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<HandObservation>> {
        self.drain_stale()?;
        self.send_frame(frame)?;

        let line = match self.read_line(self.frame_timeout) {
            Ok(line) => line,
            Err(e @ HandpanError::DetectorTimeout { .. }) => {
                self.stale_responses += 1;
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let record: FrameRecord = serde_json::from_str(&line)?;
        record.into_observations(self.confidence)
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
