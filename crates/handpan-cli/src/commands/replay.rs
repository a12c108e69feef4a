use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use handpan_core::camera::BlankFrameSource;
use handpan_core::detector::ReplayDetector;
use handpan_core::error::HandpanError;
use handpan_core::gesture::GestureClassifier;
use handpan_core::tracking::GestureLoop;
use indicatif::{ProgressBar, ProgressStyle};

use crate::summary::{format_command, print_session_summary, CommandTally};

#[derive(Args)]
pub struct ReplayArgs {
    /// Recorded session (JSON lines, one frame per line)
    pub recording: PathBuf,

    /// Apply the gestures to the images of this folder and report where the viewer ends up
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Override the pinch dead zone
    #[arg(long)]
    pub dead_zone: Option<i32>,

    /// Override the detection confidence threshold
    #[arg(long)]
    pub confidence: Option<f32>,

    /// Print every command as it is produced
    #[arg(long)]
    pub commands: bool,
}

pub fn run(args: &ReplayArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let confidence = args.confidence.unwrap_or(config.detector.confidence);
    let dead_zone = args.dead_zone.unwrap_or(config.gestures.zoom_dead_zone);

    let detector = ReplayDetector::open(&args.recording, confidence)
        .with_context(|| format!("Failed to read recording {}", args.recording.display()))?;
    let total = detector.len();
    let mut gestures = GestureLoop::new(
        Box::new(BlankFrameSource::new(config.camera.width, config.camera.height)),
        Box::new(detector),
        GestureClassifier::new(dead_zone),
    );

    let mut viewer = match args.folder {
        Some(ref folder) => Some(super::open_viewer(&config, folder)?),
        None => None,
    };

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Replaying");

    let mut tally = CommandTally::default();
    loop {
        let outcome = match gestures.step() {
            Ok(outcome) => outcome,
            Err(HandpanError::ReplayExhausted { .. }) => break,
            Err(e) => return Err(e.into()),
        };
        pb.set_position(gestures.frames());

        let Some(command) = outcome.command else {
            continue;
        };
        tally.add(&command);
        if args.commands {
            pb.println(format_command(gestures.frames(), &command));
        }
        if let Some(ref mut viewer) = viewer {
            super::apply_to_viewer(viewer, command);
        }
    }
    pb.finish_with_message("Done");

    print_session_summary(
        &args.recording.display().to_string(),
        gestures.frames(),
        &tally,
        viewer.as_ref(),
    );
    Ok(())
}
