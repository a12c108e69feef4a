use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use handpan_core::detector::SessionRecorder;
use handpan_core::error::HandpanError;
use handpan_core::tracking::GestureLoop;
use tracing::info;

use crate::summary::{format_command, print_session_summary, CommandTally};

#[derive(Args)]
pub struct TrackArgs {
    /// Stop after this many frames (0 runs until interrupted)
    #[arg(long, default_value = "0")]
    pub frames: u64,

    /// Record detected hands to a JSON-lines file for later replay
    #[arg(long)]
    pub record: Option<PathBuf>,

    /// Camera index, overriding the config
    #[arg(long)]
    pub camera: Option<u32>,

    /// Apply the gestures to the images of this folder and report where the viewer ends up
    #[arg(long)]
    pub folder: Option<PathBuf>,
}

pub fn run(args: &TrackArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(index) = args.camera {
        config.camera.index = index;
    }

    let mut gestures = GestureLoop::from_config(&config).context("Failed to start gesture tracking")?;
    let mut recorder = match args.record {
        Some(ref path) => Some(
            SessionRecorder::create(path)
                .with_context(|| format!("Failed to create recording {}", path.display()))?,
        ),
        None => None,
    };
    let mut viewer = match args.folder {
        Some(ref folder) => Some(super::open_viewer(&config, folder)?),
        None => None,
    };

    println!("Tracking {}", gestures.describe());
    let mut tally = CommandTally::default();
    while args.frames == 0 || gestures.frames() < args.frames {
        let outcome = match gestures.step() {
            Ok(outcome) => outcome,
            Err(HandpanError::ReplayExhausted { .. }) => break,
            Err(e) => return Err(e.into()),
        };

        if let (Some(recorder), Some(_)) = (recorder.as_mut(), outcome.frame.as_ref()) {
            recorder.record(&outcome.hands)?;
        }
        let Some(command) = outcome.command else {
            continue;
        };
        tally.add(&command);
        println!("{}", format_command(gestures.frames(), &command));
        if let Some(ref mut viewer) = viewer {
            super::apply_to_viewer(viewer, command);
        }
    }

    if let Some(recorder) = recorder {
        let frames = recorder.frames();
        recorder.finish()?;
        info!(frames, "recording written");
    }
    print_session_summary(&gestures.describe(), gestures.frames(), &tally, viewer.as_ref());
    Ok(())
}
