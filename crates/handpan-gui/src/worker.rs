use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use handpan_core::config::AppConfig;
use handpan_core::tracking::GestureLoop;
use tracing::{info, warn};

use crate::messages::{GestureControl, GestureEvent};

/// Recorded sessions carry no timing, so play them back at roughly camera speed.
const REPLAY_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Spawn the gesture thread. Returns the control sender.
///
/// The camera and detector are opened on the new thread, so a slow detector start never
/// blocks the window. Startup failures arrive as [`GestureEvent::Error`] followed by
/// [`GestureEvent::Stopped`].
pub fn spawn_gesture_worker(
    config: AppConfig,
    preview: bool,
    event_tx: mpsc::Sender<GestureEvent>,
    ctx: egui::Context,
) -> Result<mpsc::Sender<GestureControl>> {
    let (control_tx, control_rx) = mpsc::channel::<GestureControl>();

    std::thread::Builder::new()
        .name("handpan-gestures".into())
        .spawn(move || {
            worker_loop(&config, preview, control_rx, event_tx, ctx);
        })
        .context("Failed to spawn gesture thread")?;

    Ok(control_tx)
}

/// Returns false once the UI side has hung up.
fn send(tx: &mpsc::Sender<GestureEvent>, ctx: &egui::Context, event: GestureEvent) -> bool {
    let delivered = tx.send(event).is_ok();
    ctx.request_repaint();
    delivered
}

fn worker_loop(
    config: &AppConfig,
    mut preview: bool,
    control_rx: mpsc::Receiver<GestureControl>,
    tx: mpsc::Sender<GestureEvent>,
    ctx: egui::Context,
) {
    let mut gestures = match GestureLoop::from_config(config) {
        Ok(gestures) => gestures,
        Err(e) => {
            warn!("Gesture tracking failed to start: {e}");
            send(
                &tx,
                &ctx,
                GestureEvent::Error {
                    message: format!("Gesture tracking failed to start: {e}"),
                },
            );
            send(&tx, &ctx, GestureEvent::Stopped { frames: 0 });
            return;
        }
    };

    let source = gestures.describe();
    info!(%source, "gesture loop started");
    send(&tx, &ctx, GestureEvent::Started { source });

    let pacing = config.detector.replay.is_some().then_some(REPLAY_FRAME_INTERVAL);
    loop {
        match control_rx.try_recv() {
            Ok(GestureControl::Stop) | Err(TryRecvError::Disconnected) => break,
            Ok(GestureControl::SetPreview(on)) => preview = on,
            Err(TryRecvError::Empty) => {}
        }

        let started = Instant::now();
        let outcome = match gestures.step() {
            Ok(outcome) => outcome,
            Err(e) => {
                send(
                    &tx,
                    &ctx,
                    GestureEvent::Log {
                        message: format!("Gesture input ended: {e}"),
                    },
                );
                break;
            }
        };

        if let Some(command) = outcome.command {
            if !send(&tx, &ctx, GestureEvent::Command(command)) {
                break;
            }
        }
        if preview {
            if let Some(frame) = outcome.frame {
                let hands = outcome.hands;
                if !send(&tx, &ctx, GestureEvent::Preview { frame, hands }) {
                    break;
                }
            }
        }

        if let Some(interval) = pacing {
            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let frames = gestures.frames();
    info!(frames, "gesture loop stopped");
    send(&tx, &ctx, GestureEvent::Stopped { frames });
}
