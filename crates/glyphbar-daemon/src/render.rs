//! Shipped renderer implementations.
//!
//! Renderers run inline on the state loop, so everything here stays cheap
//! and swallows its own failures: a broken renderer must never take down
//! command processing.

use std::fs;
use std::path::PathBuf;

use glyphbar_core::display::DisplayState;
use glyphbar_core::observer::DisplayObserver;
use serde::Serialize;
use tracing::info;
use tracing::warn;

/// Renders transitions as log lines; the headless stand-in for a status-bar
/// item.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl LogRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayObserver for LogRenderer {
    fn display_changed(&self, state: &DisplayState, active_index: usize) {
        match state {
            DisplayState::Single(spec) => {
                info!(symbol = %spec.id, "Display changed");
            }
            DisplayState::Multiple { symbols, mode, .. } => {
                if let Some(active) = symbols.get(active_index % symbols.len().max(1)) {
                    info!(
                        symbol = %active.id,
                        active = active_index,
                        total = symbols.len(),
                        mode = mode.label(),
                        "Display changed"
                    );
                }
            }
            DisplayState::Image(image) => {
                info!(image = %image.as_str(), "Display changed");
            }
        }
    }
}

#[derive(Serialize)]
struct StateSnapshot<'a> {
    state: &'a DisplayState,
    active_index: usize,
}

/// Mirrors the current display state to a JSON file after every transition,
/// for external status bars to watch.
#[derive(Debug)]
pub struct StateFileRenderer {
    path: PathBuf,
}

impl StateFileRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DisplayObserver for StateFileRenderer {
    fn display_changed(&self, state: &DisplayState, active_index: usize) {
        let snapshot = StateSnapshot {
            state,
            active_index,
        };
        let json = match serde_json::to_vec_pretty(&snapshot) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "Failed to encode display state");
                return;
            }
        };
        // Write-then-rename so watchers never read a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = written {
            warn!(
                error = %err,
                path = %self.path.display(),
                "Failed to write display state file"
            );
        }
    }
}
