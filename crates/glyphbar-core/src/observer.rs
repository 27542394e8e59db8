//! Renderer notification port.

use std::sync::Mutex;

use crate::display::DisplayState;

/// Downstream renderer interface. Implementations receive every display
/// transition and must not block: they run inline on the state-owning loop.
pub trait DisplayObserver: Send + Sync {
    /// Called once per transition with the new state and the index of the
    /// active symbol slot (always 0 outside rotating mode).
    fn display_changed(&self, state: &DisplayState, active_index: usize);
}

/// Observer that records every notification, in order. Test helper.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(DisplayState, usize)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, in delivery order.
    pub fn events(&self) -> Vec<(DisplayState, usize)> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<(DisplayState, usize)> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl DisplayObserver for RecordingObserver {
    fn display_changed(&self, state: &DisplayState, active_index: usize) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((state.clone(), active_index));
    }
}
