//! Display state machine.
//!
//! Owns the current [`DisplayState`], the rotation cursor, and the rotation
//! deadline. All methods must be called from a single owning context; the
//! daemon's event loop is that context in production. The timer is
//! cooperative: the owner asks for [`next_deadline`](DisplayController::next_deadline),
//! sleeps, then calls [`tick`](DisplayController::tick), which makes stale
//! wakeups for a cancelled rotation harmless.

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use crate::clock::Clock;
use crate::color;
use crate::display::DisplayMode;
use crate::display::DisplayState;
use crate::display::DEFAULT_ROTATION_INTERVAL;
use crate::observer::DisplayObserver;
use crate::symbol::SymbolSpec;

/// Glyph shown from launch until the first command arrives.
pub const STARTUP_GLYPH: &str = "star.fill";

#[derive(Debug)]
struct Rotation {
    interval: Duration,
    next_fire: Instant,
}

pub struct DisplayController {
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn DisplayObserver>>,
    state: DisplayState,
    cursor: usize,
    rotation: Option<Rotation>,
    stopped: bool,
}

impl DisplayController {
    /// Starts on the neutral launch glyph, with no observers and no pending
    /// rotation. Nothing is emitted until [`publish`](Self::publish) or the
    /// first [`apply`](Self::apply).
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            observers: Vec::new(),
            state: DisplayState::Single(SymbolSpec::new(STARTUP_GLYPH, color::GRAY)),
            cursor: 0,
            rotation: None,
            stopped: false,
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn DisplayObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Index of the currently active symbol slot.
    pub fn active_index(&self) -> usize {
        self.cursor
    }

    /// Replaces the visual state: cancels any pending rotation, resets the
    /// cursor to slot 0, notifies observers exactly once, and re-arms the
    /// timer when the new state rotates.
    pub fn apply(&mut self, state: DisplayState) {
        if self.stopped {
            return;
        }
        self.rotation = None;
        self.cursor = 0;
        self.state = state;
        if let DisplayState::Multiple {
            mode: DisplayMode::Rotating { interval },
            ..
        } = &self.state
        {
            // The config layer coerces zero intervals, but a hand-built
            // state must not turn every wakeup into a tick.
            let interval = if interval.is_zero() {
                DEFAULT_ROTATION_INTERVAL
            } else {
                *interval
            };
            self.rotation = Some(Rotation {
                interval,
                next_fire: self.clock.now() + interval,
            });
        }
        self.publish();
    }

    /// Re-wraps a currently shown multi-symbol state under `mode`,
    /// restarting from slot 0. Single and image states are untouched; the
    /// new mode only affects later multi-symbol commands.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.stopped {
            return;
        }
        if let DisplayState::Multiple { symbols, .. } = &self.state {
            let symbols = symbols.clone();
            self.apply(DisplayState::Multiple { symbols, mode });
        }
    }

    /// When the next rotation step is due, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.rotation.as_ref().map(|rotation| rotation.next_fire)
    }

    /// Advances the rotation if its deadline has passed. Returns whether a
    /// notification went out; spurious wakeups (not yet due, rotation
    /// cancelled by a later `apply`, controller shut down) return false and
    /// change nothing.
    pub fn tick(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let now = self.clock.now();
        let Some(rotation) = self.rotation.as_mut() else {
            return false;
        };
        if now < rotation.next_fire {
            return false;
        }
        rotation.next_fire += rotation.interval;
        if rotation.next_fire <= now {
            // Late wakeup: skip the missed steps instead of firing a burst
            // of catch-up ticks.
            rotation.next_fire = now + rotation.interval;
        }
        let slots = self.state.slot_count().max(1);
        self.cursor = (self.cursor + 1) % slots;
        self.publish();
        true
    }

    /// Stops the controller for good: the rotation is cancelled and later
    /// `apply`/`tick` calls become no-ops. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.rotation = None;
        self.stopped = true;
    }

    /// Notifies every observer of the current state and cursor.
    pub fn publish(&self) {
        for observer in &self.observers {
            observer.display_changed(&self.state, self.cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::observer::RecordingObserver;

    const SECOND: Duration = Duration::from_secs(1);

    fn spec(id: &str) -> SymbolSpec {
        SymbolSpec::new(id, color::GREEN)
    }

    fn rotating_state(ids: &[&str], interval: Duration) -> DisplayState {
        DisplayState::Multiple {
            symbols: ids.iter().map(|id| spec(id)).collect(),
            mode: DisplayMode::Rotating { interval },
        }
    }

    fn controller() -> (DisplayController, Arc<ManualClock>, Arc<RecordingObserver>) {
        let clock = Arc::new(ManualClock::new());
        let observer = Arc::new(RecordingObserver::new());
        let mut controller = DisplayController::new(clock.clone());
        controller.add_observer(observer.clone());
        (controller, clock, observer)
    }

    #[test]
    fn test_new_controller_emits_nothing() {
        let (controller, _clock, observer) = controller();
        assert!(observer.is_empty());
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn test_publish_emits_the_startup_glyph() {
        let (controller, _clock, observer) = controller();
        controller.publish();
        assert_eq!(
            observer.last(),
            Some((
                DisplayState::Single(SymbolSpec::new(STARTUP_GLYPH, color::GRAY)),
                0
            ))
        );
    }

    #[test]
    fn test_apply_notifies_exactly_once() {
        let (mut controller, _clock, observer) = controller();
        let state = DisplayState::Single(spec("circle"));
        controller.apply(state.clone());
        assert_eq!(observer.events(), vec![(state, 0)]);
    }

    #[test]
    fn test_apply_rotating_arms_the_timer() {
        let (mut controller, clock, _observer) = controller();
        let start = clock.now();
        controller.apply(rotating_state(&["a", "b"], SECOND));
        assert_eq!(controller.next_deadline(), Some(start + SECOND));
    }

    #[test]
    fn test_non_rotating_states_arm_nothing() {
        let (mut controller, _clock, _observer) = controller();
        controller.apply(DisplayState::Single(spec("a")));
        assert!(controller.next_deadline().is_none());

        controller.apply(DisplayState::Multiple {
            symbols: vec![spec("a"), spec("b")],
            mode: DisplayMode::SideBySide,
        });
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn test_rotation_cycles_through_all_slots() {
        let (mut controller, clock, observer) = controller();
        controller.apply(rotating_state(&["a", "b", "c"], SECOND));

        for expected in [1, 2, 0, 1] {
            clock.advance(SECOND);
            assert!(controller.tick());
            let (_, index) = observer.last().unwrap();
            assert_eq!(index, expected);
        }
        assert_eq!(observer.len(), 5);
    }

    #[test]
    fn test_tick_before_deadline_does_nothing() {
        let (mut controller, clock, observer) = controller();
        controller.apply(rotating_state(&["a", "b"], SECOND));

        clock.advance(Duration::from_millis(999));
        assert!(!controller.tick());
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn test_apply_cancels_a_pending_rotation() {
        let (mut controller, clock, observer) = controller();
        controller.apply(rotating_state(&["a", "b"], SECOND));

        controller.apply(DisplayState::Single(spec("c")));
        assert!(controller.next_deadline().is_none());

        // A wakeup scheduled for the old deadline must not fire.
        clock.advance(Duration::from_secs(5));
        assert!(!controller.tick());
        assert_eq!(observer.len(), 2);
        assert_eq!(controller.active_index(), 0);
    }

    #[test]
    fn test_new_rotating_state_resets_the_cursor() {
        let (mut controller, clock, observer) = controller();
        controller.apply(rotating_state(&["a", "b", "c"], SECOND));
        clock.advance(SECOND);
        controller.tick();
        assert_eq!(controller.active_index(), 1);

        controller.apply(rotating_state(&["x", "y"], SECOND));
        assert_eq!(controller.active_index(), 0);
        let (_, index) = observer.last().unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn test_late_wakeup_skips_missed_steps() {
        let (mut controller, clock, observer) = controller();
        let start = clock.now();
        controller.apply(rotating_state(&["a", "b"], SECOND));

        // Sleep overshot by three full intervals; one tick fires and the
        // next deadline moves relative to now.
        clock.advance(Duration::from_secs(4));
        assert!(controller.tick());
        assert_eq!(observer.len(), 2);
        assert_eq!(controller.next_deadline(), Some(start + Duration::from_secs(5)));

        assert!(!controller.tick());
    }

    #[test]
    fn test_on_time_wakeups_keep_a_fixed_cadence() {
        let (mut controller, clock, _observer) = controller();
        let start = clock.now();
        controller.apply(rotating_state(&["a", "b"], SECOND));

        clock.advance(SECOND);
        assert!(controller.tick());
        assert_eq!(controller.next_deadline(), Some(start + 2 * SECOND));
    }

    #[test]
    fn test_single_slot_rotation_still_notifies() {
        let (mut controller, clock, observer) = controller();
        controller.apply(rotating_state(&["only"], SECOND));

        clock.advance(SECOND);
        assert!(controller.tick());
        assert_eq!(observer.last().map(|(_, index)| index), Some(0));
        assert_eq!(observer.len(), 2);
    }

    #[test]
    fn test_zero_interval_state_falls_back_to_default_cadence() {
        let (mut controller, clock, _observer) = controller();
        let start = clock.now();
        controller.apply(rotating_state(&["a", "b"], Duration::ZERO));
        assert_eq!(
            controller.next_deadline(),
            Some(start + DEFAULT_ROTATION_INTERVAL)
        );
    }

    #[test]
    fn test_set_mode_rewraps_a_multi_state() {
        let (mut controller, clock, observer) = controller();
        controller.apply(DisplayState::Multiple {
            symbols: vec![spec("a"), spec("b")],
            mode: DisplayMode::SideBySide,
        });

        let start = clock.now();
        controller.set_mode(DisplayMode::Rotating { interval: SECOND });
        assert_eq!(controller.next_deadline(), Some(start + SECOND));
        assert_eq!(observer.len(), 2);
        assert!(matches!(
            observer.last(),
            Some((
                DisplayState::Multiple {
                    mode: DisplayMode::Rotating { .. },
                    ..
                },
                0
            ))
        ));
    }

    #[test]
    fn test_set_mode_ignores_single_and_image_states() {
        let (mut controller, _clock, observer) = controller();
        controller.apply(DisplayState::Single(spec("a")));
        controller.set_mode(DisplayMode::Rotating { interval: SECOND });
        assert_eq!(observer.len(), 1);
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn test_shutdown_is_idempotent_and_final() {
        let (mut controller, clock, observer) = controller();
        controller.apply(rotating_state(&["a", "b"], SECOND));

        controller.shutdown();
        controller.shutdown();
        assert!(controller.next_deadline().is_none());

        clock.advance(Duration::from_secs(10));
        assert!(!controller.tick());
        controller.apply(DisplayState::Single(spec("late")));
        assert_eq!(observer.len(), 1);
    }
}
