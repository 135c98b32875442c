/// Damping applied to the raw drag distance so the indicator feels
/// resistant rather than tracking the finger 1:1.
pub const PULL_DAMPING: f32 = 0.5;

/// The damped pull never travels past this multiple of the threshold.
pub const MAX_PULL_FACTOR: f32 = 1.5;

const DEFAULT_THRESHOLD: f32 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullConfig {
    /// Damped distance, in pixels, the user must pull before a release
    /// triggers a refresh.
    pub threshold: f32,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Dragging,
    Refreshing,
}

/// What the host must do with the platform event that produced a move.
/// `prevent_default` means the native scroll/bounce for this event has to
/// be cancelled, so the handler must be registered in a cancellable mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveResponse {
    pub prevent_default: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// No drag was active; nothing changed.
    Ignored,
    /// Released short of the threshold; back to idle.
    Dismissed,
    /// Released past the threshold; the machine is now `Refreshing` and
    /// stays there until [`PullGesture::finish_refresh`].
    Triggered,
}

/// Pull-to-refresh gesture state machine.
///
/// Invariants: `start_y` is present exactly while `Dragging`, and
/// `pull_distance` is non-negative and zero whenever the phase is `Idle`.
#[derive(Debug)]
pub struct PullGesture {
    phase: GesturePhase,
    start_y: Option<f32>,
    pull_distance: f32,
    threshold: f32,
}

impl Default for PullGesture {
    fn default() -> Self {
        Self::new(PullConfig::default())
    }
}

impl PullGesture {
    pub fn new(config: PullConfig) -> Self {
        Self {
            phase: GesturePhase::Idle,
            start_y: None,
            pull_distance: 0.0,
            threshold: config.threshold,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn pull_distance(&self) -> f32 {
        self.pull_distance
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == GesturePhase::Refreshing
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// A drag only arms when the container sits exactly at the top.
    /// Starts while already dragging or refreshing are ignored.
    pub fn touch_start(&mut self, scroll_top: f32, y: f32) {
        if self.phase != GesturePhase::Idle || scroll_top != 0.0 {
            return;
        }
        self.phase = GesturePhase::Dragging;
        self.start_y = Some(y);
    }

    pub fn touch_move(&mut self, scroll_top: f32, y: f32) -> MoveResponse {
        if self.phase != GesturePhase::Dragging {
            return MoveResponse::default();
        }
        let Some(start_y) = self.start_y else {
            return MoveResponse::default();
        };
        if scroll_top > 0.0 {
            // The user scrolled away from the top mid-gesture.
            self.abort();
            return MoveResponse::default();
        }
        let raw = (y - start_y).max(0.0);
        if raw <= 0.0 {
            return MoveResponse::default();
        }
        self.pull_distance = (raw * PULL_DAMPING).min(self.threshold * MAX_PULL_FACTOR);
        MoveResponse {
            prevent_default: true,
        }
    }

    pub fn release(&mut self) -> Release {
        if self.start_y.take().is_none() {
            return Release::Ignored;
        }
        if self.pull_distance >= self.threshold {
            // pull_distance is retained so the indicator can hold its
            // position until the refresh settles.
            self.phase = GesturePhase::Refreshing;
            Release::Triggered
        } else {
            self.phase = GesturePhase::Idle;
            self.pull_distance = 0.0;
            Release::Dismissed
        }
    }

    pub fn finish_refresh(&mut self) {
        if self.phase != GesturePhase::Refreshing {
            return;
        }
        self.phase = GesturePhase::Idle;
        self.pull_distance = 0.0;
    }

    /// Host-initiated abort (platform touch-cancel). Behaves like the
    /// scroll-away abort; a pending refresh is not interrupted.
    pub fn cancel(&mut self) {
        if self.phase == GesturePhase::Dragging {
            self.abort();
        }
    }

    fn abort(&mut self) {
        self.phase = GesturePhase::Idle;
        self.start_y = None;
        self.pull_distance = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging(threshold: f32) -> PullGesture {
        let mut gesture = PullGesture::new(PullConfig { threshold });
        gesture.touch_start(0.0, 100.0);
        assert_eq!(gesture.phase(), GesturePhase::Dragging);
        gesture
    }

    #[test]
    fn t_gesture_001_upward_drag_keeps_pull_at_zero() {
        let mut gesture = dragging(80.0);
        let response = gesture.touch_move(0.0, 40.0);
        assert!(!response.prevent_default);
        assert_eq!(gesture.pull_distance(), 0.0);

        let response = gesture.touch_move(0.0, 100.0);
        assert!(!response.prevent_default);
        assert_eq!(gesture.pull_distance(), 0.0);
    }

    #[test]
    fn t_gesture_002_pull_is_damped_and_capped() {
        let mut gesture = dragging(80.0);

        gesture.touch_move(0.0, 200.0);
        assert_eq!(gesture.pull_distance(), 50.0);

        gesture.touch_move(0.0, 500.0);
        assert_eq!(gesture.pull_distance(), 120.0);
    }

    #[test]
    fn t_gesture_003_release_triggers_only_at_threshold() {
        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 258.0);
        assert_eq!(gesture.pull_distance(), 79.0);
        assert_eq!(gesture.release(), Release::Dismissed);

        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 260.0);
        assert_eq!(gesture.pull_distance(), 80.0);
        assert_eq!(gesture.release(), Release::Triggered);
        assert!(gesture.is_refreshing());
    }

    #[test]
    fn t_gesture_004_any_release_path_returns_to_idle() {
        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 180.0);
        assert_eq!(gesture.release(), Release::Dismissed);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(gesture.pull_distance(), 0.0);

        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 300.0);
        assert_eq!(gesture.release(), Release::Triggered);
        assert!(gesture.pull_distance() > 0.0);
        gesture.finish_refresh();
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(gesture.pull_distance(), 0.0);
    }

    #[test]
    fn t_gesture_005_scrolling_away_aborts_the_drag() {
        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 300.0);
        assert!(gesture.pull_distance() > 0.0);

        gesture.touch_move(35.0, 320.0);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(gesture.pull_distance(), 0.0);

        // Further moves are inert until a fresh start at the top.
        gesture.touch_move(0.0, 400.0);
        assert_eq!(gesture.pull_distance(), 0.0);

        gesture.touch_start(0.0, 100.0);
        gesture.touch_move(0.0, 300.0);
        assert_eq!(gesture.pull_distance(), 100.0);
    }

    #[test]
    fn t_gesture_006_start_away_from_top_is_ignored() {
        let mut gesture = PullGesture::default();
        gesture.touch_start(12.0, 100.0);
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(gesture.touch_move(12.0, 300.0), MoveResponse::default());
        assert_eq!(gesture.release(), Release::Ignored);
    }

    #[test]
    fn t_gesture_007_reentrant_start_keeps_original_anchor() {
        let mut gesture = dragging(80.0);
        gesture.touch_start(0.0, 500.0);
        gesture.touch_move(0.0, 300.0);
        // Anchored at the first start (y=100), not the re-entrant one.
        assert_eq!(gesture.pull_distance(), 100.0);
    }

    #[test]
    fn t_gesture_008_release_without_drag_is_a_noop() {
        let mut gesture = PullGesture::default();
        assert_eq!(gesture.release(), Release::Ignored);
        assert_eq!(gesture.phase(), GesturePhase::Idle);

        // A stray release while refreshing changes nothing either.
        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 300.0);
        assert_eq!(gesture.release(), Release::Triggered);
        assert_eq!(gesture.release(), Release::Ignored);
        assert!(gesture.is_refreshing());
    }

    #[test]
    fn t_gesture_009_cancel_acts_like_abort() {
        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 300.0);
        gesture.cancel();
        assert_eq!(gesture.phase(), GesturePhase::Idle);
        assert_eq!(gesture.pull_distance(), 0.0);

        // Cancel during a refresh must not interrupt it.
        let mut gesture = dragging(80.0);
        gesture.touch_move(0.0, 300.0);
        gesture.release();
        gesture.cancel();
        assert!(gesture.is_refreshing());
    }
}
