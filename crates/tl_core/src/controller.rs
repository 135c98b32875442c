use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::gesture::{GesturePhase, PullConfig, PullGesture, Release};
use crate::surface::{ScrollSurface, TouchEvent, TouchPhase};

/// One-shot completion handle for a refresh in flight. The controller
/// polls it; whoever performs the refresh resolves it through the
/// matching [`RefreshDone`].
pub struct RefreshTask {
    rx: Receiver<anyhow::Result<()>>,
}

/// Completion side of a [`RefreshTask`]. Hand it to the worker doing the
/// actual fetch; dropping it without calling [`RefreshDone::finish`]
/// settles the task as a failure.
pub struct RefreshDone {
    tx: Sender<anyhow::Result<()>>,
}

impl RefreshTask {
    pub fn channel() -> (RefreshDone, RefreshTask) {
        let (tx, rx) = mpsc::channel();
        (RefreshDone { tx }, RefreshTask { rx })
    }

    /// An already-settled task, for synchronous sources and tests.
    pub fn ready(result: anyhow::Result<()>) -> RefreshTask {
        let (done, task) = Self::channel();
        done.finish(result);
        task
    }

    fn try_settle(&mut self) -> Option<anyhow::Result<()>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(anyhow::anyhow!(
                "refresh worker dropped without completing"
            ))),
        }
    }
}

impl RefreshDone {
    pub fn finish(self, result: anyhow::Result<()>) {
        let _ = self.tx.send(result);
    }
}

pub type RefreshFn = Box<dyn FnMut() -> RefreshTask>;

/// Host obligation for the platform event that was just routed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchReaction {
    pub prevent_default: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshPoll {
    /// No refresh in flight.
    Idle,
    /// A refresh is in flight and has not settled yet.
    Pending,
    /// A refresh settled this turn; the machine is back to `Idle`.
    Settled,
}

/// Binds a [`PullGesture`] to one scrollable surface and one refresh
/// callback. The controller is the scoped resource of the binding:
/// dropping it (or [`unbind`](Self::unbind)) detaches everything, so no
/// handler can outlive it.
pub struct PullRefreshController<S: ScrollSurface> {
    gesture: PullGesture,
    surface: S,
    on_refresh: RefreshFn,
    pending: Option<RefreshTask>,
}

impl<S: ScrollSurface> PullRefreshController<S> {
    pub fn bind(surface: S, config: PullConfig, on_refresh: RefreshFn) -> Self {
        Self {
            gesture: PullGesture::new(config),
            surface,
            on_refresh,
            pending: None,
        }
    }

    /// Detach from the surface and hand it back to the host.
    pub fn unbind(self) -> S {
        self.surface
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn pull_distance(&self) -> f32 {
        self.gesture.pull_distance()
    }

    pub fn is_refreshing(&self) -> bool {
        self.gesture.is_refreshing()
    }

    pub fn threshold(&self) -> f32 {
        self.gesture.threshold()
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.gesture.set_threshold(threshold);
    }

    /// Route one platform event. The surface's scroll offset is sampled
    /// at routing time, so hosts must publish it before delivering the
    /// event.
    pub fn touch(&mut self, event: TouchEvent) -> TouchReaction {
        let scroll_top = self.surface.scroll_top();
        match event.phase {
            TouchPhase::Start => {
                self.gesture.touch_start(scroll_top, event.y);
                TouchReaction::default()
            }
            TouchPhase::Move => TouchReaction {
                prevent_default: self.gesture.touch_move(scroll_top, event.y).prevent_default,
            },
            TouchPhase::End => {
                if self.gesture.release() == Release::Triggered {
                    // Triggered is only reachable from Dragging, so no
                    // task can already be pending here.
                    debug_assert!(self.pending.is_none());
                    log::debug!(
                        "pull released at {:.1}px, starting refresh",
                        self.gesture.pull_distance()
                    );
                    self.pending = Some((self.on_refresh)());
                }
                TouchReaction::default()
            }
            TouchPhase::Cancel => {
                self.gesture.cancel();
                TouchReaction::default()
            }
        }
    }

    /// Drive a pending refresh; call once per event-loop turn. Failures
    /// are logged and swallowed, and the gesture returns to idle either
    /// way. A task that never settles leaves the controller refreshing
    /// indefinitely; timeouts are the caller's business.
    pub fn poll(&mut self) -> RefreshPoll {
        let Some(task) = self.pending.as_mut() else {
            return RefreshPoll::Idle;
        };
        match task.try_settle() {
            None => RefreshPoll::Pending,
            Some(result) => {
                if let Err(err) = result {
                    log::warn!("refresh failed: {err:#}");
                }
                self.pending = None;
                self.gesture.finish_refresh();
                RefreshPoll::Settled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::surface::ScrollTopCell;

    struct Harness {
        controller: PullRefreshController<ScrollTopCell>,
        cell: ScrollTopCell,
        calls: Rc<RefCell<usize>>,
        done_slot: Rc<RefCell<Option<RefreshDone>>>,
    }

    fn harness() -> Harness {
        let cell = ScrollTopCell::new();
        let calls = Rc::new(RefCell::new(0usize));
        let done_slot: Rc<RefCell<Option<RefreshDone>>> = Rc::new(RefCell::new(None));
        let on_refresh = {
            let calls = Rc::clone(&calls);
            let done_slot = Rc::clone(&done_slot);
            Box::new(move || {
                *calls.borrow_mut() += 1;
                let (done, task) = RefreshTask::channel();
                *done_slot.borrow_mut() = Some(done);
                task
            })
        };
        Harness {
            controller: PullRefreshController::bind(
                cell.clone(),
                PullConfig::default(),
                on_refresh,
            ),
            cell,
            calls,
            done_slot,
        }
    }

    fn pull_past_threshold(harness: &mut Harness) {
        harness.cell.set(0.0);
        harness.controller.touch(TouchEvent::start(20.0));
        harness.controller.touch(TouchEvent::moved(220.0));
        harness.controller.touch(TouchEvent::end());
    }

    #[test]
    fn t_controller_001_full_gesture_invokes_refresh_once() {
        let mut h = harness();
        pull_past_threshold(&mut h);

        assert_eq!(*h.calls.borrow(), 1);
        assert!(h.controller.is_refreshing());
        assert_eq!(h.controller.poll(), RefreshPoll::Pending);

        h.done_slot.borrow_mut().take().unwrap().finish(Ok(()));
        assert_eq!(h.controller.poll(), RefreshPoll::Settled);
        assert_eq!(h.controller.phase(), GesturePhase::Idle);
        assert_eq!(h.controller.pull_distance(), 0.0);
        assert_eq!(h.controller.poll(), RefreshPoll::Idle);
    }

    #[test]
    fn t_controller_002_short_pull_skips_the_callback() {
        let mut h = harness();
        h.controller.touch(TouchEvent::start(20.0));
        h.controller.touch(TouchEvent::moved(120.0));
        assert_eq!(h.controller.pull_distance(), 50.0);
        h.controller.touch(TouchEvent::end());

        assert_eq!(*h.calls.borrow(), 0);
        assert_eq!(h.controller.phase(), GesturePhase::Idle);
        assert_eq!(h.controller.poll(), RefreshPoll::Idle);
    }

    #[test]
    fn t_controller_003_move_reports_prevent_default_only_downward() {
        let mut h = harness();
        h.controller.touch(TouchEvent::start(100.0));
        assert!(h.controller.touch(TouchEvent::moved(180.0)).prevent_default);
        assert!(!h.controller.touch(TouchEvent::moved(40.0)).prevent_default);
    }

    #[test]
    fn t_controller_004_surface_scroll_aborts_mid_gesture() {
        let mut h = harness();
        h.controller.touch(TouchEvent::start(20.0));
        h.controller.touch(TouchEvent::moved(220.0));
        assert!(h.controller.pull_distance() > 0.0);

        h.cell.set(64.0);
        assert!(!h.controller.touch(TouchEvent::moved(260.0)).prevent_default);
        assert_eq!(h.controller.phase(), GesturePhase::Idle);

        h.controller.touch(TouchEvent::end());
        assert_eq!(*h.calls.borrow(), 0);
    }

    #[test]
    fn t_controller_005_failed_refresh_still_settles() {
        let mut h = harness();
        pull_past_threshold(&mut h);
        h.done_slot
            .borrow_mut()
            .take()
            .unwrap()
            .finish(Err(anyhow::anyhow!("backend unavailable")));

        assert_eq!(h.controller.poll(), RefreshPoll::Settled);
        assert_eq!(h.controller.phase(), GesturePhase::Idle);
        assert_eq!(h.controller.pull_distance(), 0.0);
    }

    #[test]
    fn t_controller_006_dropped_worker_settles_as_failure() {
        let mut h = harness();
        pull_past_threshold(&mut h);
        h.done_slot.borrow_mut().take();

        assert_eq!(h.controller.poll(), RefreshPoll::Settled);
        assert_eq!(h.controller.phase(), GesturePhase::Idle);
    }

    #[test]
    fn t_controller_007_gestures_while_refreshing_are_ignored() {
        let mut h = harness();
        pull_past_threshold(&mut h);

        h.controller.touch(TouchEvent::start(20.0));
        h.controller.touch(TouchEvent::moved(400.0));
        h.controller.touch(TouchEvent::end());

        assert_eq!(*h.calls.borrow(), 1);
        assert!(h.controller.is_refreshing());
    }

    #[test]
    fn t_controller_008_unbind_returns_the_surface() {
        let h = harness();
        let surface = h.controller.unbind();
        surface.set(7.0);
        assert_eq!(h.cell.get(), 7.0);
    }

    #[test]
    fn t_controller_009_ready_task_settles_on_first_poll() {
        let cell = ScrollTopCell::new();
        let mut controller = PullRefreshController::bind(
            cell,
            PullConfig { threshold: 10.0 },
            Box::new(|| RefreshTask::ready(Ok(()))),
        );
        controller.touch(TouchEvent::start(0.0));
        controller.touch(TouchEvent::moved(100.0));
        controller.touch(TouchEvent::end());
        assert!(controller.is_refreshing());
        assert_eq!(controller.poll(), RefreshPoll::Settled);
        assert_eq!(controller.phase(), GesturePhase::Idle);
    }
}
