use tl_core::controller::RefreshTask;
use tl_core::gesture::GesturePhase;
use tl_core::window::ListWindow;

use crate::actions::{dispatch, AppAction};
use crate::prefs::FeedPrefs;
use crate::state::{AppState, NoticeSource};

/// Headless harness around [`AppState`]: dispatch actions, then assert on
/// value snapshots. Keeps e2e tests free of any UI toolkit.
pub struct AppDriver {
    state: AppState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppSnapshot {
    pub total_notices: usize,
    pub unread_notices: usize,
    pub selected_id: Option<u64>,
    pub phase: GesturePhase,
    pub pull_distance: f32,
    pub scroll_lock: bool,
    pub refreshes_completed: u64,
    pub window: ListWindow,
    pub status: String,
}

impl Default for AppDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDriver {
    /// Driver with an inert source: refreshes settle immediately and
    /// deliver nothing.
    pub fn new() -> Self {
        Self::with_source(Box::new(|_tx| RefreshTask::ready(Ok(()))))
    }

    pub fn with_source(source: NoticeSource) -> Self {
        Self {
            state: AppState::with_prefs(FeedPrefs::default(), source),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn dispatch(&mut self, action: AppAction) -> Result<(), String> {
        dispatch(&mut self.state, action)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let entries = self.state.pane.entries();
        AppSnapshot {
            total_notices: entries.len(),
            unread_notices: entries.iter().filter(|notice| notice.unread).count(),
            selected_id: self.state.pane.selected_id(),
            phase: self.state.refresh.phase(),
            pull_distance: self.state.refresh.pull_distance(),
            scroll_lock: self.state.scroll_lock,
            refreshes_completed: self.state.refreshes_completed,
            window: self.state.window,
            status: self.state.status.clone(),
        }
    }
}
