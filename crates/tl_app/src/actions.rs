use tl_core::surface::TouchEvent;

use crate::model::Notice;
use crate::prefs::FeedPrefs;
use crate::state::AppState;

pub enum AppAction {
    LoadFeed(Vec<Notice>),
    SetQuery(String),
    Select(u64),
    MarkRead(u64),
    MarkAllRead,

    /// Publish the container's scroll offset; must precede the touch
    /// routes for the same turn.
    SetScrollTop(f32),
    TouchStart(f32),
    TouchMove(f32),
    TouchEnd,
    TouchCancel,
    /// Per-turn pump for batches and refresh settlement.
    PollRefresh,
    /// Recompute the render window for the given viewport height.
    Layout(f32),

    SetThreshold(f32),
    SetOverscan(usize),
    SetItemHeight(f32),
    PersistPrefs,
    ResetPrefs,
}

pub fn dispatch(state: &mut AppState, action: AppAction) -> Result<(), String> {
    match action {
        AppAction::LoadFeed(notices) => {
            state.load_feed(notices);
        }
        AppAction::SetQuery(query) => {
            state.set_query(&query);
        }
        AppAction::Select(id) => {
            state.select(id);
        }
        AppAction::MarkRead(id) => {
            state.mark_read(id);
        }
        AppAction::MarkAllRead => {
            state.mark_all_read();
        }
        AppAction::SetScrollTop(offset) => {
            state.scroll_top.set(offset.max(0.0));
        }
        AppAction::TouchStart(y) => {
            state.refresh.touch(TouchEvent::start(y));
        }
        AppAction::TouchMove(y) => {
            state.scroll_lock = state.refresh.touch(TouchEvent::moved(y)).prevent_default;
        }
        AppAction::TouchEnd => {
            state.refresh.touch(TouchEvent::end());
            state.scroll_lock = false;
        }
        AppAction::TouchCancel => {
            state.refresh.touch(TouchEvent::cancel());
            state.scroll_lock = false;
        }
        AppAction::PollRefresh => {
            state.pump();
        }
        AppAction::Layout(viewport_height) => {
            state.compute_window(viewport_height);
        }
        AppAction::SetThreshold(threshold) => {
            if !threshold.is_finite() || threshold <= 0.0 {
                return Err("threshold must be positive".to_string());
            }
            state.refresh.set_threshold(threshold);
        }
        AppAction::SetOverscan(overscan) => {
            state.overscan = overscan;
        }
        AppAction::SetItemHeight(item_height) => {
            if !item_height.is_finite() || item_height <= 0.0 {
                return Err("item height must be positive".to_string());
            }
            state.item_height = item_height;
        }
        AppAction::PersistPrefs => {
            state.persist_prefs();
        }
        AppAction::ResetPrefs => {
            state.apply_prefs(FeedPrefs::default());
            state.persist_prefs();
        }
    }
    Ok(())
}
