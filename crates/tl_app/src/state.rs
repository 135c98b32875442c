use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use tl_core::controller::{PullRefreshController, RefreshPoll, RefreshTask};
use tl_core::gesture::PullConfig;
use tl_core::surface::ScrollTopCell;
use tl_core::window::{list_window, ListWindow};

use crate::feed::FeedPane;
use crate::model::Notice;
use crate::prefs::{load_feed_prefs, save_feed_prefs, FeedPrefs};

/// Produces one refresh worth of notices: deliver a batch through the
/// sender (possibly from a worker thread), then settle the returned task.
pub type NoticeSource = Box<dyn FnMut(Sender<Vec<Notice>>) -> RefreshTask>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedCounts {
    pub total: usize,
    pub unread: usize,
}

pub struct AppState {
    pub pane: FeedPane,
    pub refresh: PullRefreshController<ScrollTopCell>,
    pub scroll_top: ScrollTopCell,
    incoming: Receiver<Vec<Notice>>,

    pub item_height: f32,
    pub overscan: usize,
    pub window: ListWindow,

    /// True while the host must suppress native scrolling for the
    /// in-flight gesture.
    pub scroll_lock: bool,

    pub refreshes_completed: u64,
    pub status: String,
    pub prefs_error: String,

    filtered_index_cache: Vec<usize>,
    filtered_counts_cache: FeedCounts,
    filtered_cache_dirty: bool,
}

impl AppState {
    /// State with prefs loaded from disk; load failures fall back to
    /// defaults and surface in `prefs_error`.
    pub fn new(source: NoticeSource) -> Self {
        match load_feed_prefs() {
            Ok(prefs) => Self::with_prefs(prefs, source),
            Err(err) => {
                let mut state = Self::with_prefs(FeedPrefs::default(), source);
                state.prefs_error = err;
                state
            }
        }
    }

    pub fn with_prefs(prefs: FeedPrefs, source: NoticeSource) -> Self {
        let (batch_tx, incoming) = mpsc::channel();
        let scroll_top = ScrollTopCell::new();
        let mut source = source;
        let refresh = PullRefreshController::bind(
            scroll_top.clone(),
            PullConfig {
                threshold: prefs.threshold,
            },
            Box::new(move || source(batch_tx.clone())),
        );

        Self {
            pane: FeedPane::default(),
            refresh,
            scroll_top,
            incoming,
            item_height: prefs.item_height,
            overscan: prefs.overscan,
            window: ListWindow::default(),
            scroll_lock: false,
            refreshes_completed: 0,
            status: String::new(),
            prefs_error: String::new(),
            filtered_index_cache: Vec::new(),
            filtered_counts_cache: FeedCounts::default(),
            filtered_cache_dirty: true,
        }
    }

    /// Demo state: a pre-seeded feed plus the simulated notice source.
    pub fn demo() -> Self {
        let mut state = Self::new(Box::new(demo_source));
        state.load_feed(seed_notices(240));
        state
    }

    pub fn load_feed(&mut self, notices: Vec<Notice>) {
        self.pane.set_entries(notices);
        self.invalidate_filtered_cache();
    }

    pub fn set_query(&mut self, query: &str) {
        self.pane.set_query(query);
        self.invalidate_filtered_cache();
    }

    pub fn select(&mut self, id: u64) -> bool {
        self.pane.select(id)
    }

    pub fn mark_read(&mut self, id: u64) {
        if self.pane.mark_read(id) {
            self.invalidate_filtered_cache();
        }
    }

    pub fn mark_all_read(&mut self) {
        self.pane.mark_all_read();
        self.invalidate_filtered_cache();
    }

    pub fn filtered_len(&mut self) -> usize {
        self.ensure_filtered_cache();
        self.filtered_index_cache.len()
    }

    pub fn filtered_notice(&mut self, idx: usize) -> Option<&Notice> {
        self.ensure_filtered_cache();
        let entry_idx = *self.filtered_index_cache.get(idx)?;
        self.pane.entries().get(entry_idx)
    }

    pub fn counts(&mut self) -> FeedCounts {
        self.ensure_filtered_cache();
        self.filtered_counts_cache
    }

    /// Recompute the render window for the current scroll offset and the
    /// filtered feed length, and remember it for the snapshot.
    pub fn compute_window(&mut self, viewport_height: f32) -> ListWindow {
        let total = self.filtered_len();
        self.window = list_window(
            self.scroll_top.get(),
            self.item_height,
            viewport_height,
            total,
            self.overscan,
        );
        self.window
    }

    /// Per-turn pump: fold delivered batches into the feed and drive a
    /// pending refresh to settlement.
    pub fn pump(&mut self) {
        self.drain_batches();
        if self.refresh.poll() == RefreshPoll::Settled {
            // A worker sends its batch before settling, so drain again in
            // the same turn to keep the count in the status line honest.
            self.drain_batches();
            self.refreshes_completed += 1;
            log::info!(
                "refresh #{} settled, feed holds {} notices",
                self.refreshes_completed,
                self.pane.entries().len()
            );
            self.status = format!("feed refreshed ({} notices)", self.pane.entries().len());
        }
    }

    fn drain_batches(&mut self) {
        while let Ok(batch) = self.incoming.try_recv() {
            self.pane.prepend(batch);
            self.invalidate_filtered_cache();
        }
    }

    pub fn current_prefs(&self) -> FeedPrefs {
        FeedPrefs {
            threshold: self.refresh.threshold(),
            overscan: self.overscan,
            item_height: self.item_height,
        }
    }

    pub fn apply_prefs(&mut self, prefs: FeedPrefs) {
        self.refresh.set_threshold(prefs.threshold);
        self.overscan = prefs.overscan;
        self.item_height = prefs.item_height;
    }

    pub fn persist_prefs(&mut self) {
        match save_feed_prefs(&self.current_prefs()) {
            Ok(()) => self.prefs_error.clear(),
            Err(err) => self.prefs_error = format!("prefs not saved: {err}"),
        }
    }

    fn invalidate_filtered_cache(&mut self) {
        self.filtered_cache_dirty = true;
    }

    fn ensure_filtered_cache(&mut self) {
        if !self.filtered_cache_dirty {
            return;
        }
        let mut indices = Vec::with_capacity(self.pane.entries().len());
        let mut counts = FeedCounts::default();
        for (idx, notice) in self.pane.entries().iter().enumerate() {
            if self.pane.matches_query(notice) {
                indices.push(idx);
                counts.total += 1;
                if notice.unread {
                    counts.unread += 1;
                }
            }
        }
        self.filtered_index_cache = indices;
        self.filtered_counts_cache = counts;
        self.filtered_cache_dirty = false;
    }
}

static NEXT_NOTICE_ID: AtomicU64 = AtomicU64::new(1);

const NOTICE_TITLES: &[&str] = &[
    "Application deadline approaching",
    "New message from your advisor",
    "Document request",
    "Interview scheduled",
    "Scholarship round opened",
    "Visa appointment reminder",
];

fn next_notice(seq: usize) -> Notice {
    let id = NEXT_NOTICE_ID.fetch_add(1, Ordering::Relaxed);
    let title = NOTICE_TITLES[seq % NOTICE_TITLES.len()];
    let mut notice = Notice::new(
        id,
        format!("{title} #{id}"),
        format!("Open notice #{id} for the full details."),
    );
    notice.unread = seq % 4 == 0;
    notice
}

pub fn seed_notices(count: usize) -> Vec<Notice> {
    (0..count).map(next_notice).collect()
}

/// Simulated backend for the demo binary: a worker thread pretends to
/// fetch for a moment, delivers a small batch, then settles the task.
pub fn demo_source(tx: Sender<Vec<Notice>>) -> RefreshTask {
    let (done, task) = RefreshTask::channel();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(350));
        let batch = (0..4).map(next_notice).collect();
        let _ = tx.send(batch);
        done.finish(Ok(()));
    });
    task
}
