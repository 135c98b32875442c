use crate::model::Notice;

/// Notice list shown in the feed pane: the owned entries, the current
/// selection, and the substring filter typed into the search box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedPane {
    entries: Vec<Notice>,
    selected_id: Option<u64>,
    query: String,
}

impl FeedPane {
    pub fn new(entries: Vec<Notice>) -> Self {
        Self {
            entries,
            selected_id: None,
            query: String::new(),
        }
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query.clear();
        self.query.push_str(query);
    }

    pub fn set_entries(&mut self, entries: Vec<Notice>) {
        self.entries = entries;
        if let Some(selected) = self.selected_id {
            if !self.entries.iter().any(|notice| notice.id == selected) {
                self.selected_id = None;
            }
        }
    }

    /// Insert a refreshed batch ahead of the existing entries (the feed
    /// is newest-first). The selection survives because existing ids
    /// keep their identity.
    pub fn prepend(&mut self, batch: Vec<Notice>) {
        if batch.is_empty() {
            return;
        }
        let mut next = batch;
        next.append(&mut self.entries);
        self.entries = next;
    }

    pub fn select(&mut self, id: u64) -> bool {
        if self.entries.iter().any(|notice| notice.id == id) {
            self.selected_id = Some(id);
            true
        } else {
            false
        }
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    pub fn selected(&self) -> Option<&Notice> {
        let id = self.selected_id?;
        self.entries.iter().find(|notice| notice.id == id)
    }

    pub fn mark_read(&mut self, id: u64) -> bool {
        if let Some(notice) = self.entries.iter_mut().find(|notice| notice.id == id) {
            notice.unread = false;
            true
        } else {
            false
        }
    }

    pub fn mark_all_read(&mut self) {
        for notice in &mut self.entries {
            notice.unread = false;
        }
    }

    pub fn matches_query(&self, notice: &Notice) -> bool {
        self.query.is_empty()
            || notice.title.contains(&self.query)
            || notice.body.contains(&self.query)
    }
}
