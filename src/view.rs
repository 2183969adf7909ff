/// Rows addressable by their server identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Shared state of a list-and-detail view: an ordered parent list (chats,
/// channels, stories), one active parent, and the active parent's child rows.
/// Stored as a plain value inside a single signal so every event produces a
/// whole new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadState<P, M> {
    pub parents: Vec<P>,
    pub active: Option<String>,
    pub detail: Vec<M>,
}

impl<P, M> Default for ThreadState<P, M> {
    fn default() -> Self {
        Self { parents: Vec::new(), active: None, detail: Vec::new() }
    }
}

impl<P: Keyed, M> ThreadState<P, M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parent list with a fresh server snapshot. The first row
    /// becomes active when nothing was selected yet; an existing selection
    /// that survived the refetch is kept.
    pub fn load_parents(&mut self, rows: Vec<P>) {
        self.parents = rows;
        let still_there = self
            .active
            .as_deref()
            .is_some_and(|id| self.parents.iter().any(|p| p.key() == id));
        if !still_there {
            self.active = self.parents.first().map(|p| p.key().to_string());
            self.detail.clear();
        }
    }

    /// Switch the active parent. Returns false (and changes nothing) when the
    /// id is already active, so callers can skip a redundant refetch and
    /// resubscribe.
    pub fn activate(&mut self, id: &str) -> bool {
        if self.active.as_deref() == Some(id) {
            return false;
        }
        self.active = Some(id.to_string());
        self.detail.clear();
        true
    }

    pub fn active_parent(&self) -> Option<&P> {
        let id = self.active.as_deref()?;
        self.parents.iter().find(|p| p.key() == id)
    }

    /// Apply a finished detail fetch. Each fetch is tagged with the parent it
    /// was issued for; a response that arrives after the active parent moved
    /// on is discarded rather than overwriting the newer parent's rows.
    pub fn replace_detail(&mut self, for_parent: &str, rows: Vec<M>) -> bool {
        if self.active.as_deref() != Some(for_parent) {
            return false;
        }
        self.detail = rows;
        true
    }

    /// Append one child row — the optimistic draft or a live delivery. No
    /// deduplication: a live echo of a just-sent draft renders as a second
    /// row, matching the fetch ∪ optimistic ∪ delivered invariant.
    pub fn append_detail(&mut self, row: M) {
        self.detail.push(row);
    }

    /// Prepend a freshly created parent (channel created, story posted) and
    /// make it active.
    pub fn insert_parent_front(&mut self, parent: P) {
        let id = parent.key().to_string();
        self.parents.insert(0, parent);
        self.active = Some(id);
        self.detail.clear();
    }
}

/// Composer gate: whitespace-only input produces no optimistic entry and no
/// network call.
pub fn draft_is_sendable(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(String);

    impl Keyed for Row {
        fn key(&self) -> &str {
            &self.0
        }
    }

    fn rows(ids: &[&str]) -> Vec<Row> {
        ids.iter().map(|id| Row(id.to_string())).collect()
    }

    #[test]
    fn first_parent_becomes_active_on_initial_load() {
        let mut state: ThreadState<Row, String> = ThreadState::new();
        state.load_parents(rows(&["b", "a"]));
        assert_eq!(state.active.as_deref(), Some("b"));
    }

    #[test]
    fn reload_keeps_a_surviving_selection() {
        let mut state: ThreadState<Row, String> = ThreadState::new();
        state.load_parents(rows(&["a", "b"]));
        assert!(state.activate("b"));
        state.load_parents(rows(&["c", "b"]));
        assert_eq!(state.active.as_deref(), Some("b"));

        // Selection vanished from the snapshot: fall back to the first row.
        state.load_parents(rows(&["d", "e"]));
        assert_eq!(state.active.as_deref(), Some("d"));
    }

    #[test]
    fn activating_the_active_parent_is_a_no_op() {
        let mut state: ThreadState<Row, String> = ThreadState::new();
        state.load_parents(rows(&["a"]));
        state.detail.push("m1".to_string());
        assert!(!state.activate("a"));
        assert_eq!(state.detail, vec!["m1".to_string()]);

        assert!(state.activate("z"));
        assert!(state.detail.is_empty());
    }

    #[test]
    fn stale_detail_responses_are_discarded() {
        let mut state: ThreadState<Row, String> = ThreadState::new();
        state.load_parents(rows(&["a", "b"]));
        state.activate("b");

        // A slow response for "a" lands after "b" became active.
        assert!(!state.replace_detail("a", vec!["old".to_string()]));
        assert!(state.detail.is_empty());

        assert!(state.replace_detail("b", vec!["fresh".to_string()]));
        assert_eq!(state.detail, vec!["fresh".to_string()]);
    }

    #[test]
    fn appends_do_not_deduplicate() {
        let mut state: ThreadState<Row, String> = ThreadState::new();
        state.load_parents(rows(&["a"]));
        state.append_detail("m1".to_string());
        state.append_detail("m1".to_string());
        assert_eq!(state.detail.len(), 2);
    }

    #[test]
    fn created_parent_is_prepended_and_activated() {
        let mut state: ThreadState<Row, String> = ThreadState::new();
        state.load_parents(rows(&["a"]));
        state.detail.push("m1".to_string());
        state.insert_parent_front(Row("new".to_string()));
        assert_eq!(state.parents[0].key(), "new");
        assert_eq!(state.active.as_deref(), Some("new"));
        assert!(state.detail.is_empty());
    }

    #[test]
    fn whitespace_drafts_are_not_sendable() {
        assert!(!draft_is_sendable(""));
        assert!(!draft_is_sendable("   \n\t"));
        assert!(draft_is_sendable("  hi "));
    }
}
