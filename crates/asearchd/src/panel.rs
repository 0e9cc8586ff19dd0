use asearch_index::NameIndex;
use asearch_query::{search, Selection};

use crate::protocol::HostMessage;

/// Query state of one open search surface.
#[derive(Debug, Default)]
pub struct PanelState {
    last_query: Option<String>,
    results: Vec<String>,
    selection: Selection,
    awaiting_ack: bool,
    pending_query: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn awaiting_ack(&self) -> bool {
        self.awaiting_ack
    }

    /// Handles a typed query. While the surface has not acknowledged the
    /// previous delivery the query is parked, replacing any parked one.
    pub fn submit(&mut self, index: Option<&NameIndex>, text: String) -> Vec<HostMessage> {
        if self.awaiting_ack {
            tracing::trace!(query = %text, "parking query until ack");
            self.pending_query = Some(text);
            return Vec::new();
        }

        vec![self.dispatch(index, text)]
    }

    /// Handles the surface's acknowledgement and releases a parked query.
    pub fn acknowledge(&mut self, index: Option<&NameIndex>) -> Vec<HostMessage> {
        self.awaiting_ack = false;
        match self.pending_query.take() {
            Some(text) => vec![self.dispatch(index, text)],
            None => Vec::new(),
        }
    }

    /// Forgets cached results so the next query rescans a rebuilt index.
    pub fn invalidate(&mut self) {
        self.last_query = None;
    }

    pub fn navigate(&mut self, step: impl FnOnce(&mut Selection)) -> HostMessage {
        step(&mut self.selection);
        HostMessage::Selection {
            index: self.selection.cursor(),
        }
    }

    pub fn confirm(&self) -> Option<&str> {
        self.selection.confirm(&self.results)
    }

    fn dispatch(&mut self, index: Option<&NameIndex>, text: String) -> HostMessage {
        if self.last_query.as_deref() == Some(text.as_str()) {
            tracing::trace!(query = %text, "query unchanged, redelivering results");
        } else {
            self.results = index.map(|index| search(index, &text)).unwrap_or_default();
            self.last_query = Some(text);
        }

        self.selection.reset(self.results.len());
        self.awaiting_ack = true;
        HostMessage::FilesFound {
            files_found: self.results.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asearch_index::build;

    fn files_found(messages: &[HostMessage]) -> Vec<Vec<String>> {
        messages
            .iter()
            .filter_map(|message| match message {
                HostMessage::FilesFound { files_found } => Some(files_found.clone()),
                HostMessage::Selection { .. } => None,
            })
            .collect()
    }

    #[test]
    fn queries_wait_for_ack_and_coalesce() {
        let index = build(["/p/foo.txt", "/p/bar.txt"]).index;
        let mut panel = PanelState::new();

        let first = panel.submit(Some(&index), "f".to_string());
        assert_eq!(files_found(&first), vec![vec!["/p/foo.txt".to_string()]]);
        assert!(panel.awaiting_ack());

        assert!(panel.submit(Some(&index), "fo".to_string()).is_empty());
        assert!(panel.submit(Some(&index), "ba".to_string()).is_empty());

        let released = panel.acknowledge(Some(&index));
        assert_eq!(files_found(&released), vec![vec!["/p/bar.txt".to_string()]]);
        assert_eq!(panel.last_query(), Some("ba"));

        assert!(panel.acknowledge(Some(&index)).is_empty());
        assert!(!panel.awaiting_ack());
    }

    #[test]
    fn repeated_query_resets_selection() {
        let index = build(["/a/x1", "/a/x2", "/a/x3"]).index;
        let mut panel = PanelState::new();

        panel.submit(Some(&index), "x".to_string());
        panel.acknowledge(Some(&index));
        panel.navigate(Selection::move_down);
        assert_eq!(panel.selection().cursor(), 1);

        let again = panel.submit(Some(&index), "x".to_string());
        assert_eq!(files_found(&again)[0].len(), 3);
        assert_eq!(panel.selection().cursor(), 0);
    }

    #[test]
    fn no_index_yields_empty_results() {
        let mut panel = PanelState::new();
        let messages = panel.submit(None, "foo".to_string());
        assert_eq!(files_found(&messages), vec![Vec::<String>::new()]);
        assert_eq!(panel.confirm(), None);
    }

    #[test]
    fn navigation_reports_cursor() {
        let index = build(["/a/x1", "/a/x2", "/a/x3"]).index;
        let mut panel = PanelState::new();
        panel.submit(Some(&index), "x".to_string());

        assert_eq!(
            panel.navigate(Selection::move_up),
            HostMessage::Selection { index: 2 }
        );
        assert_eq!(panel.confirm(), Some("/a/x3"));
    }
}
