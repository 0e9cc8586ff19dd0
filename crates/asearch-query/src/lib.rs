mod selection;

use asearch_index::NameIndex;
use serde::{Deserialize, Serialize};

pub use selection::Selection;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Truncates the ordered results; `None` returns every match.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
        }
    }
}

pub trait QueryEngine {
    fn search(&self, request: &SearchRequest) -> Vec<String>;
}

impl QueryEngine for NameIndex {
    fn search(&self, request: &SearchRequest) -> Vec<String> {
        let mut hits = search(self, &request.query);
        if let Some(limit) = request.limit {
            hits.truncate(limit);
        }
        hits
    }
}

/// Locations whose name contains `query`, ignoring case, in index order.
///
/// An empty query matches nothing.
pub fn search(index: &NameIndex, query: &str) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let hits: Vec<String> = index
        .iter()
        .filter(|entry| entry.name_lc.contains(needle.as_str()))
        .map(|entry| entry.location.clone())
        .collect();

    tracing::trace!(query, hits = hits.len(), scanned = index.len(), "name search");
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use asearch_index::build;

    fn sample() -> NameIndex {
        build([
            "/p/foo.txt",
            "/p/bar.txt",
            "/q/foobar.txt",
            "/q/Notes.MD",
            "/r/a.c",
            "/r/abc",
        ])
        .index
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(search(&sample(), "").is_empty());
        assert!(search(&NameIndex::new(), "").is_empty());
    }

    #[test]
    fn matches_substring_in_build_order() {
        assert_eq!(
            search(&sample(), "foo"),
            vec!["/p/foo.txt".to_string(), "/q/foobar.txt".to_string()]
        );
        assert_eq!(
            search(&sample(), "bar"),
            vec!["/p/bar.txt".to_string(), "/q/foobar.txt".to_string()]
        );
        assert!(search(&sample(), "zzz").is_empty());
    }

    #[test]
    fn query_case_is_ignored() {
        let index = build(["dir/Report.PDF"]).index;
        assert_eq!(search(&index, "REPORT"), vec!["dir/Report.PDF".to_string()]);
        assert_eq!(search(&sample(), "notes.md"), vec!["/q/Notes.MD".to_string()]);
    }

    #[test]
    fn query_is_literal_not_a_pattern() {
        assert_eq!(search(&sample(), "a.c"), vec!["/r/a.c".to_string()]);
        assert!(search(&sample(), "f.*r").is_empty());
    }

    #[test]
    fn results_are_sound_and_complete() {
        let index = sample();
        for query in ["o", "txt", ".", "b", "x"] {
            let hits = search(&index, query);
            let expected: Vec<String> = index
                .iter()
                .filter(|entry| entry.name_lc.contains(query))
                .map(|entry| entry.location.clone())
                .collect();
            assert_eq!(hits, expected, "query {query:?}");
        }
    }

    #[test]
    fn repeated_search_is_identical() {
        let index = sample();
        assert_eq!(search(&index, "t"), search(&index, "t"));
    }

    #[test]
    fn request_limit_truncates_after_ordering() {
        let index = sample();
        let mut request = SearchRequest::new("txt");
        request.limit = Some(2);
        assert_eq!(
            index.search(&request),
            vec!["/p/foo.txt".to_string(), "/p/bar.txt".to_string()]
        );
        assert_eq!(index.search(&SearchRequest::new("txt")).len(), 3);
    }
}
