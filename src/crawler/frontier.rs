//! Frontier queue with deduplication
//!
//! The frontier is an arena of every URL ever enqueued, in discovery order,
//! plus a set of their canonical strings. A cursor splits the arena into
//! visited entries (before it) and pending entries (from it on), which gives
//! FIFO order and O(1) membership checks without a second copy of the queue.

use std::collections::HashSet;
use url::Url;

/// Breadth-first crawl frontier
///
/// Invariants:
/// - a URL is pushed at most once, whether or not it is ever popped
/// - the seen set only grows
/// - `pop` returns URLs in the order they were first pushed
#[derive(Debug, Default)]
pub struct Frontier {
    /// Every URL ever enqueued, in discovery order
    entries: Vec<Url>,

    /// Canonical string form of every arena entry
    seen: HashSet<String>,

    /// Arena slot of the next URL to pop
    cursor: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it has been seen before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now pending
    /// * `false` - The URL was already seen; nothing changed
    pub fn push(&mut self, url: Url) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }

        self.entries.push(url);
        true
    }

    /// Dequeues the oldest pending URL
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.entries.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(url)
    }

    /// Returns true if the URL has ever been enqueued
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(url.as_str())
    }

    /// Number of URLs waiting to be popped
    pub fn pending(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Returns true if no URLs are waiting
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }

    /// Number of distinct URLs ever enqueued
    pub fn seen_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_new_frontier_is_empty() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pending(), 0);
        assert_eq!(frontier.seen_count(), 0);
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(url("https://example.com/a")));
        assert!(frontier.push(url("https://example.com/b")));
        assert!(frontier.push(url("https://example.com/c")));

        assert_eq!(frontier.pop(), Some(url("https://example.com/a")));
        assert_eq!(frontier.pop(), Some(url("https://example.com/b")));
        assert!(frontier.push(url("https://example.com/d")));
        assert_eq!(frontier.pop(), Some(url("https://example.com/c")));
        assert_eq!(frontier.pop(), Some(url("https://example.com/d")));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_duplicate_push_is_noop() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(url("https://example.com/a")));
        assert!(!frontier.push(url("https://example.com/a")));

        assert_eq!(frontier.pending(), 1);
        assert_eq!(frontier.seen_count(), 1);
    }

    #[test]
    fn test_popped_url_stays_seen() {
        let mut frontier = Frontier::new();
        frontier.push(url("https://example.com/a"));
        frontier.pop();

        assert!(frontier.contains(&url("https://example.com/a")));
        assert!(!frontier.push(url("https://example.com/a")));
        assert!(frontier.is_empty());
        assert_eq!(frontier.seen_count(), 1);
    }

    #[test]
    fn test_contains() {
        let mut frontier = Frontier::new();
        frontier.push(url("https://example.com/a"));

        assert!(frontier.contains(&url("https://example.com/a")));
        assert!(!frontier.contains(&url("https://example.com/b")));
        assert!(!frontier.contains(&url("http://example.com/a")));
    }

    #[test]
    fn test_pending_and_seen_counts() {
        let mut frontier = Frontier::new();
        for p in ["/1", "/2", "/3", "/2", "/1"] {
            frontier.push(url(&format!("https://example.com{}", p)));
        }
        assert_eq!(frontier.seen_count(), 3);
        assert_eq!(frontier.pending(), 3);

        frontier.pop();
        assert_eq!(frontier.seen_count(), 3);
        assert_eq!(frontier.pending(), 2);
    }
}
