use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Append-only set of URLs already queued for discovery.
/// Shared by every worker for the lifetime of one crawl.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `url` if absent. Returns `true` only for the caller that inserted it.
    pub fn try_mark_visited(&self, url: &str) -> bool {
        let mut urls = self.urls.lock().unwrap_or_else(PoisonError::into_inner);
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_second_mark_returns_false() {
        let visited = VisitedSet::new();
        assert!(visited.try_mark_visited("http://a.test/"));
        assert!(!visited.try_mark_visited("http://a.test/"));
        assert!(!visited.try_mark_visited("http://a.test/"));
        assert_eq!(visited.len(), 1);
    }

    /// No canonicalization: these are three distinct entries
    #[test]
    fn test_syntactic_variants_are_distinct() {
        let visited = VisitedSet::new();
        assert!(visited.try_mark_visited("http://a.test"));
        assert!(visited.try_mark_visited("http://a.test/"));
        assert!(visited.try_mark_visited("HTTP://a.test/"));
        assert_eq!(visited.len(), 3);
        assert!(visited.contains("http://a.test"));
        assert!(!visited.contains("http://b.test"));
    }

    #[test]
    fn test_exactly_one_concurrent_winner() {
        let visited = Arc::new(VisitedSet::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let visited = Arc::clone(&visited);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    for i in 0..100 {
                        if visited.try_mark_visited(&format!("http://race.test/{}", i)) {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 100);
        assert_eq!(visited.len(), 100);
    }
}
