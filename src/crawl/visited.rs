// src/crawl/visited.rs
// =============================================================================
// This module tracks which URLs the crawl has already claimed.
//
// Many branches of the crawl run at the same time, and web pages love to
// link back to each other (cycles) or to share a common target (diamonds).
// Without a shared record of what's been claimed, two branches could both
// decide to crawl the same page, or the crawl could loop forever.
//
// The fix is one atomic operation: claim(). It checks membership AND
// inserts in a single step while holding the lock, so exactly one caller
// ever wins a given URL. There is no way to un-claim; entries live for
// the whole run.
//
// Rust concepts:
// - Arc: Shared ownership across concurrent tasks
// - Mutex: Exclusive access to the data inside
// - HashSet: A set of unique items with O(1) lookup
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

// A concurrency-safe set of URLs already claimed for crawling
//
// Cloning the tracker clones the handle, not the set - every clone sees
// and mutates the same underlying data. One tracker is created per crawl
// run and handed down through every recursive call.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    /// Creates an empty tracker for a new crawl run
    pub fn new() -> Self {
        VisitedSet {
            inner: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Atomically claims a URL for crawling
    ///
    /// Returns true iff this call inserted the URL - the caller is now
    /// the one and only branch allowed to crawl it this run. Returns
    /// false if this or any other branch claimed it earlier.
    ///
    /// The check and the insert happen under one lock acquisition, so
    /// two branches can never both see "not present" and proceed.
    pub async fn claim(&self, url: &str) -> bool {
        let mut seen = self.inner.lock().await;
        // HashSet::insert returns true only when the value was newly added
        seen.insert(url.to_string())
    }

    /// How many URLs have been claimed so far
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is Arc<Mutex<...>>?
//    - Arc = Atomically Reference Counted pointer, lets many tasks share
//      one value
//    - Mutex = mutual exclusion, only one task can touch the data at a time
//    - Together they're the standard recipe for shared mutable state in
//      async Rust
//
// 2. Why tokio's Mutex and not std's?
//    - We lock inside async functions; tokio's Mutex yields to the
//      runtime while waiting instead of blocking the whole thread
//
// 3. Why does claim() take &self and not &mut self?
//    - The mutability lives inside the Mutex (interior mutability)
//    - That's what lets many clones of the handle mutate the same set
//
// 4. Why is there no remove()?
//    - A claim is forever (within one run) on purpose: releasing a URL
//      would reopen the door to cycles and duplicate crawling
// -----------------------------------------------------------------------------
