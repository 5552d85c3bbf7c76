// src/crawl/results.rs
// =============================================================================
// This module defines what the crawl produces: one record per downloaded
// image, plus the shared collection those records accumulate into.
//
// Image downloads finish in whatever order the network decides, on many
// concurrent branches at once. The RecordSink gives every branch a safe
// place to append results; no completed download may ever be dropped.
//
// Rust concepts:
// - #[derive(Serialize, Deserialize)]: Converts our struct to/from JSON
// - Arc<Mutex<Vec<...>>>: Shared, growable storage for concurrent writers
// =============================================================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

// One successfully downloaded image
//
// This is the record that ends up in index.json. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// The absolute URL the image was fetched from
    pub url: String,
    /// The page the image was referenced on
    pub page: String,
    /// The crawl depth of that page (start page = the CLI depth,
    /// counting down to 0 at the deepest level)
    pub depth: i64,
}

// The run-scoped collection of image records
//
// Like VisitedSet, cloning copies the handle, not the data: one sink is
// created per crawl run and shared by every download worker. Order of
// appended records is whatever order downloads complete in - callers
// must not read anything into it.
#[derive(Debug, Clone)]
pub struct RecordSink {
    inner: Arc<Mutex<Vec<ImageRecord>>>,
}

impl RecordSink {
    /// Creates an empty sink for a new crawl run
    pub fn new() -> Self {
        RecordSink {
            inner: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends one record
    ///
    /// Safe to call from any number of concurrent workers; each record
    /// is appended exactly once, as soon as its download completes.
    pub async fn append(&self, record: ImageRecord) {
        self.inner.lock().await.push(record);
    }

    /// Returns a copy of everything collected so far
    ///
    /// Called once, after the top-level crawl task has joined all of its
    /// children, to hand the final collection to the manifest writer.
    pub async fn snapshot(&self) -> Vec<ImageRecord> {
        self.inner.lock().await.clone()
    }
}

impl Default for RecordSink {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why both Serialize and Deserialize on ImageRecord?
//    - Serialize: to write index.json and the --json output
//    - Deserialize: so tests (and any future tooling) can read a
//      manifest back into typed records
//
// 2. Why snapshot() instead of handing out the Vec?
//    - The Vec lives behind a shared Mutex; handing out a reference
//      would mean handing out the lock too
//    - A clone at end-of-run is cheap and keeps the API simple
//
// 3. Could a completed download's record be lost?
//    - No: append() finishes before the download task completes, and the
//      engine joins every download task before anyone calls snapshot()
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str) -> ImageRecord {
        ImageRecord {
            url: url.to_string(),
            page: "https://example.com/".to_string(),
            depth: 0,
        }
    }

    #[tokio::test]
    async fn test_append_and_snapshot() {
        let sink = RecordSink::new();
        sink.append(record("https://example.com/a.png")).await;
        sink.append(record("https://example.com/b.png")).await;

        let records = sink.snapshot().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://example.com/a.png");
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_land() {
        let sink = RecordSink::new();

        let mut handles = Vec::new();
        for i in 0..32 {
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                sink.append(record(&format!("https://example.com/{}.png", i)))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every append from every task must be present, no matter the order
        let records = sink.snapshot().await;
        assert_eq!(records.len(), 32);
    }

    #[test]
    fn test_record_serializes_with_expected_keys() {
        let json = serde_json::to_value(record("https://example.com/a.png")).unwrap();
        assert_eq!(json["url"], "https://example.com/a.png");
        assert_eq!(json["page"], "https://example.com/");
        assert_eq!(json["depth"], 0);
    }
}
