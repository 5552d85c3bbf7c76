// src/crawl/engine.rs
// =============================================================================
// This module implements the recursive, depth-bounded crawl itself.
//
// How one page is processed:
// 1. Give up immediately if depth went below zero or the URL was already
//    claimed by another branch (the two base cases)
// 2. Fetch the page HTML
// 3. Extract image and link references
// 4. Fan out: download every image AND recursively crawl every
//    same-domain link (with depth - 1), all concurrently
// 5. Join: wait until every download and every child crawl finishes
//
// Concurrency is bounded twice:
// - buffer_unordered(n) caps how many futures one page keeps in flight
// - a run-global Semaphore caps HTTP requests across the whole recursion
//   tree, so a wide site with deep links can't blow up resource usage
//
// The semaphore permit is only ever held across a single HTTP request,
// never across a recursive call - a parent waiting on its children while
// holding a permit would starve the pool.
//
// Rust concepts:
// - BoxFuture: Recursion in async fns needs a heap-allocated future
// - Streams: buffer_unordered for bounded concurrent fan-out
// - Semaphore: A counted pool of permits for rate-free resource control
// =============================================================================

use anyhow::{anyhow, Result};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

use super::{ImageRecord, RecordSink, VisitedSet};
use crate::download;
use crate::extract;
use crate::urls;

// Crawls a website and downloads every image it references
//
// This is the top-level entry point. It owns the construction of all
// per-run shared state (visited set, record sink, HTTP client, permit
// pool) - nothing is global, nothing leaks across runs.
//
// Parameters:
//   start_url: where to begin (must be an absolute http/https URL)
//   depth: how many link levels to follow (0 = just the start page)
//   folder: destination directory for the downloaded images
//   concurrency: bound on in-flight HTTP requests
//
// Returns: every ImageRecord collected by the run, in completion order
//
// Fails fast (before any network traffic) on a malformed start URL or a
// scheme we can't fetch. Everything after that is best-effort: failed
// pages and failed downloads are warnings, never errors.
pub async fn crawl_images(
    start_url: &str,
    depth: i64,
    folder: &Path,
    concurrency: usize,
) -> Result<Vec<ImageRecord>> {
    // Parse and validate the starting URL
    let root = Url::parse(start_url).map_err(|e| anyhow!("Invalid URL '{}': {}", start_url, e))?;

    if !urls::is_fetchable(&root) {
        return Err(anyhow!(
            "Unsupported URL scheme '{}': only http and https can be crawled",
            root.scheme()
        ));
    }

    // Create one HTTP client for the whole run (connection pooling).
    // The 10 second timeout bounds how long a hung fetch can stall its
    // branch of the crawl.
    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let crawler = Crawler {
        client,
        root: root.clone(),
        visited: VisitedSet::new(),
        records: RecordSink::new(),
        permits: Arc::new(Semaphore::new(concurrency.max(1))),
        folder: folder.to_path_buf(),
        fanout: concurrency.max(1),
    };

    // Run the whole recursion tree; this returns only once every page
    // and every image download underneath the start URL has completed
    crawler.crawl_page(root, depth).await;

    println!("📄 Visited {} page(s)", crawler.visited.len().await);

    Ok(crawler.records.snapshot().await)
}

// All the state one crawl run shares across its concurrent branches
//
// The struct itself is never cloned - recursive calls borrow it, and the
// trackers inside hand out cheap cloneable handles where needed.
struct Crawler {
    client: Client,
    /// The starting URL; links are only followed if they stay on its domain
    root: Url,
    visited: VisitedSet,
    records: RecordSink,
    /// Run-global bound on in-flight HTTP requests
    permits: Arc<Semaphore>,
    folder: PathBuf,
    /// Per-page bound on concurrently polled futures
    fanout: usize,
}

impl Crawler {
    // Processes one (url, depth) crawl task and everything beneath it
    //
    // An async fn can't call itself directly (the compiler can't size an
    // infinitely nested future), so this returns a BoxFuture instead.
    fn crawl_page(&self, url: Url, depth: i64) -> BoxFuture<'_, ()> {
        async move {
            // Depth only goes below zero by recursive decrement; such a
            // task does no work at all
            if depth < 0 {
                return;
            }

            // The atomic claim is what terminates cycles and prevents two
            // branches from crawling the same page. Losing the claim is
            // normal and silent
            if !self.visited.claim(url.as_str()).await {
                return;
            }

            println!("  Crawling [depth {}]: {}", depth, url);

            // Fetch the page; a dead page costs us its subtree and nothing else
            let html = match self.fetch_page(&url).await {
                Ok(html) => html,
                Err(e) => {
                    eprintln!("  Warning: Failed to fetch {}: {}", url, e);
                    return;
                }
            };

            let refs = extract::page_refs(&html);

            // Fan-out part 1: image downloads. Each success is appended to
            // the sink the moment it completes, not batched at the end
            let image_urls: Vec<Url> = refs
                .images
                .iter()
                .filter_map(|src| urls::resolve(&url, src))
                .filter(urls::is_fetchable)
                .collect();

            let downloads = stream::iter(
                image_urls
                    .into_iter()
                    .map(|image_url| self.download_image(image_url, &url, depth)),
            )
            .buffer_unordered(self.fanout)
            .for_each(|_| async {});

            // Fan-out part 2: child crawls. At depth 0 links are ignored
            // entirely - the images above still get downloaded
            let child_links: Vec<Url> = if depth > 0 {
                refs.links
                    .iter()
                    .filter_map(|href| urls::resolve(&url, href))
                    .filter(|link| urls::is_fetchable(link) && urls::same_domain(&self.root, link))
                    .collect()
            } else {
                Vec::new()
            };

            let children = stream::iter(
                child_links
                    .into_iter()
                    .map(|link| self.crawl_page(link, depth - 1)),
            )
            .buffer_unordered(self.fanout)
            .for_each(|_| async {});

            // Join: downloads and child crawls run concurrently with no
            // ordering between them; this task completes only when both
            // sets have fully drained
            futures::join!(downloads, children);
        }
        .boxed()
    }

    // Fetches a page's HTML under a global request permit
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        // The permit is released when _permit drops, i.e. as soon as the
        // body has been read - before any recursion happens
        let _permit = self.permits.acquire().await.unwrap();

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {}", response.status()));
        }

        Ok(response.text().await?)
    }

    // Downloads one image and records the result
    //
    // A failed download is a warning and a missing record, nothing more -
    // sibling downloads and crawls are unaffected
    async fn download_image(&self, image_url: Url, page: &Url, depth: i64) {
        let _permit = self.permits.acquire().await.unwrap();

        match download::save_image(&self.client, &image_url, page.as_str(), depth, &self.folder)
            .await
        {
            Ok(record) => self.records.append(record).await,
            Err(e) => eprintln!("  Warning: Failed to download {}: {}", image_url, e),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BoxFuture?
//    - An async fn's future type contains the futures it awaits
//    - A recursive async fn would therefore contain itself - an
//      infinitely sized type
//    - Boxing (heap-allocating) the future breaks the cycle; .boxed()
//      from the futures crate does the wrapping
//
// 2. What is buffer_unordered?
//    - Takes a stream of futures and polls up to N of them at once
//    - Results come out in completion order, not submission order
//    - It's like Promise.all() with a concurrency limit
//
// 3. What is futures::join!?
//    - Runs several futures concurrently and waits for all of them
//    - Here it overlaps "download this page's images" with "crawl this
//      page's links" - neither waits for the other
//
// 4. Why acquire a Semaphore permit around each request?
//    - buffer_unordered only limits one page's fan-out
//    - A deep crawl has many pages expanding at once; the semaphore is
//      the single run-wide ceiling on simultaneous HTTP work
//    - unwrap() on acquire is fine: it only errors if the semaphore is
//      closed, and we never close it
//
// 5. Why does losing the claim return silently?
//    - It means another branch got there first, which is the expected
//      outcome on any page with more than one incoming link
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Each test writes into its own folder under the OS temp dir so
    // parallel tests never collide
    fn temp_folder(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("image-harvester-test-{}-{}", name, std::process::id()))
    }

    async fn mount_page(server: &MockServer, route: &str, html: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
            .mount(server)
            .await;
    }

    async fn mount_image(server: &MockServer, route: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89u8, 0x50, 0x4e, 0x47]))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_depth_zero_downloads_images_but_ignores_links() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            r#"<html><body>
                <img src="/a.png">
                <img src="/b.png">
                <a href="/other">other</a>
            </body></html>"#,
        )
        .await;
        mount_image(&server, "/a.png").await;
        mount_image(&server, "/b.png").await;

        // At depth 0 the link must never be fetched
        Mock::given(method("GET"))
            .and(path("/other"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let folder = temp_folder("depth-zero");
        let _ = std::fs::remove_dir_all(&folder);

        let records = crawl_images(&server.uri(), 0, &folder, 8).await.unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.depth, 0);
            assert_eq!(record.page, format!("{}/", server.uri()));
        }
        let mut urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        urls.sort();
        assert!(urls[0].ends_with("/a.png"));
        assert!(urls[1].ends_with("/b.png"));

        // The bytes really landed on disk under the derived names
        assert!(folder.join("a.png").exists());
        assert!(folder.join("b.png").exists());

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_self_link_is_expanded_exactly_once() {
        let server = MockServer::start().await;

        // The page links to itself; the claim must terminate the cycle
        // after a single expansion (expect(1) is verified on server drop)
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<a href="/">home</a>"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let folder = temp_folder("self-link");
        let _ = std::fs::remove_dir_all(&folder);

        let records = crawl_images(&server.uri(), 1, &folder, 8).await.unwrap();
        assert!(records.is_empty());

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_diamond_links_expand_shared_page_once() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            r#"<a href="/left"></a><a href="/right"></a>"#,
        )
        .await;
        mount_page(&server, "/left", r#"<a href="/shared"></a>"#).await;
        mount_page(&server, "/right", r#"<a href="/shared"></a>"#).await;

        // Two concurrent branches both discover /shared; the claim lets
        // exactly one of them expand it
        Mock::given(method("GET"))
            .and(path("/shared"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<img src="/gem.png">"#),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_image(&server, "/gem.png").await;

        let folder = temp_folder("diamond");
        let _ = std::fs::remove_dir_all(&folder);

        let records = crawl_images(&server.uri(), 2, &folder, 8).await.unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].url.ends_with("/gem.png"));
        assert_eq!(records[0].depth, 0);

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_cross_domain_links_are_never_followed() {
        let server = MockServer::start().await;
        let offsite = MockServer::start().await;

        // A second mock server has a different port, hence a different
        // network location - its page must never be requested
        mount_page(
            &server,
            "/",
            &format!(r#"<a href="{}/offsite">elsewhere</a>"#, offsite.uri()),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/offsite"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&offsite)
            .await;

        let folder = temp_folder("cross-domain");
        let _ = std::fs::remove_dir_all(&folder);

        let records = crawl_images(&server.uri(), 3, &folder, 8).await.unwrap();
        assert!(records.is_empty());

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_failed_download_does_not_block_siblings() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            r#"<img src="/ok.png"><img src="/missing.png">"#,
        )
        .await;
        mount_image(&server, "/ok.png").await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let folder = temp_folder("failed-sibling");
        let _ = std::fs::remove_dir_all(&folder);

        let records = crawl_images(&server.uri(), 0, &folder, 8).await.unwrap();

        // The 404 contributes no record; its sibling is unaffected
        assert_eq!(records.len(), 1);
        assert!(records[0].url.ends_with("/ok.png"));

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_depth_one_follows_links_and_decrements_depth() {
        let server = MockServer::start().await;
        mount_page(&server, "/", r#"<a href="/gallery">gallery</a>"#).await;
        mount_page(&server, "/gallery", r#"<img src="/pic.png">"#).await;
        mount_image(&server, "/pic.png").await;

        let folder = temp_folder("depth-one");
        let _ = std::fs::remove_dir_all(&folder);

        let records = crawl_images(&server.uri(), 1, &folder, 8).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].depth, 0);
        assert!(records[0].page.ends_with("/gallery"));
        assert!(records[0].url.ends_with("/pic.png"));

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_failed_page_fetch_is_not_fatal() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            r#"<a href="/dead"></a><a href="/alive"></a>"#,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/dead"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_page(&server, "/alive", r#"<img src="/pic.png">"#).await;
        mount_image(&server, "/pic.png").await;

        let folder = temp_folder("dead-page");
        let _ = std::fs::remove_dir_all(&folder);

        // The 500 page contributes nothing but doesn't abort its sibling
        let records = crawl_images(&server.uri(), 1, &folder, 8).await.unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].page.ends_with("/alive"));

        let _ = std::fs::remove_dir_all(&folder);
    }

    #[tokio::test]
    async fn test_negative_depth_task_is_a_noop() {
        // Depth below zero exists only via recursive decrement; such a
        // task must return before claiming or fetching anything. The URL
        // points nowhere reachable - if a fetch were attempted, the test
        // would surface it as a long timeout
        let crawler = Crawler {
            client: Client::new(),
            root: Url::parse("http://127.0.0.1:1/").unwrap(),
            visited: VisitedSet::new(),
            records: RecordSink::new(),
            permits: Arc::new(Semaphore::new(1)),
            folder: temp_folder("noop"),
            fanout: 1,
        };

        crawler
            .crawl_page(Url::parse("http://127.0.0.1:1/").unwrap(), -1)
            .await;

        assert_eq!(crawler.visited.len().await, 0);
        assert!(crawler.records.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_start_url_fails_fast() {
        let folder = temp_folder("invalid-url");
        assert!(crawl_images("not a url", 0, &folder, 8).await.is_err());
        assert!(crawl_images("ftp://example.com/", 0, &folder, 8)
            .await
            .is_err());
        // Fail-fast means nothing was created on disk either
        assert!(!folder.exists());
    }
}
