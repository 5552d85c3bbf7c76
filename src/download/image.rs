// src/download/image.rs
// =============================================================================
// This module fetches a single image and saves it to disk.
//
// Key functionality:
// - Derives a filename from the image URL's path (with a hashed fallback
//   for URLs that have no usable final segment)
// - Streams the response body to the file chunk by chunk, so a huge image
//   never has to fit in memory
// - Reports every failure (network, HTTP status, filesystem) as an error
//   for the caller to log and skip - downloads are always best-effort
//
// Re-downloading the same URL overwrites the existing file. That's
// intentional: the same filename legitimately recurs across runs.
//
// Rust concepts:
// - async file I/O with tokio::fs
// - while let: Looping over chunks until the body is exhausted
// - Result<T, E> and the ? operator for error propagation
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::crawl::ImageRecord;

// Downloads one image into the destination folder
//
// Parameters:
//   client: shared HTTP client (connection pooling)
//   image_url: absolute URL of the image
//   page_url: the page the image was referenced on (recorded, not fetched)
//   depth: the crawl depth of that page (recorded)
//   folder: destination directory, created if absent
//
// Returns: the ImageRecord for a successful download, or the error that
// made it fail. The caller decides what a failure means (here: a warning).
pub async fn save_image(
    client: &Client,
    image_url: &Url,
    page_url: &str,
    depth: i64,
    folder: &Path,
) -> Result<ImageRecord> {
    // Make sure the destination exists before we open a file in it
    tokio::fs::create_dir_all(folder).await?;

    let filename = derive_filename(image_url);
    println!("  Downloading: {} -> {}", image_url, filename);

    let mut response = client.get(image_url.clone()).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    // Stream the body to disk one chunk at a time instead of buffering
    // the whole image in memory first
    let filepath = folder.join(&filename);
    let mut file = tokio::fs::File::create(&filepath).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(ImageRecord {
        url: image_url.to_string(),
        page: page_url.to_string(),
        depth,
    })
}

// Derives the on-disk filename for an image URL
//
// Normal case: the final segment of the URL path
//   https://example.com/img/photo.png -> "photo.png"
//   https://example.com/img/photo.png?v=2 -> "photo.png" (query ignored)
//
// Fallback case: the path has no final segment (ends in '/', or is just
// the root). Then we hash the full URL so that two different path-less
// URLs can never silently overwrite each other:
//   https://example.com/ -> "image_<16 hex chars of sha256>.jpg"
//
// The hash is stable: the same URL maps to the same filename on every run.
pub fn derive_filename(image_url: &Url) -> String {
    let last_segment = image_url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");

    if last_segment.is_empty() {
        let digest = Sha256::digest(image_url.as_str().as_bytes());
        format!("image_{}.jpg", &hex::encode(digest)[..16])
    } else {
        last_segment.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does response.chunk() do?
//    - Reads the next piece of the body as it arrives from the network
//    - Returns Ok(Some(bytes)) while there's data, Ok(None) at the end
//    - Combined with write_all() this is a classic streaming copy loop
//
// 2. Why sha256 for the fallback name?
//    - The fallback must be (a) stable across runs and (b) different for
//      different URLs
//    - A cryptographic hash gives us both; 16 hex characters (64 bits)
//      of it is far more than enough to keep distinct URLs apart
//
// 3. Why does path_segments() return an Option?
//    - URLs like mailto: have no path that can be split into segments
//    - For http(s) URLs it's always Some, but the type makes us handle
//      the general case anyway
//
// 4. Why flush() before returning?
//    - write_all() may leave bytes in an internal buffer
//    - flush() pushes them to the OS so the file is complete the moment
//      the record is reported
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_filename_is_last_path_segment() {
        assert_eq!(
            derive_filename(&url("https://example.com/img/photo.png")),
            "photo.png"
        );
    }

    #[test]
    fn test_query_string_is_ignored() {
        assert_eq!(
            derive_filename(&url("https://example.com/img/photo.png?v=2&size=large")),
            "photo.png"
        );
    }

    #[test]
    fn test_fallback_for_root_url() {
        let name = derive_filename(&url("https://example.com/"));
        assert!(name.starts_with("image_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_fallback_for_trailing_slash() {
        let name = derive_filename(&url("https://example.com/gallery/"));
        assert!(name.starts_with("image_"));
    }

    #[test]
    fn test_fallback_is_stable() {
        let a = derive_filename(&url("https://example.com/"));
        let b = derive_filename(&url("https://example.com/"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_urls_get_distinct_fallbacks() {
        // Two different path-less URLs must never share a filename -
        // that would silently overwrite one image with the other
        let a = derive_filename(&url("https://example.com/"));
        let b = derive_filename(&url("https://example.com/gallery/"));
        let c = derive_filename(&url("https://other.example.com/"));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }
}
