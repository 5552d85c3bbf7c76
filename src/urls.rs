// src/urls.rs
// =============================================================================
// This module resolves and classifies URLs for the crawler.
//
// We use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative references against a base URL (like a browser does)
// - Compare the network-location (host + port) of two URLs
//
// Everything in here is a pure function: no I/O, no shared state. A
// reference that can't be resolved is simply "not a link" - the caller
// skips it and moves on.
//
// Rust concepts:
// - Option<T>: For operations that may produce nothing
// - Pattern matching with matches!
// - Borrowing: All functions take references, nothing is consumed
// =============================================================================

use url::Url;

// Resolves a possibly-relative reference to an absolute URL
//
// Parameters:
//   base: the URL of the page the reference appeared on
//   reference: the raw src/href value (might be relative, might be absolute)
//
// Returns: Some(absolute_url) or None if the reference is not resolvable
//
// Examples:
//   base = "https://example.com/page"
//   reference = "/img/logo.png" -> Some("https://example.com/img/logo.png")
//   reference = "../pics/a.jpg" -> Some("https://example.com/pics/a.jpg")
//   reference = "https://other.com/b.png" -> Some("https://other.com/b.png")
//   reference = "#top" -> None (same-page anchor, nothing to fetch)
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    // Skip anchors and non-fetchable pseudo-schemes up front
    if reference.starts_with('#')
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("javascript:")
        || reference.starts_with("data:")
    {
        return None;
    }

    // Url::join handles both cases: an absolute reference replaces the
    // base entirely, a relative one is resolved against it
    match base.join(reference) {
        Ok(mut url) => {
            // Drop the fragment so "/page#gallery" and "/page" normalize
            // to the same URL - a fragment never changes what the server
            // sends back
            url.set_fragment(None);
            Some(url)
        }
        Err(_) => None, // Malformed reference, skip it
    }
}

// Checks whether two URLs share the same network location (host + port)
//
// This is what keeps the crawler on the website it started on.
//
// We compare host_str() rather than domain() because domain() returns
// None for IP-address hosts (e.g., http://127.0.0.1:8080), which are
// perfectly crawlable. port_or_known_default() treats an explicit :443
// on an https URL the same as no port at all.
pub fn same_domain(a: &Url, b: &Url) -> bool {
    a.host_str().is_some()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

// Checks if a URL is something we can actually fetch over the network
//
// We only speak HTTP/HTTPS; anything else (ftp:, file:, ...) is skipped
pub fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the url crate?
//    - Handles URL parsing and manipulation
//    - Url::parse() parses a string into a Url struct
//    - url.join() resolves relative URLs (like a browser does)
//    - Example: "https://example.com/a/" + "../b" = "https://example.com/b"
//
// 2. Why Option<Url> return type?
//    - Some references are invalid or not fetchable at all
//    - Returning Option lets us represent "no link here"
//    - Callers use filter_map() to keep only the real links
//
// 3. What is set_fragment(None)?
//    - The fragment is the part after '#' in a URL
//    - The server never sees it, so two URLs differing only in the
//      fragment are the same page
//    - Stripping it keeps our visited-set keys canonical
//
// 4. What is matches!?
//    - A macro that tests whether a value fits a pattern
//    - matches!(x, "http" | "https") reads like a tiny match statement
//      that returns a bool
// -----------------------------------------------------------------------------
