// src/extract/html.rs
// =============================================================================
// This module extracts image and link references from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We pull out two kinds of references per page:
// - Every <img src="..."> (the images to download)
// - Every <a href="..."> (the links to maybe crawl deeper)
//
// The values are returned verbatim - relative, absolute, weird, whatever
// the page author wrote. No filtering happens at this layer.
//
// Rust concepts:
// - Iterators: For processing collections
// - if let: Concise handling of Option values
// =============================================================================

use scraper::{Html, Selector};

// The raw references found on one page
//
// Both vectors hold attribute values exactly as written in the markup
#[derive(Debug, Default, PartialEq)]
pub struct PageRefs {
    /// Every <img src> value on the page, in document order
    pub images: Vec<String>,
    /// Every <a href> value on the page, in document order
    pub links: Vec<String>,
}

// Extracts all image and link references from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: PageRefs with the raw src/href attribute values
//
// Example:
//   html = "<img src='/a.png'><a href='/docs'>Docs</a>"
//   result = PageRefs { images: ["/a.png"], links: ["/docs"] }
pub fn page_refs(html: &str) -> PageRefs {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create CSS selectors for the two element kinds we care about
    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selectors are constants and known to be valid
    let img_selector = Selector::parse("img[src]").unwrap();
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut refs = PageRefs::default();

    // Select all <img> elements with a src attribute
    for element in document.select(&img_selector) {
        if let Some(src) = element.value().attr("src") {
            refs.images.push(src.to_string());
        }
    }

    // Select all <a> elements with an href attribute
    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            refs.links.push(href.to_string());
        }
    }

    refs
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is scraper and how does it work?
//    - scraper parses HTML into a tree structure (DOM)
//    - You can then query it using CSS selectors (like jQuery or querySelector)
//    - "img[src]" means "all <img> tags that have a src attribute"
//
// 2. Why return raw strings instead of parsed URLs?
//    - A src/href value on its own is meaningless - it needs the page's
//      URL as a base to resolve against
//    - The caller owns that context, so the caller does the resolving
//
// 3. What does .value() do?
//    - element is an ElementRef (reference to an HTML element)
//    - .value() gets the underlying Element
//    - .attr("src") gets the value of the src attribute
//
// 4. Why unwrap() on the selectors?
//    - Selector::parse can fail if the CSS selector is invalid
//    - Our selectors are constant and known to be valid
//    - If it fails, the program should panic (programmer error)
//    - Generally avoid unwrap() on user input!
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_images_and_links() {
        let html = r#"
            <html><body>
                <img src="/a.png">
                <img src="https://cdn.example.com/b.jpg">
                <a href="/other">Other</a>
            </body></html>
        "#;
        let refs = page_refs(html);
        assert_eq!(refs.images, vec!["/a.png", "https://cdn.example.com/b.jpg"]);
        assert_eq!(refs.links, vec!["/other"]);
    }

    #[test]
    fn test_values_are_verbatim() {
        // Whatever the author wrote comes back untouched, even relative
        // paths and anchors - filtering is not this layer's job
        let html = r##"<img src="../up.gif"><a href="#top">Top</a>"##;
        let refs = page_refs(html);
        assert_eq!(refs.images, vec!["../up.gif"]);
        assert_eq!(refs.links, vec!["#top"]);
    }

    #[test]
    fn test_tags_without_attributes_are_ignored() {
        let html = r#"<img alt="no src here"><a name="anchor">no href</a>"#;
        let refs = page_refs(html);
        assert!(refs.images.is_empty());
        assert!(refs.links.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let refs = page_refs("<html><body></body></html>");
        assert_eq!(refs, PageRefs::default());
    }

    #[test]
    fn test_duplicate_references_are_kept() {
        // The same image twice on one page is two references; whether to
        // deduplicate is a policy decision that lives upstream
        let html = r#"<img src="/a.png"><img src="/a.png">"#;
        let refs = page_refs(html);
        assert_eq!(refs.images.len(), 2);
    }
}
