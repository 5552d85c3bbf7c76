// src/extract/mod.rs
// =============================================================================
// This module extracts image and link references from fetched pages.
//
// Submodules:
// - html: Pulls <img src> and <a href> attributes out of an HTML document
//
// This file (mod.rs) is the module root - it exports the public API that
// the crawl engine uses.
//
// The extractor is deliberately dumb: it returns the raw attribute values
// exactly as they appear in the markup. Resolving them to absolute URLs
// and deciding which ones to follow is the crawl engine's job.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod html;

// Re-export public items from submodules
// This lets users write `extract::page_refs()` instead of
// `extract::html::page_refs()`
pub use html::{page_refs, PageRefs};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When you have a directory as a module (like src/extract/), the
//      mod.rs file inside it is the module root
//    - It's like index.js in JavaScript or __init__.py in Python
//
// 2. Why keep extraction separate from crawling?
//    - The extractor is a pure function over a string of HTML
//    - That makes it trivially testable without any network
//    - The engine composes it with fetching and URL resolution
// -----------------------------------------------------------------------------
