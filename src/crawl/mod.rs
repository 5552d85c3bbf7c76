// src/crawl/mod.rs
// =============================================================================
// This module contains the crawl engine and its shared run state.
//
// Submodules:
// - engine: The recursive, depth-bounded, concurrent traversal
// - visited: Tracks which URLs have been claimed (cycle protection)
// - results: The ImageRecord type and the shared record sink
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// One crawl run = one call to crawl_images(). That call constructs the
// visited set and the record sink, shares them with every concurrent
// branch it spawns, and returns only after all branches have joined.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod engine;
mod results;
mod visited;

// Re-export public items from submodules
// This lets users write `crawl::crawl_images()` instead of
// `crawl::engine::crawl_images()`
pub use engine::crawl_images;
pub use results::{ImageRecord, RecordSink};
pub use visited::VisitedSet;

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why three files instead of one?
//    - visited and results are the only two structures touched by more
//      than one concurrent branch; isolating them makes the locking
//      story easy to audit
//    - engine holds the control flow and nothing else
//
// 2. Who owns what?
//    - crawl_images() creates the trackers and owns them for the run
//    - Recursive calls and download workers get cloned handles, never
//      fresh containers - so separate runs can never share state
// -----------------------------------------------------------------------------
