// src/download/mod.rs
// =============================================================================
// This module downloads images to disk.
//
// Submodules:
// - image: Fetches one image URL and streams the bytes into the
//   destination folder under a derived filename
//
// This file (mod.rs) is the module root - it exports the public API that
// the crawl engine uses.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod image;

// Re-export public items from submodules
// This lets users write `download::save_image()` instead of
// `download::image::save_image()`
pub use image::{derive_filename, save_image};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is derive_filename public too?
//    - Filename derivation is a contract of its own (which file will a
//      given URL land in?) and gets its own unit tests
// -----------------------------------------------------------------------------
