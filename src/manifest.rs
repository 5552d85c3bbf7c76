// src/manifest.rs
// =============================================================================
// This module writes the crawl manifest: a single index.json file in the
// destination folder describing every image the run downloaded.
//
// Schema:
//   {"images": [{"url": "...", "page": "...", "depth": 0}, ...]}
//
// The file is fully overwritten on every run - the manifest always
// describes exactly one run, never an accumulation of several.
//
// Rust concepts:
// - Lifetime parameters: Manifest borrows the records instead of cloning
// - serde attribute-free derive: The field name IS the JSON key
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::crawl::ImageRecord;

// The serialized shape of a crawl run's results
//
// A borrowing wrapper: we only ever need it for the duration of one
// to_string call, so there's no reason to clone the record list
#[derive(Serialize)]
struct Manifest<'a> {
    images: &'a [ImageRecord],
}

// Writes index.json into the destination folder
//
// Creates the folder if the crawl downloaded nothing (an empty manifest
// is still a valid, useful result). Any filesystem or serialization
// error propagates to the caller.
pub fn save_index(folder: &Path, records: &[ImageRecord]) -> Result<()> {
    fs::create_dir_all(folder)?;

    let json = serde_json::to_string_pretty(&Manifest { images: records })?;
    fs::write(folder.join("index.json"), json)?;

    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the 'a in Manifest<'a>?
//    - A lifetime parameter: the struct holds a borrow, and the compiler
//      checks the borrow can't outlive the records it points at
//    - &'a [ImageRecord] is a slice - a view into the Vec, no copy
//
// 2. Why std::fs here when the rest of the crate uses tokio::fs?
//    - The manifest is written exactly once, after all concurrent work
//      has finished - there's nothing left to overlap it with
//
// 3. Why overwrite instead of merge?
//    - index.json describes one run; merging old and new records would
//      claim images exist that the latest run never saw
// -----------------------------------------------------------------------------
