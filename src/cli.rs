// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - PathBuf: An owned filesystem path (the String of paths)
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "image-harvester",
    version = "0.1.0",
    about = "A CLI tool to crawl a website and download every image it references",
    long_about = "image-harvester crawls a website starting from a URL, follows same-domain \
                  links up to a bounded depth, downloads every image it finds along the way, \
                  and writes an index.json manifest mapping each image to its source page."
)]
pub struct Cli {
    /// Starting URL for the crawl (e.g., https://example.com)
    ///
    /// This is a positional argument (required, no flag needed)
    pub start_url: String,

    /// How many levels of links to follow from the starting page
    ///
    /// Depth 0 = only download images on the starting page
    /// Depth 1 = starting page + every page it links to
    /// etc.
    ///
    /// This is also positional. The range(0..) parser rejects negative
    /// values before any crawling starts.
    #[arg(value_parser = clap::value_parser!(i64).range(0..))]
    pub depth: i64,

    /// Folder where downloaded images and index.json are written
    ///
    /// #[arg(long, default_value = ...)] creates a --folder flag
    #[arg(long, default_value = "crawler_images")]
    pub folder: PathBuf,

    /// Output the final record list in JSON format instead of a table
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,

    /// Maximum number of HTTP requests in flight at once
    ///
    /// Bounds the whole run, no matter how wide the crawl fans out
    #[arg(long, default_value_t = 50)]
    pub concurrency: usize,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why positional arguments instead of flags?
//    - The start URL and depth are required for every single run
//    - Positional arguments make the common case short to type:
//      image-harvester https://example.com 2
//    - Flags (--folder, --json) are for the optional extras
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What is value_parser with range(0..)?
//    - clap validates the argument while parsing
//    - A negative depth is rejected with a helpful error before our
//      code ever runs - this is the "fail fast" behavior we want
//
// 4. Why i64 for depth?
//    - The crawl engine decrements depth on every recursion level and
//      treats anything below zero as "stop"
//    - Using a signed integer lets the engine express that guard
//      directly instead of juggling checked subtraction
//
// 5. Why PathBuf instead of String for folder?
//    - PathBuf is the owned path type in Rust
//    - It handles platform differences (slashes, etc.) for us
//    - clap converts the argument automatically
// -----------------------------------------------------------------------------
