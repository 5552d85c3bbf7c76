// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run the crawl (the engine does all the concurrent work)
// 3. Write the index.json manifest
// 4. Print the collected records and a summary
// 5. Exit with proper code (0 = run completed, 2 = fatal startup error)
//
// A "completed" run is best-effort by design: individual pages and images
// that failed were already reported as warnings while crawling, and they
// simply don't appear in the manifest. Only errors that prevent the crawl
// from starting at all (an invalid URL) are fatal.
//
// Rust concepts used:
// - async/await: Because the crawl makes many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching on the run outcome
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod crawl;     // src/crawl/ - the recursive crawl engine and its state
mod download;  // src/download/ - image downloading
mod extract;   // src/extract/ - HTML reference extraction
mod manifest;  // src/manifest.rs - index.json writing
mod urls;      // src/urls.rs - URL resolution and classification

// Import items we need from our modules
use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use crawl::ImageRecord;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // A fatal startup error occurred - print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = run completed (even if some pages or images failed)
//   Err = fatal startup error (invalid URL, client build failure)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, a missing or
    // malformed positional argument, and a negative depth
    let cli = Cli::parse();

    println!("🔍 Crawling website: {}", cli.start_url);
    println!("📊 Max crawl depth: {}", cli.depth);

    // Run the crawl; this returns once every branch has joined.
    // An invalid start URL fails fast here, before any crawling
    let records = crawl::crawl_images(&cli.start_url, cli.depth, &cli.folder, cli.concurrency)
        .await?;

    // Persist the manifest (full overwrite of index.json)
    manifest::save_index(&cli.folder, &records)?;

    // Print the full record list and a summary
    print_results(&records, cli.json)?;

    println!(
        "✅ Crawling finished. {} image(s) saved in '{}'",
        records.len(),
        cli.folder.display()
    );

    Ok(0)
}

// Prints the records either as a table or JSON
// Parameters:
//   records: slice of ImageRecord structs
//   json: whether to output JSON format
fn print_results(records: &[ImageRecord], json: bool) -> Result<()> {
    if json {
        // Serialize records to JSON and print
        let json_output = serde_json::to_string_pretty(records)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(records);
    }
    Ok(())
}

// Prints records as a human-readable table in the terminal
fn print_table(records: &[ImageRecord]) {
    // Print table header
    println!("{:<55} {:<45} {:<6}", "IMAGE URL", "FOUND ON PAGE", "DEPTH");
    println!("{}", "=".repeat(106));

    // Print each record
    for record in records {
        // Truncate long URLs so the columns stay readable
        let url_display = truncate(&record.url, 52);
        let page_display = truncate(&record.page, 42);

        println!(
            "{:<55} {:<45} {:<6}",
            url_display, page_display, record.depth
        );
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   💾 Images downloaded: {}", records.len());
}

// Shortens a string to at most `max` characters plus an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.len() > max {
        format!("{}...", &text[..max])
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_long_string() {
        let long = "a".repeat(60);
        let shown = truncate(&long, 52);
        assert_eq!(shown.len(), 55);
        assert!(shown.ends_with("..."));
    }
}
