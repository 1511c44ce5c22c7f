// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for results)
// 3. Collect the seeds from -f or -d
// 4. Run the finder over every seed and print the results
// 5. Exit with proper code (0 = success, 1 = some seeds skipped, 2 = error)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle the different outcomes
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod error;    // src/error.rs - typed fetch errors
mod extract;  // src/extract/ - pattern matching, normalization, HTML parsing
mod fetch;    // src/fetch/ - HTTP client, seed pages, concurrent script fetching
mod finder;   // src/finder.rs - runs the whole pipeline seed by seed
mod output;   // src/output.rs - printing and writing results
mod scope;    // src/scope.rs - scope filtering
mod seeds;    // src/seeds.rs - reading seeds

// Import items we need from our modules
use clap::Parser; // Parser trait enables the try_parse() method
use cli::Cli;
use finder::{Finder, FinderOptions};
use tracing::warn;
use tracing_subscriber::EnvFilter;

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
            // If an unexpected error occurred, print it and exit with code 2
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every seed was processed (also: usage shown)
//   Ok(1) = at least one seed page could not be fetched
//   Err = fatal error (seed file, output file, HTTP client)
async fn run() -> Result<i32> {
    // Bad arguments, --help and --version all end up here. clap prints the
    // right message (with usage) and we exit cleanly.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            return Ok(0);
        }
    };

    init_logging(cli.verbose);

    let seeds = if let Some(path) = &cli.file {
        seeds::read_seed_file(path)?
    } else if let Some(domain) = &cli.domain {
        vec![domain.clone()]
    } else {
        println!("Please provide a domain (-d) or a file (-f) with URLs.");
        return Ok(0);
    };

    let client = fetch::build_client(cli.request_timeout())?;
    let finder = Finder::new(
        client,
        FinderOptions {
            concurrency: cli.concurrency,
            scope: cli.scope.clone(),
            complete_only: cli.complete,
        },
    );

    let report = finder.run(&seeds).await;

    output::print_report(&report, cli.json)?;

    if let Some(path) = &cli.out {
        output::write_output_file(path, &report.urls)?;
    }

    let skipped_seeds = report.skipped_seeds();
    if !report.failures.is_empty() {
        warn!(
            skipped_seeds,
            failed_resources = report.failures.len() - skipped_seeds,
            "finished with failures"
        );
    }

    if skipped_seeds > 0 {
        Ok(1) // Exit code 1 = some seeds were skipped
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// Sets up tracing to print to stderr
//
// RUST_LOG wins if it's set (e.g., RUST_LOG=linkfinder=trace). Otherwise we
// show warnings, plus our own debug logs with --verbose.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,linkfinder=debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
