// src/output.rs
// =============================================================================
// This module writes the final URL list.
//
// - stdout: one URL per line, or a JSON report with --json
// - -o <file>: always one URL per line
//
// Logs go to stderr (see main.rs), so stdout can be piped straight into other
// tools like `sort`, `grep` or `httpx`.
// =============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::finder::RunReport;

// Prints the report to stdout
//
// Parameters:
//   report: the finished run
//   json: print the whole report as pretty JSON instead of plain lines
pub fn print_report(report: &RunReport, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        serde_json::to_writer_pretty(&mut out, report)?;
        writeln!(out)?;
    } else {
        write_lines(&mut out, &report.urls)?;
    }

    out.flush()?;
    Ok(())
}

// Writes the URL list to a file, one per line
//
// The file is created if it doesn't exist and truncated if it does.
pub fn write_output_file(path: &Path, urls: &[String]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Could not create output file '{}'", path.display()))?;

    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, urls)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Could not write output file '{}'", path.display()))
}

fn write_lines<W: Write>(out: &mut W, urls: &[String]) -> io::Result<()> {
    for url in urls {
        writeln!(out, "{}", url)?;
    }
    Ok(())
}
