//! Directory batch processing.
//!
//! Documents are independent: each input runs on its own rayon task with no
//! shared state and no ordering guarantee, and a failure is terminal only
//! for the file that caused it. Unprocessable documents still produce an
//! output record (the error sentinel), so every discovered input maps to
//! exactly one JSON file unless the write itself fails.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::extract::extract_outline;
use crate::render::{to_json, JsonFormat};

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files written, one per input.
    pub written: Vec<PathBuf>,
    /// Inputs that produced the error sentinel instead of an outline.
    pub degraded: Vec<PathBuf>,
    /// Inputs whose output could not be rendered or written.
    pub failed: Vec<(PathBuf, String)>,
}

/// Discover `*.pdf` files in a directory, extension compared
/// case-insensitively. Returned sorted for stable logging; processing
/// order carries no meaning.
pub fn discover_pdfs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Process every PDF in `input_dir`, writing `<stem>.json` into
/// `output_dir` (created if absent).
pub fn process_directory(input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
    let files = discover_pdfs(input_dir)?;
    fs::create_dir_all(output_dir)?;

    let outcomes: Vec<(PathBuf, Result<FileOutcome>)> = files
        .into_par_iter()
        .map(|input| {
            let outcome = process_file(&input, output_dir);
            (input, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (input, outcome) in outcomes {
        match outcome {
            Ok(FileOutcome { output, degraded }) => {
                if degraded {
                    report.degraded.push(input);
                }
                report.written.push(output);
            }
            Err(e) => {
                log::error!("failed to write output for {}: {}", input.display(), e);
                report.failed.push((input, e.to_string()));
            }
        }
    }
    Ok(report)
}

struct FileOutcome {
    output: PathBuf,
    degraded: bool,
}

/// Process one file. Extraction itself never fails; only rendering or
/// writing the result can.
fn process_file(input: &Path, output_dir: &Path) -> Result<FileOutcome> {
    let outline = extract_outline(input);
    let degraded = outline.is_degraded();

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let output = output_dir.join(format!("{}.json", stem));

    let json = to_json(&outline, JsonFormat::Pretty)?;
    fs::write(&output, json)?;

    Ok(FileOutcome { output, degraded })
}
