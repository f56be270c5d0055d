//! pdftoc CLI - structured heading outlines from PDF files

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdftoc::{discover_pdfs, extract_outline, extract_text, process_directory, to_json, JsonFormat};

#[derive(Parser)]
#[command(name = "pdftoc")]
#[command(version)]
#[command(about = "Extract structured heading outlines from PDF files", long_about = None)]
struct Cli {
    /// Input PDF file (shorthand for `outline <FILE>`)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory, writing one JSON outline per file
    Batch {
        /// Directory scanned for *.pdf files
        #[arg(short, long, value_name = "DIR")]
        input: PathBuf,

        /// Directory receiving <stem>.json outputs
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },

    /// Extract the outline of one PDF as JSON
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract the whole document text (for downstream analysis)
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch { input, output }) => cmd_batch(&input, &output),
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        None => {
            if let Some(input) = cli.input {
                cmd_outline(&input, None, false)
            } else {
                println!("{}", "Usage: pdftoc <FILE>".yellow());
                println!("       pdftoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let files = discover_pdfs(input)?;
    if files.is_empty() {
        println!("{}", "No PDF files found in input directory".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {} PDF files...", files.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = process_directory(input, output)?;
    pb.finish_and_clear();

    for path in &report.written {
        println!("  {} {}", "+".green(), path.display());
    }
    for path in &report.degraded {
        println!(
            "  {} {} {}",
            "!".yellow(),
            path.display(),
            "(error sentinel written)".dimmed()
        );
    }
    for (path, reason) in &report.failed {
        println!("  {} {}: {}", "x".red(), path.display(), reason);
    }

    println!(
        "\n{} {} written, {} degraded, {} failed",
        "Done:".green().bold(),
        report.written.len(),
        report.degraded.len(),
        report.failed.len()
    );
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = extract_outline(input);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = extract_text(input)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}
