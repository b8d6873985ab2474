//! Queens level converter - main binary
//!
//! Converts a directory of level definitions into a single puzzle file

use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};
use queens_levels_rs::{
    batch::{
        run_batch, BatchConfig, BatchReport, ConvertOptions, DEFAULT_EXTENSION, DEFAULT_OUTPUT,
        DEFAULT_PREFIX,
    },
    level::{ExtractorKind, UnmappedPolicy},
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Handling for grid letters missing from `regionColors`
#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnmappedArg {
    /// Skip the level with a warning
    Reject,
    /// Write 0 for the cell
    Zero,
}

impl From<UnmappedArg> for UnmappedPolicy {
    fn from(arg: UnmappedArg) -> Self {
        match arg {
            UnmappedArg::Reject => UnmappedPolicy::Reject,
            UnmappedArg::Zero => UnmappedPolicy::Zero,
        }
    }
}

#[derive(Parser)]
#[command(name = "levelconv")]
#[command(
    about = "Convert Queens level definitions into the puzzle engine's numeric format",
    long_about = None
)]
struct Cli {
    /// Directory containing the level definition files
    #[arg(value_name = "LEVELS_DIR")]
    levels_dir: PathBuf,

    /// Output puzzle file (overwritten on every run)
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also write a JSON legend of region numbers, letters and colors
    #[arg(long, value_name = "LEGEND_FILE")]
    legend: Option<PathBuf>,

    /// Use regex extraction that matches older converters exactly
    #[arg(long)]
    pattern_compat: bool,

    /// Accept grids whose shape doesn't match their declared size
    #[arg(long)]
    lenient: bool,

    /// What to do with grid letters that have no color entry
    #[arg(long, value_enum, default_value = "reject")]
    unmapped: UnmappedArg,

    /// File name prefix of level files
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// File name extension of level files
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Read the output back after writing and check the level count
    #[arg(long)]
    verify: bool,

    /// Verbose output
    ///
    /// When specified, sets the log level to `debug` and ignores the `RUST_LOG`
    /// environment variable. When not specified, uses `RUST_LOG` (default `info`)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> BatchConfig {
        let extractor = if self.pattern_compat {
            ExtractorKind::Pattern
        } else {
            ExtractorKind::Structured
        };

        BatchConfig {
            levels_dir: self.levels_dir,
            output: self.output,
            legend: self.legend,
            file_prefix: self.prefix,
            file_extension: self.extension,
            options: ConvertOptions {
                extractor,
                strict_shape: !self.lenient,
                unmapped: self.unmapped.into(),
            },
            verify_output: self.verify,
        }
    }
}

fn init_logging(verbose: bool) {
    if verbose {
        env_logger::builder().filter_level(LevelFilter::Debug).init();
        debug!("Verbose output enabled (ignoring RUST_LOG environment variable)");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
}

fn print_summary(report: &BatchReport) {
    println!();
    println!(
        "Converted {}/{} levels",
        report.converted, report.files_found
    );
    if !report.skipped.is_empty() {
        println!("Skipped:");
        for skipped in &report.skipped {
            println!("  - {}: {}", skipped.file_name, skipped.reason);
        }
    }
    println!("Output saved to: {}", report.output_path.display());
    println!("File size: {} bytes", report.output_bytes);
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    debug!("{config:?}");

    match run_batch(&config) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
