//! Batch conversion of a levels directory
//!
//! Level files are discovered by name, ordered by the number embedded in
//! their name and converted one at a time. A file that fails to convert is
//! logged and skipped; only directory, write and verification problems end
//! the batch.

pub mod legend;
pub mod output;

pub use legend::{write_legend, LevelLegend};
pub use output::{parse_puzzles, PuzzleOutput};

use crate::{
    level::{remap, ExtractorKind, LevelDefinition, NumericGrid, RegionIndex, UnmappedPolicy},
    LevelError, Result,
};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_PREFIX: &str = "level";
pub const DEFAULT_EXTENSION: &str = ".ts";
pub const DEFAULT_OUTPUT: &str = "../puzzles.txt";

/// How each level file is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub extractor: ExtractorKind,
    /// Require `size` rows of `size` cells
    pub strict_shape: bool,
    pub unmapped: UnmappedPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extractor: ExtractorKind::Structured,
            strict_shape: true,
            unmapped: UnmappedPolicy::Reject,
        }
    }
}

/// Everything a batch run needs
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub levels_dir: PathBuf,
    pub output: PathBuf,
    pub legend: Option<PathBuf>,
    pub file_prefix: String,
    pub file_extension: String,
    pub options: ConvertOptions,
    /// Re-read the written output and check the level count
    pub verify_output: bool,
}

impl BatchConfig {
    pub fn new(levels_dir: impl Into<PathBuf>) -> Self {
        Self {
            levels_dir: levels_dir.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            legend: None,
            file_prefix: DEFAULT_PREFIX.to_string(),
            file_extension: DEFAULT_EXTENSION.to_string(),
            options: ConvertOptions::default(),
            verify_output: false,
        }
    }
}

/// A candidate level file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFile {
    pub path: PathBuf,
    pub file_name: String,
    pub index: u64,
}

/// A level that made it all the way to numbers
#[derive(Debug, Clone)]
pub struct ConvertedLevel {
    pub definition: LevelDefinition,
    pub grid: NumericGrid,
}

/// A level file that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLevel {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub files_found: usize,
    pub converted: usize,
    pub skipped: Vec<SkippedLevel>,
    pub output_path: PathBuf,
    pub output_bytes: u64,
}

/// Number that directly follows the first `prefix` + digits run in `file_name`, or 0
///
/// `level12b.ts` -> 12, `level.ts` -> 0. A digit run too large for `u64`
/// also gives 0, so such a file sorts with the unnumbered ones.
pub fn level_index(file_name: &str, prefix: &str) -> u64 {
    if prefix.is_empty() {
        return 0;
    }

    file_name
        .match_indices(prefix)
        .find_map(|(start, _)| {
            let rest = &file_name[start + prefix.len()..];
            let digits_len = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            (digits_len > 0).then(|| &rest[..digits_len])
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

/// List level files in `dir`, ordered by their embedded index, then by name
pub fn discover_level_files(dir: &Path, prefix: &str, extension: &str) -> Result<Vec<LevelFile>> {
    if !dir.is_dir() {
        return Err(LevelError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if !file_name.starts_with(prefix) || !file_name.ends_with(extension) {
            continue;
        }
        if !path.is_file() {
            continue;
        }

        let file_name = file_name.to_string();
        let index = level_index(&file_name, prefix);
        files.push(LevelFile {
            path,
            file_name,
            index,
        });
    }

    files.sort_by(|a, b| {
        a.index
            .cmp(&b.index)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });

    Ok(files)
}

/// Extract, check and remap a single level file
pub fn convert_level_file(path: &Path, options: &ConvertOptions) -> Result<ConvertedLevel> {
    let definition = LevelDefinition::load(path, options.extractor)?;
    debug!(
        "{}: size {}, {} rows, {} regions",
        path.display(),
        definition.size,
        definition.color_regions.len(),
        definition.region_count()
    );

    if options.strict_shape {
        definition.validate_shape()?;
    }

    let grid = remap(&definition, options.unmapped)?;
    Ok(ConvertedLevel { definition, grid })
}

/// Convert every level file in the configured directory into one output file
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport> {
    let files = discover_level_files(
        &config.levels_dir,
        &config.file_prefix,
        &config.file_extension,
    )?;
    info!("Processing levels from: {}", config.levels_dir.display());
    info!("Found {} level files", files.len());

    let mut output = PuzzleOutput::new();
    let mut legends = Vec::new();
    let mut skipped = Vec::new();

    for file in &files {
        info!("Processing {}...", file.file_name);

        match convert_level_file(&file.path, &config.options) {
            Ok(converted) => {
                output.push_level(&converted.grid);
                if config.legend.is_some() {
                    let region_colors = &converted.definition.region_colors;
                    legends.push(LevelLegend {
                        file: file.file_name.clone(),
                        index: file.index,
                        size: converted.grid.size,
                        regions: RegionIndex::from_colors(region_colors).legend(region_colors),
                    });
                }
            }
            Err(e) => {
                warn!("Skipping {}: {}", file.file_name, e);
                skipped.push(SkippedLevel {
                    file_name: file.file_name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let output_bytes = output.write_to(&config.output)?;
    debug!(
        "Wrote {} levels ({output_bytes} bytes) to {}",
        output.level_count(),
        config.output.display()
    );

    if let Some(legend_path) = &config.legend {
        write_legend(legend_path, &legends)?;
        info!("Legend saved to: {}", legend_path.display());
    }

    if config.verify_output {
        let written = std::fs::read_to_string(&config.output)?;
        let found = parse_puzzles(&written)?.len();
        if found != output.level_count() {
            return Err(LevelError::VerificationFailed {
                expected: output.level_count(),
                found,
            });
        }
        info!("Verified {found} levels in {}", config.output.display());
    }

    Ok(BatchReport {
        files_found: files.len(),
        converted: output.level_count(),
        skipped,
        output_path: config.output.clone(),
        output_bytes,
    })
}
