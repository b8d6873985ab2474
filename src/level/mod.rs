//! Level definition support
//!
//! This module extracts the three fields the puzzle engine needs from a level
//! definition source file: the grid `size`, the `colorRegions` letter grid and
//! the `regionColors` letter-to-color map. Two extractors are available:
//!
//! - [`ExtractorKind::Structured`] parses the field values with nom combinators
//! - [`ExtractorKind::Pattern`] reproduces the historical regex-based behavior

pub mod extract;
pub mod pattern;
pub mod remap;

pub use remap::{remap, LegendEntry, NumericGrid, RegionIndex, UnmappedPolicy};

use crate::{LevelError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Which extractor to use when reading level files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorKind {
    /// Parse field values structurally (default)
    #[default]
    Structured,
    /// Regex-based extraction, kept for parity with older converters
    Pattern,
}

/// The fields of one level definition
///
/// `region_colors` is ordered by letter, so its key order is the order in
/// which letters are numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub size: usize,
    pub color_regions: Vec<Vec<String>>,
    pub region_colors: BTreeMap<String, String>,
}

impl LevelDefinition {
    /// Load a level definition file from disk
    pub fn load(path: &Path, kind: ExtractorKind) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_with(&contents, kind)
    }

    /// Parse a level definition with the structured extractor
    pub fn parse(contents: &str) -> Result<Self> {
        Self::parse_with(contents, ExtractorKind::Structured)
    }

    /// Parse a level definition with the given extractor
    pub fn parse_with(contents: &str, kind: ExtractorKind) -> Result<Self> {
        match kind {
            ExtractorKind::Structured => extract::extract_level(contents),
            ExtractorKind::Pattern => pattern::extract_level(contents),
        }
    }

    /// Check that the grid is `size` rows of `size` cells
    pub fn validate_shape(&self) -> Result<()> {
        if self.color_regions.len() != self.size {
            return Err(LevelError::RowCountMismatch {
                size: self.size,
                rows: self.color_regions.len(),
            });
        }

        for (row, cells) in self.color_regions.iter().enumerate() {
            if cells.len() != self.size {
                return Err(LevelError::RowLengthMismatch {
                    size: self.size,
                    row,
                    cells: cells.len(),
                });
            }
        }

        Ok(())
    }

    /// Number of distinct letters with a color entry
    pub fn region_count(&self) -> usize {
        self.region_colors.len()
    }
}
