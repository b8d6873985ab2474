//! Letter-to-number remapping
//!
//! Region letters are numbered by their sorted position in `regionColors`,
//! starting at 1, so the numbering is independent of the order the map was
//! written in.

use crate::{level::LevelDefinition, LevelError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// What to do with a grid letter that has no `regionColors` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedPolicy {
    /// Fail the level with [`LevelError::UnmappedLetter`]
    #[default]
    Reject,
    /// Write `0` for the cell
    Zero,
}

/// Sorted letter to 1-based region number
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    numbers: BTreeMap<String, u32>,
}

/// One line of a level's legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub number: u32,
    pub letter: String,
    pub color: String,
}

impl RegionIndex {
    pub fn from_colors(region_colors: &BTreeMap<String, String>) -> Self {
        let numbers = region_colors
            .keys()
            .zip(1..)
            .map(|(letter, number)| (letter.clone(), number))
            .collect();
        RegionIndex { numbers }
    }

    pub fn get(&self, letter: &str) -> Option<u32> {
        self.numbers.get(letter).copied()
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Number, letter and color of every region, in number order
    pub fn legend(&self, region_colors: &BTreeMap<String, String>) -> Vec<LegendEntry> {
        self.numbers
            .iter()
            .map(|(letter, &number)| LegendEntry {
                number,
                letter: letter.clone(),
                color: region_colors.get(letter).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// A level as the puzzle engine reads it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericGrid {
    pub size: usize,
    pub rows: Vec<Vec<u32>>,
}

impl NumericGrid {
    /// The size line followed by one space-separated line per row
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.size.to_string()).chain(self.rows.iter().map(|row| {
            row.iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        }))
    }
}

impl fmt::Display for NumericGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Replace every grid letter with its region number
pub fn remap(level: &LevelDefinition, policy: UnmappedPolicy) -> Result<NumericGrid> {
    let index = RegionIndex::from_colors(&level.region_colors);
    let mut rows = Vec::with_capacity(level.color_regions.len());

    for (row, letters) in level.color_regions.iter().enumerate() {
        let mut numbers = Vec::with_capacity(letters.len());
        for (col, letter) in letters.iter().enumerate() {
            let number = match (index.get(letter), policy) {
                (Some(number), _) => number,
                (None, UnmappedPolicy::Zero) => 0,
                (None, UnmappedPolicy::Reject) => {
                    return Err(LevelError::UnmappedLetter {
                        letter: letter.clone(),
                        row,
                        col,
                    })
                }
            };
            numbers.push(number);
        }
        rows.push(numbers);
    }

    Ok(NumericGrid {
        size: level.size,
        rows,
    })
}
