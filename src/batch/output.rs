//! Puzzle engine text format
//!
//! Each level is a line holding the grid size followed by one line of
//! space-separated region numbers per row. Levels are concatenated without
//! separators and the file has no trailing newline.

use crate::{level::NumericGrid, LevelError, Result};
use std::path::Path;

/// Append-only accumulator for converted levels
#[derive(Debug, Default)]
pub struct PuzzleOutput {
    lines: Vec<String>,
    levels: usize,
}

impl PuzzleOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_level(&mut self, grid: &NumericGrid) {
        self.lines.extend(grid.lines());
        self.levels += 1;
    }

    /// Number of levels appended so far
    pub fn level_count(&self) -> usize {
        self.levels
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the rendered output, replacing any existing file, and return its size in bytes
    pub fn write_to(&self, path: &Path) -> Result<u64> {
        std::fs::write(path, self.render())?;
        Ok(std::fs::metadata(path)?.len())
    }
}

/// Read levels back the way the puzzle engine does: whitespace-separated
/// integers, a size `n` followed by `n * n` cell values, until end of input.
///
/// A size is checked against the tokens left before anything is allocated for it.
pub fn parse_puzzles(contents: &str) -> Result<Vec<NumericGrid>> {
    let tokens: Vec<&str> = contents.split_whitespace().collect();
    let number_at = |token: usize, what: &str| -> Result<u32> {
        let text = tokens[token];
        text.parse().map_err(|_| LevelError::InvalidOutput {
            token,
            reason: format!("expected {what}, found {text:?}"),
        })
    };

    let mut grids = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        let size = number_at(pos, "a grid size")? as usize;
        pos += 1;

        let remaining = tokens.len() - pos;
        if size.checked_mul(size).map_or(true, |cells| cells > remaining) {
            return Err(LevelError::InvalidOutput {
                token: tokens.len(),
                reason: format!(
                    "level {} ends before its {size}x{size} grid",
                    grids.len() + 1
                ),
            });
        }

        let mut rows = Vec::with_capacity(size);
        for _ in 0..size {
            let mut row = Vec::with_capacity(size);
            for _ in 0..size {
                row.push(number_at(pos, "a region number")?);
                pos += 1;
            }
            rows.push(row);
        }
        grids.push(NumericGrid { size, rows });
    }

    Ok(grids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<u32>>) -> NumericGrid {
        NumericGrid {
            size: rows.len(),
            rows,
        }
    }

    #[test]
    fn test_render_concatenates_levels() {
        let mut output = PuzzleOutput::new();
        output.push_level(&grid(vec![vec![1, 2], vec![2, 2]]));
        output.push_level(&grid(vec![vec![1]]));

        assert_eq!(output.level_count(), 2);
        assert_eq!(output.render(), "2\n1 2\n2 2\n1\n1");
    }

    #[test]
    fn test_empty_output_renders_empty() {
        assert_eq!(PuzzleOutput::new().render(), "");
    }

    #[test]
    fn test_parse_puzzles_reads_rendered_output() {
        let mut output = PuzzleOutput::new();
        output.push_level(&grid(vec![vec![1, 1, 2], vec![3, 1, 2], vec![3, 3, 2]]));
        output.push_level(&grid(vec![vec![2, 1], vec![2, 2]]));

        let grids = parse_puzzles(&output.render()).unwrap();
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].rows[1], vec![3, 1, 2]);
        assert_eq!(grids[1].size, 2);
    }

    #[test]
    fn test_parse_puzzles_tolerates_any_whitespace() {
        let grids = parse_puzzles("2 1 2\n\n2   1\n").unwrap();
        assert_eq!(grids, vec![grid(vec![vec![1, 2], vec![2, 1]])]);
    }

    #[test]
    fn test_parse_puzzles_truncated() {
        match parse_puzzles("3\n1 1 2\n3 1") {
            Err(LevelError::InvalidOutput { reason, .. }) => {
                assert!(reason.contains("level 1"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_puzzles_huge_size_is_rejected() {
        match parse_puzzles("4000000000\n1") {
            Err(LevelError::InvalidOutput { token, reason }) => {
                assert_eq!(token, 2);
                assert!(reason.contains("4000000000x4000000000"), "{reason}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_puzzles_rejects_non_numbers() {
        assert!(matches!(
            parse_puzzles("2\n1 x\n2 2"),
            Err(LevelError::InvalidOutput { token: 2, .. })
        ));
    }
}
