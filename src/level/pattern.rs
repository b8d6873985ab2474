//! Regex-based level extraction
//!
//! Reproduces the historical converter field for field, including its gaps:
//! `colorRegions` must be directly followed by `regionColors`, only
//! double-quoted cells are read, and only single uppercase letters are
//! accepted as color keys. Color pairs that don't match are silently dropped.

use crate::{
    level::extract::{COLORS_KEY, REGIONS_KEY, SIZE_KEY},
    level::LevelDefinition,
    LevelError, Result,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static SIZE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"size:\s*([0-9]+)").unwrap());

static REGIONS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)colorRegions:\s*\[(.*?)\],?\s*regionColors").unwrap());

static ROW_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]+\]").unwrap());

static CELL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

static COLORS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)regionColors:\s*\{(.*?)\}").unwrap());

static PAIR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]):\s*([A-Za-z0-9_]+)").unwrap());

/// Extract a level definition using the historical regular expressions
pub fn extract_level(contents: &str) -> Result<LevelDefinition> {
    let size_match = SIZE_REGEX
        .captures(contents)
        .ok_or(LevelError::MissingField(SIZE_KEY))?;
    let digits = &size_match[1];
    let size = digits.parse().map_err(|_| LevelError::MalformedField {
        field: SIZE_KEY,
        offset: size_match.get(1).map_or(0, |m| m.start()),
        reason: format!("integer out of range: {digits}"),
    })?;

    let regions = REGIONS_REGEX
        .captures(contents)
        .and_then(|c| c.get(1))
        .ok_or(LevelError::MissingField(REGIONS_KEY))?;
    let regions_str = regions.as_str().trim();

    let rows: Vec<_> = ROW_REGEX.find_iter(regions_str).collect();
    if rows.is_empty() {
        return Err(LevelError::MalformedField {
            field: REGIONS_KEY,
            offset: regions.start(),
            reason: "could not parse rows".to_string(),
        });
    }

    let mut color_regions = Vec::with_capacity(rows.len());
    for row in rows {
        let cells: Vec<String> = CELL_REGEX
            .captures_iter(row.as_str())
            .map(|c| c[1].to_string())
            .collect();
        if cells.is_empty() {
            return Err(LevelError::MalformedField {
                field: REGIONS_KEY,
                offset: regions.start() + row.start(),
                reason: "could not parse cells".to_string(),
            });
        }
        color_regions.push(cells);
    }

    let colors = COLORS_REGEX
        .captures(contents)
        .and_then(|c| c.get(1))
        .ok_or(LevelError::MissingField(COLORS_KEY))?;

    let region_colors: BTreeMap<String, String> = PAIR_REGEX
        .captures_iter(colors.as_str())
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect();

    Ok(LevelDefinition {
        size,
        color_regions,
        region_colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let contents = r#"
  size: 2,
  colorRegions: [
    ["A", "B"],
    ["B", "B"],
  ],
  regionColors: {
    B: chardonnay,
    A: lightWisteria,
  },
"#;
        let level = extract_level(contents).unwrap();
        assert_eq!(level.size, 2);
        assert_eq!(level.color_regions, vec![vec!["A", "B"], vec!["B", "B"]]);
        assert_eq!(level.region_colors["A"], "lightWisteria");
    }

    #[test]
    fn test_regions_must_precede_colors() {
        let contents = r#"
  size: 1,
  regionColors: { A: red },
  colorRegions: [["A"]],
"#;
        assert!(matches!(
            extract_level(contents),
            Err(LevelError::MissingField("colorRegions"))
        ));
    }

    #[test]
    fn test_partial_color_map_is_accepted() {
        let contents = r#"
  size: 2,
  colorRegions: [["A", "B"], ["B", "c"]],
  regionColors: { A: red, B: "quoted", c: lower },
"#;
        let level = extract_level(contents).unwrap();
        assert_eq!(level.region_colors.len(), 1);
        assert!(level.region_colors.contains_key("A"));
    }

    #[test]
    fn test_ragged_grid_is_not_rejected() {
        let contents = r#"
  size: 3,
  colorRegions: [["A", "B"], ["B"]],
  regionColors: { A: red, B: blue },
"#;
        let level = extract_level(contents).unwrap();
        assert_eq!(level.size, 3);
        assert_eq!(level.color_regions[1].len(), 1);
    }

    #[test]
    fn test_missing_size() {
        let contents = r#"colorRegions: [["A"]], regionColors: { A: red }"#;
        assert!(matches!(
            extract_level(contents),
            Err(LevelError::MissingField("size"))
        ));
    }

    #[test]
    fn test_size_requires_ascii_digits() {
        let contents = r#"
  // size: ٣
  size: 1,
  colorRegions: [["A"]],
  regionColors: { A: red },
"#;
        assert_eq!(extract_level(contents).unwrap().size, 1);
    }

    #[test]
    fn test_row_without_cells() {
        let contents = r#"size: 1, colorRegions: [[A]], regionColors: { A: red }"#;
        assert!(matches!(
            extract_level(contents),
            Err(LevelError::MalformedField {
                field: "colorRegions",
                ..
            })
        ));
    }
}
