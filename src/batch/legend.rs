//! Region legend output
//!
//! The engine format only carries region numbers. The legend records which
//! letter and color each number stood for, per converted level, as JSON.

use crate::{level::LegendEntry, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct LevelLegend {
    pub file: String,
    pub index: u64,
    pub size: usize,
    pub regions: Vec<LegendEntry>,
}

/// Write all legends as a pretty-printed JSON array
pub fn write_legend(path: &Path, legends: &[LevelLegend]) -> Result<()> {
    let json = serde_json::to_string_pretty(legends)?;
    std::fs::write(path, json)?;
    Ok(())
}
