//! Queens level converter
//!
//! Converts Queens puzzle level definitions (a grid size, a letter-coded
//! region grid and a letter-to-color map) into the plain numeric text format
//! read by the puzzle engine.

pub mod batch;
pub mod error;
pub mod level;

pub use error::{LevelError, Result};
