//! Fixture level tests
//!
//! One test is generated per level file in `test_levels/` using the
//! `dir-test` procedural macro. Every fixture must convert cleanly with both
//! extractors, and both must agree.

use dir_test::{dir_test, Fixture};
use queens_levels_rs::level::{remap, ExtractorKind, LevelDefinition, UnmappedPolicy};
use similar_asserts::assert_eq;

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_levels",
    glob: "**/level*.ts",
)]
fn test_fixture_level(fixture: Fixture<&str>) {
    let path = fixture.path();
    let contents = fixture.content();

    let structured = LevelDefinition::parse_with(contents, ExtractorKind::Structured)
        .unwrap_or_else(|e| panic!("{path}: {e}"));
    let pattern = LevelDefinition::parse_with(contents, ExtractorKind::Pattern)
        .unwrap_or_else(|e| panic!("{path}: {e}"));
    assert_eq!(structured, pattern, "extractors disagree on {}", path);

    structured
        .validate_shape()
        .unwrap_or_else(|e| panic!("{path}: {e}"));

    let grid = remap(&structured, UnmappedPolicy::Reject).unwrap_or_else(|e| panic!("{path}: {e}"));
    let max = structured.region_count() as u32;
    assert!(
        grid.rows.iter().flatten().all(|&n| (1..=max).contains(&n)),
        "{path}: region number out of range"
    );
}
