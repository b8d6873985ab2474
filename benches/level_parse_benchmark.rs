//! Benchmark for level definition extraction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use queens_levels_rs::level::{remap, ExtractorKind, LevelDefinition, UnmappedPolicy};
use std::fs;
use std::path::PathBuf;

fn load_sample_levels() -> Vec<(String, String)> {
    let level_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_levels");

    let mut levels = Vec::new();
    if let Ok(entries) = fs::read_dir(&level_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("ts") {
                if let Ok(contents) = fs::read_to_string(&path) {
                    let filename = path.file_name().unwrap().to_string_lossy().to_string();
                    levels.push((filename, contents));
                }
            }
        }
    }

    if levels.is_empty() {
        eprintln!("Warning: test_levels not found, using a synthetic sample");
        levels.push((
            "synthetic.ts".to_string(),
            r#"
const level = {
  size: 3,
  colorRegions: [
    ["A", "A", "B"],
    ["A", "C", "B"],
    ["C", "C", "B"],
  ],
  regionColors: { A: lightWisteria, B: chardonnay, C: anakiwa },
};
"#
            .to_string(),
        ));
    }

    levels.sort();
    levels
}

fn bench_extractors(c: &mut Criterion) {
    let levels = load_sample_levels();
    let mut group = c.benchmark_group("extract_level");

    for (filename, contents) in &levels {
        group.throughput(Throughput::Bytes(contents.len() as u64));

        for (name, kind) in [
            ("structured", ExtractorKind::Structured),
            ("pattern", ExtractorKind::Pattern),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, filename),
                contents,
                |b, contents| {
                    b.iter(|| {
                        let result = LevelDefinition::parse_with(black_box(contents), kind);
                        black_box(result)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_convert_batch(c: &mut Criterion) {
    let levels = load_sample_levels();
    let total_size: usize = levels.iter().map(|(_, c)| c.len()).sum();

    c.benchmark_group("convert_batch")
        .throughput(Throughput::Bytes(total_size as u64))
        .bench_function("extract_and_remap", |b| {
            b.iter(|| {
                for (_, contents) in &levels {
                    if let Ok(level) = LevelDefinition::parse(black_box(contents)) {
                        black_box(remap(&level, UnmappedPolicy::Reject)).ok();
                    }
                }
            });
        });
}

criterion_group!(benches, bench_extractors, bench_convert_batch);
criterion_main!(benches);
