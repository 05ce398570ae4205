//! Metrics over growing inputs.

use codeshift_languages::Language;
use codeshift_metrics::{ReadabilityThresholds, metrics};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const RUST: &str = r#"/// Running totals.
pub struct Ledger {
    entries: Vec<i64>,
}

impl Ledger {
    pub fn push(&mut self, amount: i64) {
        if amount != 0 && self.entries.len() < 1024 {
            self.entries.push(amount);
        }
    }

    pub fn total(&self) -> i64 {
        let mut sum = 0;
        for entry in &self.entries {
            sum += entry; // may overflow
        }
        sum
    }
}
"#;

fn bench_metrics(c: &mut Criterion) {
    let thresholds = ReadabilityThresholds::default();
    let mut group = c.benchmark_group("metrics_rust");
    for copies in [1, 16, 128] {
        let source = RUST.repeat(copies);
        group.bench_with_input(BenchmarkId::from_parameter(copies), &source, |b, source| {
            b.iter(|| metrics(black_box(source), Language::Rust, &thresholds))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
