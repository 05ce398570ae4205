//! Analyzer and fix loop cost on broken and clean input.

use codeshift::Engine;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const BROKEN_JS: &str = r#"function main() {
  const items = [1, 2, 3;
  for (let i = 0; i < items.length; i++ {
    console.log("item: + items[i]);
  }
  if (items.length > 2) {
    report(items)
"#;

const CLEAN_GO: &str = r#"func sum(xs []int) int {
	total := 0
	for _, x := range xs {
		if x > 0 {
			total += x
		}
	}
	return total
}
"#;

fn bench_analyze(c: &mut Criterion) {
    let engine = Engine::default();
    let clean = CLEAN_GO.repeat(32);
    c.bench_function("analyze_clean_go", |b| {
        b.iter(|| engine.analyze(black_box(&clean), "go"))
    });
    c.bench_function("analyze_broken_javascript", |b| {
        b.iter(|| engine.analyze(black_box(BROKEN_JS), "javascript"))
    });
}

fn bench_fix(c: &mut Criterion) {
    let engine = Engine::default();
    c.bench_function("fix_broken_javascript", |b| {
        b.iter(|| engine.fix(black_box(BROKEN_JS), "javascript"))
    });
    let clean = CLEAN_GO.repeat(32);
    c.bench_function("fix_clean_go", |b| b.iter(|| engine.fix(black_box(&clean), "go")));
}

criterion_group!(benches, bench_analyze, bench_fix);
criterion_main!(benches);
