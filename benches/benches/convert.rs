//! Conversion throughput across every language pair.

use codeshift::{Engine, Language};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const PYTHON: &str = r#"class Account:
    def __init__(self, owner, balance):
        self.owner = owner
        self.balance = balance

    def deposit(self, amount):
        if amount <= 0:
            return False
        self.balance = self.balance + amount
        return True

def total(accounts):
    result = 0
    for account in accounts:
        result = result + account.balance
    return result

while pending > 0:
    pending = pending - 1
"#;

/// A program of `copies` repetitions of the sample.
fn program(copies: usize) -> String {
    PYTHON.repeat(copies)
}

fn bench_python_to_each(c: &mut Criterion) {
    let engine = Engine::default();
    let source = program(8);
    let mut group = c.benchmark_group("convert_from_python");
    for target in Language::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(target.as_str()),
            &target,
            |b, target| b.iter(|| engine.convert(black_box(&source), "python", target.as_str())),
        );
    }
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let engine = Engine::default();
    let source = program(8);
    let java = engine.convert(&source, "python", "java").output_code;
    c.bench_function("convert_java_to_rust", |b| {
        b.iter(|| engine.convert(black_box(&java), "java", "rust"))
    });
}

fn bench_input_size(c: &mut Criterion) {
    let engine = Engine::default();
    let mut group = c.benchmark_group("convert_size");
    for copies in [1, 16, 128] {
        let source = program(copies);
        group.bench_with_input(BenchmarkId::from_parameter(copies), &source, |b, source| {
            b.iter(|| engine.convert(black_box(source), "python", "go"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_python_to_each, bench_round_trip, bench_input_size);
criterion_main!(benches);
