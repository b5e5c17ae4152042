use criterion::{black_box, criterion_group, criterion_main, Criterion};
use symcalc_rs::scanning::tokenize;
use symcalc_rs::{evaluate, EvalConfig, Expression, SymbolTable};

/// Benchmark flat arithmetic without symbols
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");
    let symbols = SymbolTable::new();
    let config = EvalConfig::default();

    group.bench_function("flat_arithmetic", |b| {
        b.iter(|| evaluate(black_box("2 + 3 * 4 - 6 / 2"), &symbols, &config))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0f32 + 3.0 * 4.0 - 6.0 / 2.0))
    });

    group.finish();
}

/// Benchmark subscripts and nested groups against bound symbols
fn benchmark_symbolic_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Symbolic Expression Evaluation");

    let text = "(a + A[b * 2]) * (c - A[A[1]]) / (b + 1)";
    let mut expression = Expression::new(text);
    expression.load_symbol_values("a 4\nb 1\nc 9\nA 4 (0,1) (1,3) (2,5) (3,7)".as_bytes()).unwrap();

    group.bench_function("prepared_expression", |b| {
        b.iter(|| black_box(&expression).evaluate())
    });

    group.bench_function("tokenize_only", |b| {
        b.iter(|| tokenize(black_box(text)))
    });

    group.bench_function("build_symbols", |b| {
        b.iter(|| SymbolTable::build(&tokenize(black_box(text))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_simple_arithmetic, benchmark_symbolic_arithmetic);
criterion_main!(benches);
