use benches::generated_javascript;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::{build_search_index, evaluate, extract_search_terms, Filter, FilterTag};
use parsers::parse_javascript;
use std::sync::Arc;

fn parsed(functions: usize) -> Arc<ir::AstNode> {
    let src = generated_javascript(functions);
    Arc::new(
        parse_javascript(&src)
            .expect("parse")
            .expect("non-empty tree"),
    )
}

fn bench_parse(c: &mut Criterion) {
    let src = generated_javascript(200);
    c.bench_function("parse_javascript_200", |b| {
        b.iter(|| parse_javascript(black_box(&src)).unwrap())
    });
}

fn bench_index(c: &mut Criterion) {
    let tree = parsed(200);
    c.bench_function("build_search_index_200", |b| {
        b.iter(|| build_search_index(black_box(&tree)))
    });
    c.bench_function("extract_search_terms_200", |b| {
        b.iter(|| extract_search_terms(black_box(&tree)))
    });
}

fn bench_filter(c: &mut Criterion) {
    let tree = parsed(200);
    let index = build_search_index(&tree);
    let filter: Filter = [
        FilterTag::new("name", "id"),
        FilterTag::new("type", "IfStatement"),
        FilterTag::new("value", "mode3"),
    ]
    .into_iter()
    .collect();
    c.bench_function("evaluate_three_tags_200", |b| {
        b.iter(|| evaluate(black_box(&tree), black_box(&filter), black_box(&index)))
    });
}

criterion_group!(benches, bench_parse, bench_index, bench_filter);
criterion_main!(benches);
