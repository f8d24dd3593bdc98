use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use search_core::corpus::generate_products;
use search_core::tokenizer::tokenize;
use search_core::{Page, SearchEngine};

fn bench_tokenize(c: &mut Criterion) {
    let text = "Wireless Noise-Cancelling Headphones, Home & Kitchen edition 2024";
    c.bench_function("tokenize_product", |b| b.iter(|| tokenize(text)));
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::build(generate_products(100_000, &mut StdRng::seed_from_u64(42))).unwrap();
    c.bench_function("search_category", |b| b.iter(|| engine.search("footwear", Page::default())));
    c.bench_function("search_broad", |b| b.iter(|| engine.search("product books", Page::default())));
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
