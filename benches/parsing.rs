use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use toml_tree::{from_str, from_str_with_options, CharDeque, LookaheadInput, ParserOptions};

const CONFIG: &str = r#"
# Application settings
title = "bench"

[server]
host = "127.0.0.1"
port = 8080
timeout = 2.5
started = 2023-01-01T00:00:00Z

[database]
url = 'postgres://localhost/app'
pool = { min = 1, max = 16 }
replicas = ["a", "b", "c"]
"#;

fn products(count: usize) -> String {
    let mut toml = String::new();
    for i in 0..count {
        toml.push_str(&format!(
            "[[product]]\nsku = \"SKU{}\"\nname = \"Product {}\"\nprice = {}.99\nquantity = {}\n\n",
            i, i, i, i
        ));
    }
    toml
}

fn benchmark_parse_config(c: &mut Criterion) {
    c.bench_function("parse_config", |b| b.iter(|| from_str(black_box(CONFIG))));

    let options = ParserOptions::new().with_retain_comments(false);
    c.bench_function("parse_config_without_comments", |b| {
        b.iter(|| from_str_with_options(black_box(CONFIG), options.clone()))
    });
}

fn benchmark_parse_array_of_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_array_of_tables");

    for size in [10, 50, 100, 500].iter() {
        let toml = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &toml, |b, toml| {
            b.iter(|| from_str(black_box(toml)))
        });
    }
    group.finish();
}

fn benchmark_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalars");

    let integers = format!(
        "values = [{}]",
        (0..100).map(|i| (i * 1_000_003).to_string()).collect::<Vec<_>>().join(", ")
    );
    let floats = format!(
        "values = [{}]",
        (0..100).map(|i| format!("{}.5e3", i)).collect::<Vec<_>>().join(", ")
    );
    let strings = format!(
        "values = [{}]",
        (0..100).map(|i| format!("\"item\\t{}\\u00e9\"", i)).collect::<Vec<_>>().join(", ")
    );
    let multiline = format!("text = \"\"\"\n{}\"\"\"", "a line of text \\\n  ".repeat(100));

    group.bench_function("integers", |b| b.iter(|| from_str(black_box(&integers))));
    group.bench_function("floats", |b| b.iter(|| from_str(black_box(&floats))));
    group.bench_function("basic_strings", |b| b.iter(|| from_str(black_box(&strings))));
    group.bench_function("multiline_string", |b| {
        b.iter(|| from_str(black_box(&multiline)))
    });
    group.finish();
}

fn benchmark_lookahead(c: &mut Criterion) {
    let text = "abcdefghij".repeat(1000);

    c.bench_function("lookahead_peek_read", |b| {
        b.iter(|| {
            let mut input = LookaheadInput::from_str(black_box(&text));
            while input.peek_at(2).is_some() {
                input.read();
            }
        })
    });

    c.bench_function("deque_push_pop", |b| {
        b.iter(|| {
            let mut deque = CharDeque::new();
            for c in black_box(&text).chars() {
                deque.push_back(c);
                if deque.len() > 8 {
                    let _ = deque.pop_front();
                }
            }
            deque.drain_all()
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_config,
    benchmark_parse_array_of_tables,
    benchmark_scalars,
    benchmark_lookahead
);
criterion_main!(benches);
