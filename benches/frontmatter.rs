//! Benchmarks for front matter parsing and provenance expansion.
//!
//! These benchmarks measure the three supported front matter formats
//! and the full expansion path that merges commit provenance into a
//! page, which runs once per composed markup file.

use chrono::DateTime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use monako::compose::frontmatter::{expand_front_matter, split_front_matter};
use monako::git::CommitInfo;

/// Page with YAML front matter.
const YAML_PAGE: &str = r#"---
title: Example
weight: 10
tags:
  - docs
  - example
---

# Example

Body text.
"#;

/// Page with TOML front matter.
const TOML_PAGE: &str = r#"+++
title = "Example"
weight = 10
tags = ["docs", "example"]
+++

# Example

Body text.
"#;

/// Page with JSON front matter.
const JSON_PAGE: &str = r#"{
  "title": "Example",
  "weight": 10,
  "tags": ["docs", "example"]
}

# Example

Body text.
"#;

/// Page without any front matter.
const BARE_PAGE: &str = "# Example\n\nBody text.\n";

fn sample_commit() -> CommitInfo {
    CommitInfo {
        hash: "940a47cbb06cd4c4bd3f0e7a792922c947e58ca4".to_string(),
        author_name: "Example Author".to_string(),
        author_email: "author@example.com".to_string(),
        date: DateTime::parse_from_rfc3339("2020-05-23T20:43:12+02:00").unwrap(),
    }
}

fn generate_wide_front_matter(num_keys: usize) -> String {
    let mut page = String::from("---\n");
    for i in 0..num_keys {
        page.push_str(&format!("key_{i}: value number {i}\n"));
    }
    page.push_str("---\n\n# Wide\n\nBody text.\n");
    page
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_matter_split");

    group.bench_function("yaml", |b| {
        b.iter(|| split_front_matter(black_box(YAML_PAGE)))
    });

    group.bench_function("toml", |b| {
        b.iter(|| split_front_matter(black_box(TOML_PAGE)))
    });

    group.bench_function("json", |b| {
        b.iter(|| split_front_matter(black_box(JSON_PAGE)))
    });

    group.bench_function("bare", |b| {
        b.iter(|| split_front_matter(black_box(BARE_PAGE)))
    });

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_matter_expand");
    let commit = sample_commit();

    group.bench_function("with_commit", |b| {
        b.iter(|| {
            expand_front_matter(
                black_box(YAML_PAGE),
                Some(&commit),
                "https://github.com/example/docs.git",
                "main",
                "docs/example.md",
            )
        })
    });

    group.bench_function("without_commit", |b| {
        b.iter(|| {
            expand_front_matter(
                black_box(YAML_PAGE),
                None,
                "https://github.com/example/docs.git",
                "main",
                "docs/example.md",
            )
        })
    });

    group.finish();
}

fn bench_expand_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_matter_scaling");
    let commit = sample_commit();

    for keys in [10, 100, 1000] {
        let page = generate_wide_front_matter(keys);
        group.bench_with_input(BenchmarkId::new("keys", keys), &page, |b, page| {
            b.iter(|| {
                expand_front_matter(
                    black_box(page),
                    Some(&commit),
                    "https://github.com/example/docs.git",
                    "main",
                    "docs/example.md",
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_split, bench_expand, bench_expand_scaling);
criterion_main!(benches);
