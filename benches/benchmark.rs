//! Performance benchmarks for orgtangle

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orgtangle::io::VirtualFS;
use orgtangle::model::{rewrite_tangle_paths, Resolver};
use orgtangle::readers::segments;

fn generate_org(num_blocks: usize, lines_per_block: usize) -> String {
    let mut org = String::from("#+title: Benchmark Document\n\n");

    for i in 0..num_blocks {
        org.push_str(&format!("* Section {}\n", i));
        org.push_str(&format!("#+begin_src python :tangle out/block{}.py\n", i));
        for j in 0..lines_per_block {
            org.push_str(&format!("print('Block {} line {}')\n", i, j));
        }
        org.push_str("#+end_src\n\n");
        if i % 10 == 0 {
            org.push_str(&format!("#+include: \"part{}.org\"\n", i));
        }
    }

    org
}

/// Builds a tree of documents `depth` levels deep, each including `breadth` children.
fn generate_nested_fs(depth: usize, breadth: usize) -> VirtualFS {
    fn add(fs: &mut VirtualFS, name: &str, depth: usize, breadth: usize) {
        let mut org = format!("* {}\n#+begin_src sh :tangle yes\necho {}\n#+end_src\n", name, name);
        if depth > 0 {
            for i in 0..breadth {
                let child = format!("{}_{}", name, i);
                org.push_str(&format!("#+include: \"{}.org\"\n", child));
                add(fs, &child, depth - 1, breadth);
            }
        }
        fs.add_file(format!("{}.org", name), org);
    }

    let mut fs = VirtualFS::new();
    add(&mut fs, "main", depth, breadth);
    fs
}

fn bench_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("segments");

    for num_blocks in [10, 50, 100, 500].iter() {
        let org = generate_org(*num_blocks, 10);
        group.bench_with_input(BenchmarkId::new("blocks", num_blocks), &org, |b, org| {
            b.iter(|| segments(black_box(org)))
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite_tangle_paths");

    for num_blocks in [10, 50, 100, 500].iter() {
        let org = generate_org(*num_blocks, 10);
        group.bench_with_input(BenchmarkId::new("blocks", num_blocks), &org, |b, org| {
            b.iter(|| {
                rewrite_tangle_paths(
                    black_box(org),
                    Path::new("book/main.org"),
                    Path::new("book/chapters/part.org"),
                )
            })
        });
    }

    group.finish();
}

fn bench_resolve_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_nested");

    // Different nesting depths with breadth=3
    for depth in [2, 3, 4, 5].iter() {
        let fs = generate_nested_fs(*depth, 3);
        let documents = fs.list_files().len();

        group.bench_with_input(
            BenchmarkId::new("depth", format!("d{}({}docs)", depth, documents)),
            &fs,
            |b, fs| {
                b.iter(|| {
                    Resolver::new(black_box(fs))
                        .resolve(Path::new("main.org"))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_resolve_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_wide");

    for width in [10, 100, 1000].iter() {
        let mut fs = VirtualFS::new();
        let mut root = String::new();
        for i in 0..*width {
            root.push_str(&format!("#+include: \"parts/p{}.org\"\n", i));
            fs.add_file(
                format!("parts/p{}.org", i),
                format!("#+begin_src python :tangle p{}.py\npass\n#+end_src\n", i),
            );
        }
        fs.add_file("main.org", root);

        group.bench_with_input(BenchmarkId::new("includes", width), &fs, |b, fs| {
            b.iter(|| {
                Resolver::new(black_box(fs))
                    .resolve(Path::new("main.org"))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_segments,
    bench_rewrite,
    bench_resolve_nested,
    bench_resolve_wide,
);

criterion_main!(benches);
