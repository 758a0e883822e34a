use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use diffy_core::resolver::DiffResolver;
use diffy_core::{ChangeKind, ChangedFileRecord, PathUtil, TargetPath};

fn generate_records(count: usize) -> Vec<ChangedFileRecord> {
    let extensions = ["rs", "py", "js", "ts", "go", "md"];
    let directories = ["src", "tests", "docs", "lib", "api", "my dir"];

    (0..count)
        .map(|i| {
            let ext = extensions[i % extensions.len()];
            let dir = directories[i % directories.len()];
            let path = format!("{}/subdir/file_{}.{}", dir, i, ext);
            ChangedFileRecord {
                contents_url: format!(
                    "https://api.github.com/repos/octo/demo/contents/{}?ref=6dcb09b5b57875f334f61aebed695e2e4193db5e",
                    path.replace(' ', "%20")
                ),
                status: ChangeKind::Modified,
                filename: path,
                previous_filename: None,
            }
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for count in [10usize, 100, 300] {
        let records = generate_records(count);
        // last record, so every locator is decoded and searched
        let target = TargetPath::Resolved(records[count - 1].filename.clone());
        let resolver = DiffResolver::new(&target);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("last_match", count), &records, |b, records| {
            b.iter(|| black_box(resolver.resolve(black_box(records))))
        });

        let missing = DiffResolver::new(&TargetPath::Resolved("nowhere/at/all.rs".into()));
        group.bench_with_input(BenchmarkId::new("no_match", count), &records, |b, records| {
            b.iter(|| black_box(missing.resolve(black_box(records))))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| PathUtil::normalize(black_box("./src//components/./button/index.tsx/")))
    });
}

criterion_group!(benches, bench_resolve, bench_normalize);
criterion_main!(benches);
