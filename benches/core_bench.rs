//! Benchmarks for vigil core operations.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vigil::core::codec;
use vigil::crypto::cryptobox;
use vigil::tripwire::hasher;
use vigil::{DigestAlgorithm, SentinelState};

fn bench_hash_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();

    let mut group = c.benchmark_group("hash_file");
    for size_kb in [1, 64, 1024] {
        let path = dir.path().join(format!("bench_{size_kb}k.bin"));
        let data = vec![0xABu8; size_kb * 1024];
        std::fs::write(&path, &data).unwrap();

        for algo in [DigestAlgorithm::Sha256, DigestAlgorithm::Blake3] {
            group.bench_with_input(
                BenchmarkId::new(algo.to_string(), size_kb),
                &path,
                |b, path| {
                    b.iter(|| black_box(hasher::hash_file(black_box(path), algo).unwrap()));
                },
            );
        }
    }
    group.finish();
}

fn bench_scan_tree(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    for d in 0..10 {
        let sub = dir.path().join(format!("d{d:02}"));
        std::fs::create_dir(&sub).unwrap();
        for f in 0..20 {
            std::fs::write(sub.join(format!("f{f:02}")), format!("{d}-{f}")).unwrap();
        }
    }

    let mut state = SentinelState::with_watch_paths([dir.path()]);
    state.scan().unwrap();

    c.bench_function("scan_200_unchanged", |b| {
        b.iter(|| {
            let outcome = vigil::tripwire::scanner::scan(black_box(&state)).unwrap();
            black_box(outcome);
        });
    });
}

fn bench_codec(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    for f in 0..500 {
        std::fs::write(dir.path().join(format!("f{f:03}")), f.to_string()).unwrap();
    }
    let mut state = SentinelState::with_watch_paths([dir.path()]);
    for _ in 0..20 {
        state.scan().unwrap();
    }
    let encoded = codec::encode(&state).unwrap();

    let mut group = c.benchmark_group("codec");
    group.bench_function("encode", |b| {
        b.iter(|| black_box(codec::encode(black_box(&state)).unwrap()));
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(codec::decode(black_box(&encoded)).unwrap()));
    });
    group.finish();
}

fn bench_seal_open(c: &mut Criterion) {
    let plaintext = vec![0x5Au8; 64 * 1024];
    let sealed = cryptobox::seal(&plaintext, "bench-passphrase").unwrap();

    let mut group = c.benchmark_group("cryptobox");
    group.sample_size(10);
    group.bench_function("seal_64k", |b| {
        b.iter(|| black_box(cryptobox::seal(black_box(&plaintext), "bench-passphrase").unwrap()));
    });
    group.bench_function("open_64k", |b| {
        b.iter(|| black_box(cryptobox::open(black_box(&sealed), "bench-passphrase").unwrap()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hash_file,
    bench_scan_tree,
    bench_codec,
    bench_seal_open
);
criterion_main!(benches);
