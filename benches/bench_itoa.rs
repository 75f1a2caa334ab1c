use std::hint::black_box;
use std::io::Write;

use criterion::{Criterion, criterion_group, criterion_main};
use fastdec::{Separator, itoa, utoa, utoa8};

fn bench_itoa_small(c: &mut Criterion) {
    c.bench_function("itoa_small", |b| {
        let mut buf = Vec::with_capacity(32);
        b.iter(|| {
            buf.clear();
            itoa(&mut buf, black_box(-1234), Separator::TAB);
            black_box(buf.len())
        });
    });
}

fn bench_utoa8(c: &mut Criterion) {
    c.bench_function("utoa8", |b| {
        let mut buf = Vec::with_capacity(32);
        b.iter(|| {
            buf.clear();
            utoa8(&mut buf, black_box(12_345_678), Separator::TAB);
            black_box(buf.len())
        });
    });
}

fn bench_utoa_max(c: &mut Criterion) {
    c.bench_function("utoa_u64_max", |b| {
        let mut buf = Vec::with_capacity(32);
        b.iter(|| {
            buf.clear();
            utoa(&mut buf, black_box(u64::MAX), Separator::None);
            black_box(buf.len())
        });
    });
}

fn bench_std_write(c: &mut Criterion) {
    c.bench_function("std_write_i64_small", |b| {
        let mut buf = Vec::with_capacity(32);
        b.iter(|| {
            buf.clear();
            write!(buf, "{}\t", black_box(-1234_i64)).unwrap();
            black_box(buf.len())
        });
    });
}

criterion_group!(
    benches,
    bench_itoa_small,
    bench_utoa8,
    bench_utoa_max,
    bench_std_write,
);

criterion_main!(benches);
