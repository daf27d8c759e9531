// Copyright 2023-2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sufsort::SuffixArray;

const SIZES: [usize; 4] = [1 << 10, 1 << 13, 1 << 16, 1 << 19];

// Seeded text over a small alphabet with some structure, standing in for real data
fn corpus(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x2545_f491_4f6c_dd1d);
    let mut text = Vec::with_capacity(len);
    while text.len() < len {
        // Repeat earlier material a quarter of the time
        if text.len() > 64 && rng.random_bool(0.25) {
            let start = rng.random_range(0..text.len() - 32);
            let run = rng.random_range(8..32);
            text.extend_from_within(start..start + run);
        } else {
            text.push(rng.random_range(b'a'..b'u'));
        }
    }
    text.truncate(len);

    text
}

fn construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");

    for size in SIZES {
        let data = corpus(size);
        group
            .throughput(Throughput::Bytes(size as u64))
            .bench_with_input(BenchmarkId::new("sais", size), &data, |b, data| {
                b.iter(|| sufsort::build::<u8, u32>(data, b'z'));
            });
        if size <= 1 << 13 {
            group.bench_with_input(BenchmarkId::new("naive", size), &data, |b, data| {
                b.iter(|| sufsort::naive::suffix_array::<u8, u32>(data));
            });
        }
    }

    group.finish();
}

fn ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranges");

    for size in SIZES {
        let data = corpus(size);
        let sa: Vec<u32> = sufsort::build(&data, b'z').unwrap();
        group
            .throughput(Throughput::Bytes(size as u64))
            .bench_with_input(BenchmarkId::new("lcp", size), &data, |b, data| {
                b.iter(|| sufsort::build_lcp(data, &sa));
            });
        let lcp = sufsort::build_lcp(&data, &sa);
        group.bench_with_input(BenchmarkId::new("lcp_lr", size), &lcp, |b, lcp| {
            b.iter(|| sufsort::build_lcp_lr(&sa, lcp));
        });
    }

    group.finish();
}

fn search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let data = corpus(*SIZES.last().unwrap());
    let plain: SuffixArray = SuffixArray::new(&data, b'z').unwrap();
    let accelerated: SuffixArray = SuffixArray::new(&data, b'z').unwrap().with_ranges();
    for len in [4, 16, 64] {
        let pattern = &data[data.len() / 2..data.len() / 2 + len];
        group.bench_with_input(BenchmarkId::new("binary", len), pattern, |b, pattern| {
            b.iter(|| plain.find(pattern));
        });
        group.bench_with_input(BenchmarkId::new("lcp_lr", len), pattern, |b, pattern| {
            b.iter(|| accelerated.find(pattern));
        });
    }

    group.finish();
}

criterion_group!(benches, construct, ranges, search);
criterion_main!(benches);
