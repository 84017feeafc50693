// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use criterion::{BenchmarkId, Criterion};
use rand::{thread_rng, RngCore};

use raffle::data::basics::{Address, RandomWord};
use raffle::data::draw::selection;

fn random_word() -> RandomWord {
    let mut w = RandomWord::default();
    thread_rng().fill_bytes(&mut w.0);
    w
}

pub fn select_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw::selection::select_indices()");
    for &len in &[100usize, 10_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_with_setup(random_word, |w| selection::select_indices(&w, len, 10));
        });
    }
    group.finish();
}

pub fn select_winners(c: &mut Criterion) {
    let pool: Vec<Address> = (0..10_000)
        .map(|i| Address::from_label(&i.to_string()))
        .collect();

    c.bench_function("draw::selection::select_winners()", |b| {
        b.iter_with_setup(random_word, |w| selection::select_winners(&w, &pool, 100));
    });
}

pub fn full_shuffle(c: &mut Criterion) {
    c.bench_function("draw::selection::shuffle() 1000", |b| {
        b.iter_with_setup(random_word, |w| selection::shuffle(&w, 1000).count());
    });
}
