// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use criterion::Criterion;

use raffle::data::basics::{Address, RandomWord};
use raffle::data::draw::selection;
use raffle::data::receipt::DrawReceipt;
use raffle::oracle::RequestId;

pub fn receipt_verify(c: &mut Criterion) {
    let participants: Vec<Address> = (0..1000)
        .map(|i| Address::from_label(&i.to_string()))
        .collect();
    let word = RandomWord::from(42);
    let winners = selection::select_winners(&word, &participants, 25);
    let receipt = DrawReceipt {
        cycle: 0,
        request_id: RequestId(1),
        random_word: word,
        num_winners: 25,
        participants: participants.into(),
        winners,
    };
    let bytes = receipt.encode().unwrap_or_default();

    c.bench_function("data::receipt::verify()", |b| {
        b.iter(|| receipt.verify().is_ok());
    });
    c.bench_function("data::receipt::decode()", |b| {
        b.iter(|| DrawReceipt::decode(&bytes).is_ok());
    });
}
