// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod hashable;

pub use hashable::{hash, hash_obj, CryptoHash, HashError, Hashable, HASH_LEN};
