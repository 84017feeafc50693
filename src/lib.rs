// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! A verifiable raffle: operators register participants, a randomness
//! coordinator delivers a single random word, and the winners follow
//! deterministically from that word and the registry.

pub mod config;
pub mod crypto;
pub mod data;
pub mod oracle;
pub mod protocol;
