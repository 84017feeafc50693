// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod basics;
pub mod draw;
pub mod errors;
pub mod events;
pub mod raffle;
pub mod receipt;
pub mod registry;

pub use errors::RaffleError;
pub use raffle::Raffle;
