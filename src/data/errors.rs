// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use thiserror::Error;

use crate::data::basics::Address;
use crate::data::draw::DrawState;
use crate::oracle::OracleError;

/// Every failure leaves the raffle exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaffleError {
    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(Address),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("not enough participants: {available} registered, {required} winners requested")]
    InsufficientParticipants { required: u32, available: usize },
    #[error("random word not defined")]
    RandomNumberMissing,
    #[error("winners already selected")]
    WinnersAlreadySelected,
    #[error("participant index {index} out of range (count is {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("operation not permitted while draw is {0}")]
    InvalidState(DrawState),
    #[error("randomness request failed")]
    Oracle(#[from] OracleError),
}

pub type Result<T> = std::result::Result<T, RaffleError>;
