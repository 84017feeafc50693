// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

pub mod selection;
#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::basics::{Address, RandomWord};
use crate::data::errors::{RaffleError, Result};
use crate::oracle::RequestId;

/// Where a draw cycle currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawState {
    /// No randomness requested yet.
    Idle,
    /// Waiting for the coordinator to answer `request_id`.
    RequestPending,
    /// The random word arrived; winners can be selected.
    Ready,
    /// Winners are fixed for this cycle.
    Finalized,
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState::Idle
    }
}

impl fmt::Display for DrawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DrawState::Idle => "idle",
            DrawState::RequestPending => "waiting for randomness",
            DrawState::Ready => "ready",
            DrawState::Finalized => "finalized",
        };
        f.write_str(s)
    }
}

/// State machine of a single draw.
///
/// `Draw` knows nothing about who is calling or who is listening; it only
/// guards the transitions. Every method either applies its whole effect or
/// returns an error without touching anything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    state: DrawState,
    /// Counts completed resets, starting at 0.
    cycle: u64,
    num_winners: Option<u32>,
    request_id: RequestId,
    random_word: Option<RandomWord>,
    winners: Vec<Address>,
}

impl Draw {
    pub fn new(num_winners: Option<u32>) -> Self {
        Self {
            num_winners,
            ..Self::default()
        }
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn num_winners(&self) -> Option<u32> {
        self.num_winners
    }

    /// The id of the latest request of this cycle, zero if none was made.
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn random_word(&self) -> Option<RandomWord> {
        self.random_word
    }

    pub fn winners(&self) -> &[Address] {
        &self.winners
    }

    pub fn set_num_winners(&mut self, k: u32) -> Result<()> {
        if self.state != DrawState::Idle {
            return Err(RaffleError::InvalidState(self.state));
        }
        if k < 1 {
            return Err(RaffleError::InvalidInput("number of winners must be at least 1"));
        }
        self.num_winners = Some(k);
        Ok(())
    }

    /// Checks that a randomness request may be issued against a pool of `pool` entries.
    pub fn check_request(&self, pool: usize, allow_rerequest: bool) -> Result<()> {
        match self.state {
            DrawState::Idle => {}
            DrawState::RequestPending if allow_rerequest => {}
            state => return Err(RaffleError::InvalidState(state)),
        }
        self.check_pool(pool)?;
        Ok(())
    }

    /// Stores the id handed out by the coordinator. Must follow a successful `check_request`.
    pub fn record_request(&mut self, request_id: RequestId) {
        if self.state == DrawState::RequestPending {
            debug!(old = self.request_id.0, new = request_id.0, "superseding pending request");
        }
        self.request_id = request_id;
        self.state = DrawState::RequestPending;
    }

    /// Accepts the coordinator's answer.
    ///
    /// Returns the accepted word, or `Ok(None)` without changing anything when
    /// the answer is not for the pending request; the coordinator may well
    /// deliver for superseded ones.
    pub fn fulfill(
        &mut self,
        request_id: RequestId,
        values: &[RandomWord],
    ) -> Result<Option<RandomWord>> {
        if self.state != DrawState::RequestPending || request_id != self.request_id {
            return Ok(None);
        }
        let word = values
            .first()
            .ok_or(RaffleError::InvalidInput("fulfillment carries no random words"))?;
        self.random_word = Some(*word);
        self.state = DrawState::Ready;
        Ok(Some(*word))
    }

    /// Runs the selection over `participants` and finalizes the draw.
    pub fn select(&mut self, participants: &[Address]) -> Result<&[Address]> {
        let word = self.random_word.ok_or(RaffleError::RandomNumberMissing)?;
        let k = self.check_pool(participants.len())?;
        if self.state == DrawState::Finalized {
            return Err(RaffleError::WinnersAlreadySelected);
        }

        self.winners = selection::select_winners(&word, participants, k as usize);
        self.state = DrawState::Finalized;
        Ok(&self.winners)
    }

    /// Clears request, word and winners so a new cycle can start.
    /// The winner count carries over.
    pub fn reset(&mut self) -> Result<()> {
        if self.state != DrawState::Finalized {
            return Err(RaffleError::InvalidState(self.state));
        }
        *self = Self {
            cycle: self.cycle + 1,
            ..Self::new(self.num_winners)
        };
        Ok(())
    }

    fn check_pool(&self, pool: usize) -> Result<u32> {
        match self.num_winners {
            Some(k) if pool >= k as usize => Ok(k),
            k => Err(RaffleError::InsufficientParticipants {
                required: k.unwrap_or(0),
                available: pool,
            }),
        }
    }
}
