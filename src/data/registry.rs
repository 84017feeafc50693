// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use serde::{Deserialize, Serialize};

use crate::crypto::Hashable;
use crate::data::basics::Address;
use crate::data::errors::{RaffleError, Result};
use crate::protocol;

/// Append-only list of raffle entries in registration order.
///
/// The same address may be registered several times; every entry is one
/// position in the draw.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    participants: Vec<Address>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends all entries of `list`, in order.
    pub fn add(&mut self, list: &[Address]) -> Result<()> {
        if list.is_empty() {
            return Err(RaffleError::InvalidInput("participants list cannot be empty"));
        }
        self.participants.extend_from_slice(list);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<Address> {
        self.participants
            .get(index)
            .copied()
            .ok_or(RaffleError::OutOfRange {
                index,
                count: self.count(),
            })
    }

    pub fn count(&self) -> usize {
        self.participants.len()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.participants
    }
}

impl From<Vec<Address>> for Registry {
    fn from(participants: Vec<Address>) -> Self {
        Self { participants }
    }
}

/// Commits to the exact list of entries, order and repeats included.
impl Hashable for Registry {
    fn to_be_hashed(&self) -> (protocol::HashID, Vec<u8>) {
        let mut data = Vec::with_capacity(8 + 32 * self.participants.len());
        data.extend_from_slice(&(self.participants.len() as u64).to_be_bytes());
        for p in &self.participants {
            data.extend_from_slice(&p.0);
        }
        (protocol::PARTICIPANT_LIST, data)
    }
}
