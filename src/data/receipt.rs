// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{hash_obj, CryptoHash, Hashable};
use crate::data::basics::{Address, RandomWord};
use crate::data::draw::selection;
use crate::data::registry::Registry;
use crate::oracle::RequestId;
use crate::protocol::{self, codec};

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("encoding receipt failed")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("decoding receipt failed")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("receipt asks for {required} winners from {available} participants")]
    InsufficientParticipants { required: u32, available: usize },
    #[error("recorded winners do not match the draw: expected {expected:?}, found {found:?}")]
    WinnerMismatch {
        expected: Vec<Address>,
        found: Vec<Address>,
    },
}

/// Everything needed to recompute a finalized draw.
///
/// Anyone holding a receipt can rerun the selection and check that the
/// published winners follow from the published random word and pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReceipt {
    pub cycle: u64,
    pub request_id: RequestId,
    pub random_word: RandomWord,
    pub num_winners: u32,
    pub participants: Registry,
    pub winners: Vec<Address>,
}

impl DrawReceipt {
    /// Recomputes the winners and compares them with the recorded ones.
    pub fn verify(&self) -> Result<(), ReceiptError> {
        let pool = self.participants.as_slice();
        if pool.len() < self.num_winners as usize {
            return Err(ReceiptError::InsufficientParticipants {
                required: self.num_winners,
                available: pool.len(),
            });
        }
        let expected =
            selection::select_winners(&self.random_word, pool, self.num_winners as usize);
        if expected != self.winners {
            return Err(ReceiptError::WinnerMismatch {
                expected,
                found: self.winners.clone(),
            });
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ReceiptError> {
        Ok(codec::encode(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ReceiptError> {
        Ok(codec::decode(bytes)?)
    }

    pub fn digest(&self) -> CryptoHash {
        hash_obj(self)
    }
}

impl Hashable for DrawReceipt {
    fn to_be_hashed(&self) -> (protocol::HashID, Vec<u8>) {
        let pool = hash_obj(&self.participants);
        let mut data = Vec::with_capacity(84 + 32 * self.winners.len());
        data.extend_from_slice(&self.cycle.to_be_bytes());
        data.extend_from_slice(&self.request_id.0.to_be_bytes());
        data.extend_from_slice(&self.random_word.0);
        data.extend_from_slice(&self.num_winners.to_be_bytes());
        data.extend_from_slice(&pool.0);
        for w in &self.winners {
            data.extend_from_slice(&w.0);
        }
        (protocol::DRAW_RECEIPT, data)
    }
}
