// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

//! The two calls the raffle makes against a randomness coordinator.
//!
//! Requests are fire-and-forget: the coordinator answers later by invoking
//! `Raffle::on_randomness_fulfilled` with the id it handed out here.

mod local;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::CryptoHash;

pub use local::LocalCoordinator;

/// Opaque handle issued by the coordinator for one randomness request.
/// The zero value means "no request issued yet".
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters forwarded verbatim to the coordinator with each request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionParams {
    /// Subscription the request is billed against.
    pub subscription_id: u64,
    /// Identifies the coordinator's proving key.
    pub key_hash: CryptoHash,
    /// How many confirmations the coordinator waits before answering.
    pub request_confirmations: u16,
    /// Number of random words requested. Only the first one is ever read.
    pub num_words: u32,
}

impl Default for SubscriptionParams {
    fn default() -> Self {
        Self {
            subscription_id: 0,
            key_hash: CryptoHash::default(),
            request_confirmations: 3,
            num_words: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("subscription {0} is not known to the coordinator")]
    UnknownSubscription(u64),
    #[error("coordinator refused the request: {0}")]
    Refused(String),
}

/// Request side of a randomness coordinator.
pub trait RandomnessOracle {
    /// Asks for fresh randomness and returns the handle the answer will carry.
    fn request_randomness(&mut self, params: &SubscriptionParams) -> Result<RequestId, OracleError>;
}

impl<T: RandomnessOracle + ?Sized> RandomnessOracle for Box<T> {
    fn request_randomness(&mut self, params: &SubscriptionParams) -> Result<RequestId, OracleError> {
        (**self).request_randomness(params)
    }
}
