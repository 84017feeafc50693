// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::collections::HashSet;

use tracing::debug;

use super::{OracleError, RandomnessOracle, RequestId, SubscriptionParams};

/// In-process coordinator that hands out sequential, non-zero request ids and
/// remembers every request it has seen.
///
/// It never answers on its own; whoever drives the raffle (a test, the CLI)
/// delivers the random words.
#[derive(Debug, Default)]
pub struct LocalCoordinator {
    last_id: u64,
    requests: Vec<(RequestId, SubscriptionParams)>,
    /// When non-empty, only these subscriptions are served.
    subscriptions: HashSet<u64>,
}

impl LocalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the coordinator to the given subscription ids.
    pub fn with_subscriptions(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            subscriptions: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> &[(RequestId, SubscriptionParams)] {
        &self.requests
    }

    /// The most recently issued request id, if any.
    pub fn last_request(&self) -> Option<RequestId> {
        self.requests.last().map(|(id, _)| *id)
    }
}

impl RandomnessOracle for LocalCoordinator {
    fn request_randomness(&mut self, params: &SubscriptionParams) -> Result<RequestId, OracleError> {
        if !self.subscriptions.is_empty() && !self.subscriptions.contains(&params.subscription_id) {
            return Err(OracleError::UnknownSubscription(params.subscription_id));
        }
        if params.num_words == 0 {
            return Err(OracleError::Refused("request asks for no random words".to_owned()));
        }
        self.last_id += 1;
        let id = RequestId(self.last_id);
        debug!(request_id = id.0, subscription = params.subscription_id, "randomness requested");
        self.requests.push((id, params.clone()));
        Ok(id)
    }
}
