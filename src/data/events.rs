// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::data::basics::{Address, RandomWord};
use crate::oracle::RequestId;

/// Observable side effects of raffle operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    ParticipantsAdded(Vec<Address>),
    RandomnessRequested(RequestId),
    RandomnessFulfilled { request_id: RequestId, word: RandomWord },
    WinnersSelected(Vec<Address>),
    /// A new draw cycle started; carries the new cycle number.
    DrawReset(u64),
}

/// Receives every notification after the operation that caused it succeeded.
pub trait EventSink {
    fn publish(&mut self, notification: &Notification);
}

impl<F: FnMut(&Notification)> EventSink for F {
    fn publish(&mut self, notification: &Notification) {
        self(notification)
    }
}

/// Queue of notifications waiting to be picked up.
///
/// Nothing leaves the queue unless the caller pops or drains it. Long-running
/// embedders should drain it regularly or build it with `bounded`.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<Notification>,
    /// Oldest entries are dropped once the queue holds this many.
    limit: Option<usize>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// An outbox that keeps at most the `limit` newest notifications.
    pub fn bounded(limit: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pop(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    /// Takes all queued notifications, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

impl EventSink for Outbox {
    fn publish(&mut self, notification: &Notification) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.queue.len() >= limit {
                self.queue.pop_front();
            }
        }
        self.queue.push_back(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outbox_is_fifo() {
        let mut o = Outbox::new();
        o.publish(&Notification::RandomnessRequested(RequestId(1)));
        o.publish(&Notification::DrawReset(1));
        assert_eq!(o.len(), 2);
        assert_eq!(o.pop(), Some(Notification::RandomnessRequested(RequestId(1))));
        assert_eq!(o.drain(), vec![Notification::DrawReset(1)]);
        assert!(o.is_empty());
    }

    #[test]
    fn bounded_outbox_drops_oldest() {
        let mut o = Outbox::bounded(2);
        for cycle in 1..=5 {
            o.publish(&Notification::DrawReset(cycle));
        }
        assert_eq!(
            o.drain(),
            vec![Notification::DrawReset(4), Notification::DrawReset(5)]
        );

        let mut muted = Outbox::bounded(0);
        muted.publish(&Notification::DrawReset(1));
        assert!(muted.is_empty());
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |n: &Notification| seen.push(n.clone());
            sink.publish(&Notification::WinnersSelected(vec![]));
        }
        assert_eq!(seen, vec![Notification::WinnersSelected(vec![])]);
    }
}
