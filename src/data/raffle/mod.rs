// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.


use tracing::{debug, info, warn};

use crate::config;
use crate::crypto::hash_obj;
use crate::data::basics::{Address, RandomWord};
use crate::data::draw::{Draw, DrawState};
use crate::data::errors::{RaffleError, Result};
use crate::data::events::{EventSink, Notification, Outbox};
use crate::data::receipt::DrawReceipt;
use crate::data::registry::Registry;
use crate::oracle::{RandomnessOracle, RequestId, SubscriptionParams};

/// A participant registry and its draw, wired to a randomness coordinator.
///
/// Mutating calls name their caller explicitly; the raffle compares it with
/// the operator (or coordinator) address from its configuration. Successful
/// calls publish their notifications to the outbox and to every subscriber.
pub struct Raffle<O: RandomnessOracle> {
    operator: Address,
    coordinator: Address,
    subscription: SubscriptionParams,
    allow_rerequest: bool,

    registry: Registry,
    draw: Draw,
    oracle: O,

    outbox: Outbox,
    observers: Vec<Box<dyn EventSink>>,
}

impl<O: RandomnessOracle> Raffle<O> {
    pub fn new(cfg: &config::Local, oracle: O) -> Self {
        Self {
            operator: cfg.operator,
            coordinator: cfg.coordinator,
            subscription: cfg.subscription.clone(),
            allow_rerequest: cfg.allow_rerequest,
            registry: Registry::new(),
            draw: Draw::new(cfg.num_winners),
            oracle,
            outbox: match cfg.outbox_limit {
                Some(limit) => Outbox::bounded(limit),
                None => Outbox::new(),
            },
            observers: Vec::new(),
        }
    }

    /// Registers an observer for all future notifications.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.observers.push(Box::new(sink));
    }

    pub fn outbox(&mut self) -> &mut Outbox {
        &mut self.outbox
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn operator(&self) -> Address {
        self.operator
    }

    pub fn coordinator(&self) -> Address {
        self.coordinator
    }

    /// Appends `list` to the registry. Only allowed before randomness is requested.
    pub fn add_participants(&mut self, caller: &Address, list: &[Address]) -> Result<()> {
        self.authorize(caller)?;
        if self.draw.state() != DrawState::Idle {
            return Err(RaffleError::InvalidState(self.draw.state()));
        }
        self.registry.add(list)?;

        info!(added = list.len(), total = self.registry.count(), "participants added");
        self.emit(Notification::ParticipantsAdded(list.to_vec()));
        Ok(())
    }

    pub fn get_participant(&self, index: usize) -> Result<Address> {
        self.registry.get(index)
    }

    pub fn count(&self) -> usize {
        self.registry.count()
    }

    pub fn participants(&self) -> &[Address] {
        self.registry.as_slice()
    }

    pub fn set_num_winners(&mut self, caller: &Address, k: u32) -> Result<()> {
        self.authorize(caller)?;
        self.draw.set_num_winners(k)?;
        info!(num_winners = k, "winner count set");
        Ok(())
    }

    pub fn num_winners(&self) -> Option<u32> {
        self.draw.num_winners()
    }

    /// Asks the coordinator for a random word and remembers the returned request id.
    ///
    /// Nothing is sent to the coordinator unless the registry holds at least
    /// as many entries as there are winners to draw.
    pub fn request_random_number(&mut self, caller: &Address) -> Result<RequestId> {
        self.authorize(caller)?;
        self.draw
            .check_request(self.registry.count(), self.allow_rerequest)?;

        let request_id = self.oracle.request_randomness(&self.subscription)?;
        self.draw.record_request(request_id);

        info!(
            request_id = request_id.0,
            pool = %hash_obj(&self.registry),
            entries = self.registry.count(),
            "randomness requested"
        );
        self.emit(Notification::RandomnessRequested(request_id));
        Ok(request_id)
    }

    /// Callback for the coordinator's answer.
    ///
    /// Answers for anything but the pending request are dropped without error.
    pub fn on_randomness_fulfilled(
        &mut self,
        caller: &Address,
        request_id: RequestId,
        values: &[RandomWord],
    ) -> Result<()> {
        if *caller != self.coordinator {
            return Err(RaffleError::Unauthorized(*caller));
        }
        let word = match self.draw.fulfill(request_id, values)? {
            Some(w) => w,
            None => {
                warn!(
                    request_id = request_id.0,
                    pending = self.draw.request_id().0,
                    state = %self.draw.state(),
                    "ignoring fulfillment for a request that is not pending"
                );
                return Ok(());
            }
        };
        info!(request_id = request_id.0, word = %word, "randomness fulfilled");
        self.emit(Notification::RandomnessFulfilled { request_id, word });
        Ok(())
    }

    /// Derives the winners from the delivered word. Anyone may trigger this;
    /// the outcome is fixed by the word and the registry.
    pub fn select_winners(&mut self) -> Result<Vec<Address>> {
        let winners = self.draw.select(self.registry.as_slice())?.to_vec();

        for (i, w) in winners.iter().enumerate() {
            debug!(rank = i, winner = %w, "winner drawn");
        }
        info!(winners = winners.len(), cycle = self.draw.cycle(), "winners selected");
        self.emit(Notification::WinnersSelected(winners.clone()));
        Ok(winners)
    }

    /// Empty until winners are selected.
    pub fn get_winners(&self) -> &[Address] {
        self.draw.winners()
    }

    /// Id of the latest request of this cycle, zero before any request.
    pub fn request_id(&self) -> RequestId {
        self.draw.request_id()
    }

    pub fn state(&self) -> DrawState {
        self.draw.state()
    }

    pub fn cycle(&self) -> u64 {
        self.draw.cycle()
    }

    /// Starts a new draw cycle after the current one was finalized.
    /// The registry is kept and opens for additions again.
    pub fn reset_draw(&mut self, caller: &Address) -> Result<()> {
        self.authorize(caller)?;
        self.draw.reset()?;

        let cycle = self.draw.cycle();
        info!(cycle, "draw reset");
        self.emit(Notification::DrawReset(cycle));
        Ok(())
    }

    /// Snapshot of a finalized draw that third parties can verify.
    pub fn receipt(&self) -> Option<DrawReceipt> {
        if self.draw.state() != DrawState::Finalized {
            return None;
        }
        Some(DrawReceipt {
            cycle: self.draw.cycle(),
            request_id: self.draw.request_id(),
            random_word: self.draw.random_word()?,
            num_winners: self.draw.num_winners()?,
            participants: self.registry.clone(),
            winners: self.draw.winners().to_vec(),
        })
    }

    fn authorize(&self, caller: &Address) -> Result<()> {
        if *caller != self.operator {
            return Err(RaffleError::Unauthorized(*caller));
        }
        Ok(())
    }

    fn emit(&mut self, notification: Notification) {
        for o in self.observers.iter_mut() {
            o.publish(&notification);
        }
        self.outbox.publish(&notification);
    }
}
