// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use clap::Parser;
use rand::{thread_rng, RngCore};

use raffle::config::{self, CONFIG_FILENAME};
use raffle::data::basics::Address;

use crate::CmdResult;

/// Write a fresh raffle configuration.
#[derive(Parser)]
pub struct InitCmd {
    /// Config directory (default: ~/.raffle)
    #[clap(short = 'd', long = "root")]
    root: Option<String>,
    /// Operator address (default: freshly generated)
    #[clap(long)]
    operator: Option<Address>,
    /// Coordinator address (default: freshly generated)
    #[clap(long)]
    coordinator: Option<Address>,
    /// Initial number of winners
    #[clap(short = 'k', long = "winners")]
    num_winners: Option<u32>,
    /// Subscription id forwarded to the coordinator
    #[clap(long = "subscription", default_value = "0")]
    subscription_id: u64,
    /// Reject a second randomness request while one is pending
    #[clap(long = "no-rerequest")]
    no_rerequest: bool,
}

impl InitCmd {
    pub fn entrypoint(&self) -> CmdResult {
        let mut cfg = config::Local {
            operator: self.operator.unwrap_or_else(random_address),
            coordinator: self.coordinator.unwrap_or_else(random_address),
            num_winners: self.num_winners,
            allow_rerequest: !self.no_rerequest,
            ..config::Local::default()
        };
        cfg.subscription.subscription_id = self.subscription_id;
        cfg.validate()?;

        let root = config::resolve_root(self.root.as_deref())?;
        cfg.save_to_disk(&root.to_string_lossy())?;

        println!("Wrote {}", root.join(CONFIG_FILENAME).display());
        println!("Operator: {}", cfg.operator);
        println!("Coordinator: {}", cfg.coordinator);
        Ok(())
    }
}

fn random_address() -> Address {
    let mut a = Address::default();
    thread_rng().fill_bytes(&mut a.0);
    a
}
