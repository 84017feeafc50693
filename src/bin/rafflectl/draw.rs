// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fs;
use std::os::unix::fs::OpenOptionsExt;
use std::io::Write;

use clap::Parser;
use rand::{thread_rng, RngCore};
use tracing::info;

use raffle::config;
use raffle::data::basics::{Address, AddressError, RandomWord};
use raffle::data::Raffle;
use raffle::oracle::LocalCoordinator;

use crate::CmdResult;

/// Run a complete draw against a local coordinator.
#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct DrawCmd {
    /// Config directory (default: ~/.raffle)
    #[clap(short = 'd', long = "root")]
    root: Option<String>,
    /// File with one participant per line; blank lines and `#` comments are skipped
    #[clap(short = 'p', long = "participants", required = true)]
    participants_file: String,
    /// Treat lines as free-form labels instead of addresses
    #[clap(long)]
    labels: bool,
    /// Number of winners (overrides the config)
    #[clap(short = 'k', long = "winners")]
    num_winners: Option<u32>,
    /// Random word to deliver, decimal or 0x-hex (default: freshly generated)
    #[clap(short = 'w', long)]
    word: Option<RandomWord>,
    /// Write the msgpack receipt of the draw to this file
    #[clap(short = 'r', long = "receipt")]
    receipt_file: Option<String>,
}

impl DrawCmd {
    pub fn entrypoint(&self) -> CmdResult {
        let root = config::resolve_root(self.root.as_deref())?;
        let cfg = config::Local::load_from_disk(&root)?;
        let participants = self.load_participants()?;

        let mut raffle = Raffle::new(&cfg, LocalCoordinator::new());
        raffle.add_participants(&cfg.operator, &participants)?;
        if let Some(k) = self.num_winners {
            raffle.set_num_winners(&cfg.operator, k)?;
        }

        let request_id = raffle.request_random_number(&cfg.operator)?;
        let word = self.word.unwrap_or_else(|| {
            let mut w = RandomWord::default();
            thread_rng().fill_bytes(&mut w.0);
            w
        });
        raffle.on_randomness_fulfilled(&cfg.coordinator, request_id, &[word])?;
        let winners = raffle.select_winners()?;

        println!("Request: {}", request_id);
        println!("Random word: {}", word);
        for (i, w) in winners.iter().enumerate() {
            println!("Winner {}: {}", i + 1, w);
        }

        if let Some(receipt) = raffle.receipt() {
            println!("Receipt digest: {}", receipt.digest());
            if let Some(path) = &self.receipt_file {
                let mut f = fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .mode(0o644)
                    .open(path)?;
                f.write_all(&receipt.encode()?)?;
                info!(path = %path, "receipt written");
            }
        }
        Ok(())
    }

    fn load_participants(&self) -> Result<Vec<Address>, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(&self.participants_file)?;
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));

        if self.labels {
            return Ok(entries.map(Address::from_label).collect());
        }
        let parsed: Result<Vec<Address>, AddressError> = entries.map(str::parse).collect();
        Ok(parsed?)
    }
}
