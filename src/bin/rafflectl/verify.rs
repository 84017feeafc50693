// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use std::fs;

use clap::Parser;

use raffle::data::receipt::DrawReceipt;

use crate::CmdResult;

/// Recompute a draw from its receipt and check the recorded winners.
#[derive(Parser)]
#[clap(arg_required_else_help = true)]
pub struct VerifyCmd {
    /// Receipt file written by `rafflectl draw --receipt`
    #[clap(short = 'r', long = "receipt", required = true)]
    receipt_file: String,
}

impl VerifyCmd {
    pub fn entrypoint(&self) -> CmdResult {
        let bytes = fs::read(&self.receipt_file)?;
        let receipt = DrawReceipt::decode(&bytes)?;
        receipt.verify()?;

        println!("Receipt OK: {}", receipt.digest());
        println!(
            "Cycle {}, request {}, {} of {} entries won",
            receipt.cycle,
            receipt.request_id,
            receipt.winners.len(),
            receipt.participants.count()
        );
        Ok(())
    }
}
