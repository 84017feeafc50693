// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

mod draw;
mod init;
mod verify;

use std::path::Path;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

use draw::DrawCmd;
use init::InitCmd;
use verify::VerifyCmd;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// CLI for running and checking verifiable raffles
#[derive(Parser)]
#[clap(name = "rafflectl", version = "0.1")]
#[clap(arg_required_else_help = true)]
struct RootCmd {
    /// More output per occurrence (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Write logs to this file instead of stderr
    #[clap(long = "log-file", global = true)]
    log_file: Option<String>,
    #[clap(subcommand)]
    subcmd: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    Init(InitCmd),
    Draw(DrawCmd),
    Verify(VerifyCmd),
}

fn init_logging(verbose: u8, log_file: Option<&str>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    match log_file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let name = path.file_name().unwrap_or_else(|| path.as_os_str());
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn main() {
    let cmd: RootCmd = RootCmd::parse();
    let _guard = init_logging(cmd.verbose, cmd.log_file.as_deref());

    let res = match cmd.subcmd {
        SubCmd::Init(i) => i.entrypoint(),
        SubCmd::Draw(d) => d.entrypoint(),
        SubCmd::Verify(v) => v.entrypoint(),
    };

    if let Err(e) = res {
        eprintln!("[Error] {}", e);
        process::exit(1);
    }
}
