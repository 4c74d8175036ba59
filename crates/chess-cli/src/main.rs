//! Chess in the terminal.
//!
//! Reads commands from stdin, drives the rules engine with them and prints the
//! board after each one.

mod command;
mod config;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use command::Command;
use config::CliConfig;
use session::{Reply, Session};

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess in the terminal")]
struct Args {
    /// Path to a TOML config file (defaults to ./chess.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw pieces with ASCII letters instead of Unicode glyphs
    #[arg(long)]
    ascii: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = CliConfig::load(args.config.as_deref())?;
    if args.ascii {
        config.display.unicode = false;
    }
    tracing::debug!(?config, "configuration loaded");

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", session.render(&session.game().snapshot()));
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match session.handle(command) {
            Ok(Reply::Show(text)) if text.is_empty() => {}
            Ok(Reply::Show(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) => {
                tracing::error!("{:#}", e);
                println!("error: {:#}", e);
            }
        }
    }

    Ok(())
}
