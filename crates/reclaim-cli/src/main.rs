//! Interactive shell for Numbers Reclaim
//!
//! Runs the application core against an in-memory wallet and contract so the
//! reveal and write workflows can be exercised from a terminal.

use anyhow::Result;
use clap::Parser;
use reclaim_app::workflows::session::sync_account;
use reclaim_app::AppCore;
use reclaim_app::ChainBridge;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

mod commands;
mod config;
mod render;

use commands::{Command, HELP};

#[derive(Parser)]
#[command(name = "reclaim")]
#[command(about = "Numbers Reclaim - private numbers list on chain", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, default_value = "reclaim.toml")]
    config: PathBuf,

    /// Wallet address to connect at startup (overrides `[demo].address`)
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config(&cli.config)?;
    let chain = config.demo.build_chain(cli.address.as_deref());
    let app = AppCore::new(config.app, ChainBridge::from_backend(chain.clone())).shared();
    sync_account(&app).await?;

    println!("{HELP}\n");
    println!("{}", render::render(&app.read().await.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match &command {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            _ => {}
        }

        match commands::execute(&app, &chain, command).await {
            Ok(Some(message)) => println!("{message}"),
            Ok(None) => {}
            Err(err) => println!("error ({}): {err}", err.category()),
        }
        println!("{}", render::render(&app.read().await.snapshot()));
    }

    Ok(())
}
