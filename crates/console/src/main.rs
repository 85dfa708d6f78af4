use std::sync::Arc;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use client_core::TradingDesk;
use common::logger;
use gateway::GatewayClient;

use crate::commands::{Command, HELP};
use crate::config::ConsoleConfig;

mod commands;
mod config;
mod views;

// One cooperative event loop: handlers interleave only at await points.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();
    debug!("System starting up...");

    let config = ConsoleConfig::from_env()?;
    let client = GatewayClient::new(&config.gateway)?;
    info!("Using command gateway at {}", client.base_url());

    let desk = Arc::new(TradingDesk::new(Arc::new(client)));
    views::attach(&desk, config.symbol_preview);

    println!("AI Trading Chatbot. Ask for index levels (e.g. SX5E) and manage trades.");
    println!("{}", views::chat_view::render_examples());

    let desk_for_init = desk.clone();
    tokio::spawn(async move {
        desk_for_init.initialize().await;
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Invalid(reason) => println!("{}", reason),
            Command::Ask(text) => {
                let session_desk = desk.clone();
                if session_desk.session().is_pending() {
                    println!("Still waiting for the previous answer.");
                    continue;
                }
                session_desk.session().set_input(text);
                tokio::spawn(async move {
                    session_desk.session().submit_input().await;
                });
            }
            Command::Refresh => {
                let ledger_desk = desk.clone();
                tokio::spawn(async move {
                    ledger_desk.ledger().refresh().await;
                });
            }
            Command::Execute(id) => {
                let ledger_desk = desk.clone();
                tokio::spawn(async move {
                    ledger_desk.ledger().mark_executed(id).await;
                });
            }
            Command::Remove(id) => {
                let ledger_desk = desk.clone();
                tokio::spawn(async move {
                    ledger_desk.ledger().remove(id).await;
                });
            }
            Command::Create(trade) => {
                let ledger_desk = desk.clone();
                tokio::spawn(async move {
                    ledger_desk.ledger().create(trade).await;
                });
            }
            Command::Trades => println!("{}", views::trades_view::render(&desk.ledger().state())),
            Command::Symbols => {
                println!("{}", views::symbols_view::render_full(&desk.catalog().state()))
            }
        }
    }

    if desk.session().is_pending() {
        warn!("Leaving with an unanswered request");
    }
    desk.shutdown();
    Ok(())
}
