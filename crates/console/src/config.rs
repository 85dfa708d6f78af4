use std::env;

use anyhow::{Context, Result};
use gateway::GatewayConfig;

pub const SYMBOL_PREVIEW_KEY: &str = "TRADE_CHAT_SYMBOL_PREVIEW";
const DEFAULT_SYMBOL_PREVIEW: usize = 12;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub gateway: GatewayConfig,
    pub symbol_preview: usize,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gateway = GatewayConfig::from_lookup(&lookup)?;

        let symbol_preview = match lookup(SYMBOL_PREVIEW_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid {} '{}'", SYMBOL_PREVIEW_KEY, raw))?,
            None => DEFAULT_SYMBOL_PREVIEW,
        };

        Ok(Self {
            gateway,
            symbol_preview,
        })
    }
}
