use async_trait::async_trait;
use common::models::{NewTrade, SymbolCatalog, Trade, TradeId, TradePatch};

use crate::error::GatewayError;
use crate::remote::{AskResponse, DeleteAck};

/// The REST surface of the command gateway. Everything the client knows
/// about the server goes through these six calls.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait CommandGateway: Send + Sync {
    async fn ask(&self, message: &str) -> Result<AskResponse, GatewayError>;

    async fn list_trades(&self) -> Result<Vec<Trade>, GatewayError>;

    async fn create_trade(&self, trade: &NewTrade) -> Result<Trade, GatewayError>;

    async fn update_trade(&self, id: TradeId, patch: &TradePatch) -> Result<Trade, GatewayError>;

    async fn delete_trade(&self, id: TradeId) -> Result<DeleteAck, GatewayError>;

    async fn list_symbols(&self) -> Result<SymbolCatalog, GatewayError>;
}
