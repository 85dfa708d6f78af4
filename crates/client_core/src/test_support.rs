use std::sync::Mutex;

use async_trait::async_trait;
use common::models::{NewTrade, Side, SymbolCatalog, Trade, TradeId, TradePatch, TradeStatus};
use gateway::{AskResponse, CommandGateway, DeleteAck, GatewayError};
use tokio::sync::oneshot;
use tokio::task::yield_now;

type Reply<T> = oneshot::Sender<Result<T, GatewayError>>;

pub fn trade(id: TradeId, symbol: &str, status: TradeStatus) -> Trade {
    Trade {
        id,
        symbol: symbol.to_string(),
        side: Side::Buy,
        quantity: 10.0,
        price: 4200.0,
        status,
        note: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn rejected(body: &str) -> GatewayError {
    GatewayError::Status {
        status: 500,
        body: body.to_string(),
    }
}

/// Gateway whose `ask` and `list_trades` calls park until the test resolves
/// them, in whatever order the test chooses.
#[derive(Default)]
pub struct GatedGateway {
    asks: Mutex<Vec<(String, Option<Reply<AskResponse>>)>>,
    lists: Mutex<Vec<Option<Reply<Vec<Trade>>>>>,
}

impl GatedGateway {
    pub async fn wait_for_asks(&self, n: usize) {
        while self.asks.lock().unwrap().len() < n {
            yield_now().await;
        }
    }

    pub async fn wait_for_lists(&self, n: usize) {
        while self.lists.lock().unwrap().len() < n {
            yield_now().await;
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asks.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn resolve_ask(&self, index: usize, result: Result<AskResponse, GatewayError>) {
        let reply = self.asks.lock().unwrap()[index].1.take().unwrap();
        let _ = reply.send(result);
    }

    pub fn resolve_list(&self, index: usize, result: Result<Vec<Trade>, GatewayError>) {
        let reply = self.lists.lock().unwrap()[index].take().unwrap();
        let _ = reply.send(result);
    }
}

fn dropped() -> GatewayError {
    GatewayError::Status {
        status: 499,
        body: "test dropped the reply".to_string(),
    }
}

#[async_trait]
impl CommandGateway for GatedGateway {
    async fn ask(&self, message: &str) -> Result<AskResponse, GatewayError> {
        let (tx, rx) = oneshot::channel();
        self.asks.lock().unwrap().push((message.to_string(), Some(tx)));
        rx.await.unwrap_or_else(|_| Err(dropped()))
    }

    async fn list_trades(&self) -> Result<Vec<Trade>, GatewayError> {
        let (tx, rx) = oneshot::channel();
        self.lists.lock().unwrap().push(Some(tx));
        rx.await.unwrap_or_else(|_| Err(dropped()))
    }

    async fn create_trade(&self, _trade: &NewTrade) -> Result<Trade, GatewayError> {
        Err(rejected("not gated"))
    }

    async fn update_trade(&self, _id: TradeId, _patch: &TradePatch) -> Result<Trade, GatewayError> {
        Err(rejected("not gated"))
    }

    async fn delete_trade(&self, _id: TradeId) -> Result<DeleteAck, GatewayError> {
        Err(rejected("not gated"))
    }

    async fn list_symbols(&self) -> Result<SymbolCatalog, GatewayError> {
        Ok(SymbolCatalog::default())
    }
}
