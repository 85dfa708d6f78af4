use async_trait::async_trait;
use common::models::{NewTrade, SymbolCatalog, Trade, TradeId, TradePatch};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::remote::{AskRequest, AskResponse, DeleteAck};
use crate::traits::CommandGateway;

#[derive(Clone, Debug)]
pub struct GatewayClient {
    client: Client,
    base_url: Url,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        Ok(self.base_url.join(path)?)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let resp = request.send().await.inspect_err(|e| {
            error!("{} could not reach gateway: {}", operation, e);
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("{} rejected by gateway ({}): {}", operation, status, body);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data = resp.json::<T>().await.inspect_err(|e| {
            error!("{} returned an unreadable body: {}", operation, e);
        })?;
        debug!("{} -> {}", operation, status);
        Ok(data)
    }
}

#[async_trait]
impl CommandGateway for GatewayClient {
    async fn ask(&self, message: &str) -> Result<AskResponse, GatewayError> {
        let url = self.endpoint("api/ask")?;
        let request = self.client.post(url).json(&AskRequest { message });
        self.execute("ask", request).await
    }

    async fn list_trades(&self) -> Result<Vec<Trade>, GatewayError> {
        let url = self.endpoint("api/trades")?;
        self.execute("list_trades", self.client.get(url)).await
    }

    async fn create_trade(&self, trade: &NewTrade) -> Result<Trade, GatewayError> {
        let url = self.endpoint("api/trades")?;
        let request = self.client.post(url).json(trade);
        self.execute("create_trade", request).await
    }

    async fn update_trade(&self, id: TradeId, patch: &TradePatch) -> Result<Trade, GatewayError> {
        let url = self.endpoint(&format!("api/trades/{}", id))?;
        let request = self.client.patch(url).json(patch);
        self.execute("update_trade", request).await
    }

    async fn delete_trade(&self, id: TradeId) -> Result<DeleteAck, GatewayError> {
        let url = self.endpoint(&format!("api/trades/{}", id))?;
        self.execute("delete_trade", self.client.delete(url)).await
    }

    async fn list_symbols(&self) -> Result<SymbolCatalog, GatewayError> {
        let url = self.endpoint("api/symbols")?;
        self.execute("list_symbols", self.client.get(url)).await
    }
}
