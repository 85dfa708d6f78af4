use std::sync::Arc;

use common::{
    cancel::CancelToken,
    models::{NewTrade, Trade, TradeId, TradePatch, TradeStatus},
    store::Store,
};
use gateway::{CommandGateway, GatewayError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub trades: Vec<Trade>,
    pub loading: bool,
    /// Most recent refresh failure; cleared by the next successful refresh.
    pub error: Option<String>,
    in_flight: usize,
    issued: u64,
    applied: u64,
}

impl LedgerState {
    pub fn trade(&self, id: TradeId) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    fn settle_refresh(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Applied,
    Failed(String),
    /// A refresh issued later had already been applied.
    Stale,
    Abandoned,
}

/// Result of a write followed by its refresh. The mutation error never
/// reaches the ledger state; the refresh shows whatever the server holds.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub mutation_error: Option<String>,
    pub refresh: RefreshOutcome,
}

/// Cached view of the server-held trade list.
///
/// Writes are never applied locally: every mutation is followed by a full
/// re-fetch. Each refresh is numbered when issued and a completion only
/// lands if no later-issued refresh has landed before it.
pub struct LedgerSynchronizer {
    gateway: Arc<dyn CommandGateway>,
    store: Store<LedgerState>,
    cancel: CancelToken,
}

impl LedgerSynchronizer {
    pub fn new(gateway: Arc<dyn CommandGateway>, cancel: CancelToken) -> Self {
        Self {
            gateway,
            store: Store::default(),
            cancel,
        }
    }

    pub fn state(&self) -> LedgerState {
        self.store.snapshot()
    }

    pub fn trades(&self) -> Vec<Trade> {
        self.store.read(|s| s.trades.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<LedgerState> {
        self.store.subscribe()
    }

    pub fn listen(&self, listener: impl Fn(&LedgerState) + Send + Sync + 'static) {
        self.store.listen(listener);
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let seq = self.store.update(|s| {
            s.issued += 1;
            s.in_flight += 1;
            s.loading = true;
            s.issued
        });
        debug!("Refresh #{} issued", seq);

        let result = self.gateway.list_trades().await;

        if self.cancel.is_cancelled() {
            debug!("Ledger torn down, dropping refresh #{}", seq);
            self.store.update(LedgerState::settle_refresh);
            return RefreshOutcome::Abandoned;
        }

        self.store.update(|s| {
            s.settle_refresh();

            if seq <= s.applied {
                debug!("Discarding refresh #{} (#{} already applied)", seq, s.applied);
                return RefreshOutcome::Stale;
            }
            s.applied = seq;

            match result {
                Ok(trades) => {
                    debug!("Refresh #{} applied: {} trades", seq, trades.len());
                    s.trades = trades;
                    s.error = None;
                    RefreshOutcome::Applied
                }
                Err(e) => {
                    let description = e.description();
                    warn!("Refresh #{} failed: {}", seq, description);
                    s.error = Some(description.clone());
                    RefreshOutcome::Failed(description)
                }
            }
        })
    }

    pub async fn mark_executed(&self, id: TradeId) -> MutationOutcome {
        info!("Marking trade #{} executed", id);
        let patch = TradePatch::status(TradeStatus::Executed);
        let result = self.gateway.update_trade(id, &patch).await.map(|_| ());
        self.settle("mark_executed", result).await
    }

    pub async fn remove(&self, id: TradeId) -> MutationOutcome {
        info!("Removing trade #{}", id);
        let result = self.gateway.delete_trade(id).await.map(|_| ());
        self.settle("remove", result).await
    }

    pub async fn create(&self, trade: NewTrade) -> MutationOutcome {
        info!(
            "Creating trade: {} {} {} @ {}",
            trade.side, trade.quantity, trade.symbol, trade.price
        );
        let result = self.gateway.create_trade(&trade).await.map(|_| ());
        self.settle("create", result).await
    }

    // The refresh runs whatever happened to the write.
    async fn settle(&self, action: &str, result: Result<(), GatewayError>) -> MutationOutcome {
        let mutation_error = match result {
            Ok(()) => None,
            Err(e) => {
                let description = e.description();
                warn!("{} failed, refreshing anyway: {}", action, description);
                Some(description)
            }
        };

        MutationOutcome {
            mutation_error,
            refresh: self.refresh().await,
        }
    }
}
