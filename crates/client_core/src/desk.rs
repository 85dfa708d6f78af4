use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::cancel::CancelToken;
use gateway::CommandGateway;
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::{
    catalog_cache::{LoadOutcome, SymbolCatalogCache},
    ledger_sync::{LedgerSynchronizer, RefreshOutcome},
    session_manager::SessionManager,
};

#[derive(Debug, Clone, PartialEq)]
pub struct InitReport {
    pub ledger: RefreshOutcome,
    pub catalog: LoadOutcome,
}

/// Composes the three client components over one gateway. They share the
/// gateway handle and the teardown token, nothing else.
pub struct TradingDesk {
    id: Uuid,
    session: SessionManager,
    ledger: LedgerSynchronizer,
    catalog: SymbolCatalogCache,
    cancel: CancelToken,
    initialized: AtomicBool,
}

impl TradingDesk {
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        let cancel = CancelToken::new();
        Self {
            id: Uuid::new_v4(),
            session: SessionManager::new(gateway.clone(), cancel.clone()),
            ledger: LedgerSynchronizer::new(gateway.clone(), cancel.clone()),
            catalog: SymbolCatalogCache::new(gateway, cancel.clone()),
            cancel,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn ledger(&self) -> &LedgerSynchronizer {
        &self.ledger
    }

    pub fn catalog(&self) -> &SymbolCatalogCache {
        &self.catalog
    }

    /// Initial ledger load and catalog fetch, run concurrently.
    /// Returns `None` if the desk was already initialized.
    pub async fn initialize(&self) -> Option<InitReport> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("Desk {} already initialized", self.id);
            return None;
        }

        info!("Desk {} initializing", self.id);
        let (ledger, catalog) = tokio::join!(self.ledger.refresh(), self.catalog.load());
        info!(
            "Desk {} ready (ledger: {:?}, catalog: {:?})",
            self.id, ledger, catalog
        );

        Some(InitReport { ledger, catalog })
    }

    /// Results of requests still in flight are dropped once this returns.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            info!("Desk {} shutting down", self.id);
        }
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog_cache::CatalogState;
    use crate::test_support::trade;
    use common::models::{SymbolCatalog, TradeStatus};
    use gateway::{AskResponse, MockCommandGateway};

    fn gateway() -> MockCommandGateway {
        let mut mock = MockCommandGateway::new();
        mock.expect_list_trades()
            .returning(|| Ok(vec![trade(1, "SX5E", TradeStatus::Open)]));
        mock.expect_list_symbols().times(1).returning(|| {
            Ok(SymbolCatalog {
                supported: vec!["SX5E".into()],
                ..Default::default()
            })
        });
        mock
    }

    #[tokio::test]
    async fn initialize_runs_once() {
        let desk = TradingDesk::new(Arc::new(gateway()));

        let report = desk.initialize().await.unwrap();
        assert_eq!(report.ledger, RefreshOutcome::Applied);
        assert_eq!(report.catalog, LoadOutcome::Loaded);

        assert!(desk.initialize().await.is_none());
        assert_eq!(desk.ledger().trades().len(), 1);
        assert_eq!(desk.catalog().state().supported(), ["SX5E"]);
    }

    #[tokio::test]
    async fn components_keep_separate_state() {
        let mut mock = gateway();
        mock.expect_ask()
            .returning(|_| Ok(AskResponse::answer("1 open trades.")));
        let desk = TradingDesk::new(Arc::new(mock));
        desk.initialize().await;

        desk.session().submit("list trades").await;

        assert_eq!(desk.session().messages().len(), 2);
        assert_eq!(desk.ledger().trades().len(), 1);
    }

    #[tokio::test]
    async fn shutdown_drops_late_results() {
        let desk = TradingDesk::new(Arc::new(gateway()));
        desk.shutdown();
        assert!(desk.is_shut_down());

        let report = desk.initialize().await.unwrap();

        assert_eq!(report.ledger, RefreshOutcome::Abandoned);
        assert_eq!(report.catalog, LoadOutcome::Abandoned);
        assert!(desk.ledger().trades().is_empty());
        assert!(!desk.ledger().state().loading);
        assert_eq!(desk.catalog().state(), CatalogState::Loading);
    }
}
