use std::sync::Arc;

use common::{cancel::CancelToken, models::SymbolCatalog, store::Store};
use gateway::CommandGateway;
use tokio::sync::watch;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogState {
    #[default]
    Unloaded,
    Loading,
    Ready(SymbolCatalog),
    Failed(String),
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&SymbolCatalog> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn supported(&self) -> &[String] {
        self.catalog().map(|c| c.supported.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    /// `load` had already been called; the catalog is never fetched twice.
    AlreadyRequested,
    Failed(String),
    Abandoned,
}

/// Session-lifetime copy of the supported symbols, fetched once.
pub struct SymbolCatalogCache {
    gateway: Arc<dyn CommandGateway>,
    store: Store<CatalogState>,
    cancel: CancelToken,
}

impl SymbolCatalogCache {
    pub fn new(gateway: Arc<dyn CommandGateway>, cancel: CancelToken) -> Self {
        Self {
            gateway,
            store: Store::default(),
            cancel,
        }
    }

    pub fn state(&self) -> CatalogState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.store.subscribe()
    }

    pub fn listen(&self, listener: impl Fn(&CatalogState) + Send + Sync + 'static) {
        self.store.listen(listener);
    }

    pub async fn load(&self) -> LoadOutcome {
        let first = self.store.update_if(|s| {
            if *s != CatalogState::Unloaded {
                return false;
            }
            *s = CatalogState::Loading;
            true
        });
        if !first {
            return LoadOutcome::AlreadyRequested;
        }

        let result = self.gateway.list_symbols().await;

        if self.cancel.is_cancelled() {
            return LoadOutcome::Abandoned;
        }

        match result {
            Ok(catalog) => {
                info!("Symbol catalog loaded: {} symbols", catalog.supported.len());
                self.store.update(|s| *s = CatalogState::Ready(catalog));
                LoadOutcome::Loaded
            }
            Err(e) => {
                let description = e.description();
                error!("Failed to load symbol catalog: {}", description);
                self.store
                    .update(|s| *s = CatalogState::Failed(description.clone()));
                LoadOutcome::Failed(description)
            }
        }
    }
}
