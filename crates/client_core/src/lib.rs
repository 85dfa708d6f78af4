pub mod desk;
pub mod services;

#[cfg(test)]
mod test_support;

pub use desk::{InitReport, TradingDesk};
pub use services::catalog_cache::{CatalogState, LoadOutcome, SymbolCatalogCache};
pub use services::ledger_sync::{LedgerState, LedgerSynchronizer, MutationOutcome, RefreshOutcome};
pub use services::session_manager::{SessionManager, SessionState, SubmitOutcome};
