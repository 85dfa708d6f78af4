pub mod catalog_cache;
pub mod ledger_sync;
pub mod session_manager;
