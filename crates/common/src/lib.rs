pub mod cancel;
pub mod logger;
pub mod models;
pub mod store;
