pub mod message;
pub mod symbol;
pub mod trade;

pub use message::{Message, Role};
pub use symbol::{SymbolCatalog, SymbolMapping};
pub use trade::{NewTrade, Side, Trade, TradeId, TradePatch, TradeStatus};
