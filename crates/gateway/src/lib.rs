pub mod config;
pub mod error;
pub mod remote;
pub mod traits;

pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use remote::{AskRequest, AskResponse, DeleteAck, GatewayClient};
pub use traits::CommandGateway;

#[cfg(any(test, feature = "mock"))]
pub use traits::MockCommandGateway;
