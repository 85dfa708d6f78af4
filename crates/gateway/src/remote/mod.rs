pub mod ask_response;
pub mod gateway_client;

pub use ask_response::{AskRequest, AskResponse, DeleteAck};
pub use gateway_client::GatewayClient;
