//! Entities - The messages that pass through the relay

mod inbound_message;
mod relay;

pub use inbound_message::InboundMessage;
pub use relay::{RelayRequest, RelayResponse};
