//! Application services - Use case implementations

mod relay_dispatcher;
mod relay_service;
pub mod reply_templates;

pub use relay_dispatcher::{RelayDispatcher, inbound_channel};
pub use relay_service::{RelayOutcome, RelayService};
