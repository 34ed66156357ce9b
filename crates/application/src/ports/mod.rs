//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod backend_port;
mod messenger_port;

#[cfg(test)]
pub use backend_port::MockBackendPort;
pub use backend_port::BackendPort;
#[cfg(test)]
pub use messenger_port::MockMessengerPort;
pub use messenger_port::{MessengerPort, OutgoingTextMessage};
