//! Glass Bot backend integration
//!
//! Client for the order-management backend the relay forwards messages to.

pub mod client;

pub use client::{BackendClient, BackendClientConfig, BackendError, BackendHealth};
