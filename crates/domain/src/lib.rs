//! Domain layer for the Glass Bot relay
//!
//! Contains the messages flowing through the relay, their value objects and
//! domain errors. This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
