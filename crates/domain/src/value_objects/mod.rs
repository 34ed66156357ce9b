//! Value Objects - Immutable, identity-less domain primitives

mod message_kind;
mod sender_id;

pub use message_kind::MessageKind;
pub use sender_id::SenderId;
