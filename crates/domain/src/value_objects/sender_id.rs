//! Sender identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identifier of the conversation a message came from
///
/// Opaque to the relay and stable per conversation. Depending on the
/// messaging platform this is a bare number (`491234567890`), an E.164
/// number (`+491234567890`) or a JID (`491234567890@c.us`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SenderId {
    value: String,
}

impl SenderId {
    /// Create a new sender id
    ///
    /// Surrounding whitespace is removed. Empty ids and ids containing
    /// inner whitespace are rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let value = id.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::InvalidSenderId(
                "Sender id must not be empty".to_string(),
            ));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidSenderId(format!(
                "Sender id must not contain whitespace: {value}"
            )));
        }

        Ok(Self { value })
    }

    /// Get the sender id exactly as the platform reported it
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for SenderId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SenderId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SenderId> for String {
    fn from(id: SenderId) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jid_is_kept_verbatim() {
        let id = SenderId::new("111@c.us").unwrap();
        assert_eq!(id.as_str(), "111@c.us");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let id = SenderId::new("  491234567890 ").unwrap();
        assert_eq!(id.as_str(), "491234567890");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(SenderId::new("").is_err());
        assert!(SenderId::new("   ").is_err());
    }

    #[test]
    fn inner_whitespace_is_rejected() {
        let result = SenderId::new("49 123");
        assert!(matches!(result, Err(DomainError::InvalidSenderId(_))));
    }

    #[test]
    fn display_format() {
        let id = SenderId::new("111@c.us").unwrap();
        assert_eq!(id.to_string(), "111@c.us");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SenderId::new("111@c.us").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"111@c.us\"");

        let parsed: SenderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn deserializing_empty_string_fails() {
        let result: Result<SenderId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
