//! Message kind - what an inbound message carries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an inbound message as reported by the messaging platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Plain text
    #[default]
    Chat,
    /// Photo
    Image,
    /// Video clip
    Video,
    /// Audio file
    Audio,
    /// Push-to-talk voice note
    Ptt,
    /// Document or other file
    Document,
    /// Sticker
    Sticker,
    /// Shared location
    Location,
    /// Shared contact card
    Vcard,
    /// Reply to an interactive list or button message
    Interactive,
    /// Quick-reply button press
    Button,
    /// Anything the relay does not recognise
    Unknown,
}

impl MessageKind {
    /// Whether messages of this kind carry a media attachment
    #[must_use]
    pub const fn has_media(&self) -> bool {
        matches!(
            self,
            Self::Image | Self::Video | Self::Audio | Self::Ptt | Self::Document | Self::Sticker
        )
    }

    /// Wire name used in logs and payloads
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Ptt => "ptt",
            Self::Document => "document",
            Self::Sticker => "sticker",
            Self::Location => "location",
            Self::Vcard => "vcard",
            Self::Interactive => "interactive",
            Self::Button => "button",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
