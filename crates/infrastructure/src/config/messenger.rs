//! Messenger configuration: WhatsApp Business Cloud API.

use integration_whatsapp::WhatsAppClientConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// WhatsApp integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Meta Graph API access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Phone number ID from WhatsApp Business
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// App secret for webhook signature verification (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub app_secret: Option<SecretString>,

    /// Verify token for webhook setup
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Whether signature verification is required (default: true)
    #[serde(default = "default_true")]
    pub signature_required: bool,

    /// API version (default: v18.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Graph API root (default: https://graph.facebook.com)
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    /// Phone numbers allowed to send messages (empty = allow all)
    #[serde(default)]
    pub whitelist: Vec<String>,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("phone_number_id", &self.phone_number_id)
            .field(
                "app_secret",
                &if self.app_secret.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("verify_token", &self.verify_token)
            .field("signature_required", &self.signature_required)
            .field("api_version", &self.api_version)
            .field("graph_base_url", &self.graph_base_url)
            .field("whitelist", &format!("[{} entries]", self.whitelist.len()))
            .finish()
    }
}

fn default_api_version() -> String {
    "v18.0".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            app_secret: None,
            verify_token: None,
            signature_required: true,
            api_version: default_api_version(),
            graph_base_url: default_graph_base_url(),
            whitelist: Vec::new(),
        }
    }
}

impl WhatsAppConfig {
    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Get the app secret as a string reference (for signature verification)
    #[must_use]
    pub fn app_secret_str(&self) -> Option<&str> {
        self.app_secret.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether enough is configured to send messages
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.access_token_str().is_some_and(|t| !t.is_empty())
            && self.phone_number_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Settings for [`integration_whatsapp::WhatsAppClient`]
    ///
    /// Returns `None` while access token or phone number id is missing.
    #[must_use]
    pub fn to_client_config(&self) -> Option<WhatsAppClientConfig> {
        if !self.is_configured() {
            return None;
        }

        Some(WhatsAppClientConfig {
            access_token: self.access_token_str().unwrap_or_default().to_string(),
            phone_number_id: self.phone_number_id.clone().unwrap_or_default(),
            app_secret: self.app_secret_str().unwrap_or_default().to_string(),
            verify_token: self.verify_token.clone().unwrap_or_default(),
            signature_required: self.signature_required,
            api_version: self.api_version.clone(),
            graph_base_url: self.graph_base_url.clone(),
            whitelist: self.whitelist.clone(),
        })
    }
}
