//! Setup checks against a running backend

use domain::{RelayRequest, SenderId};
use integration_backend::BackendClient;
use tracing::debug;

/// Text the backend's `/help` reply starts its command list with
pub const HELP_MARKER: &str = "WhatsApp Glass Bot Commands";

/// Result of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Fail,
}

/// One named check and what it found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: CheckOutcome,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Pass,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            outcome: CheckOutcome::Fail,
            detail: detail.into(),
        }
    }

    /// Whether the check passed
    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Pass
    }
}

/// Run every setup check in order
///
/// Command checks still run when the health check fails, so the report
/// shows everything that is broken at once.
pub async fn run_checks(client: &BackendClient, sender: &SenderId) -> Vec<CheckResult> {
    vec![
        check_health(client).await,
        check_help(client, sender).await,
        check_command(client, sender, "/all", "Summary command").await,
    ]
}

async fn check_health(client: &BackendClient) -> CheckResult {
    const NAME: &str = "Backend service";
    match client.health().await {
        Ok(health) if health.is_healthy() => {
            CheckResult::pass(NAME, format!("status {}", health.status))
        },
        Ok(health) => CheckResult::fail(NAME, format!("status {}", health.status)),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

async fn check_help(client: &BackendClient, sender: &SenderId) -> CheckResult {
    const NAME: &str = "Help command";
    let request = RelayRequest {
        from: sender.clone(),
        body: "/help".to_string(),
        has_media: false,
    };

    match client.whatsapp_in(&request).await {
        Ok(response) => match response.reply_text() {
            Some(reply) if reply.contains(HELP_MARKER) => CheckResult::pass(NAME, "help text returned"),
            Some(reply) => {
                debug!(reply = %reply, "Unexpected help reply");
                CheckResult::fail(NAME, "reply does not contain the command list")
            },
            None => CheckResult::fail(NAME, "backend sent no reply"),
        },
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

async fn check_command(
    client: &BackendClient,
    sender: &SenderId,
    command: &str,
    name: &'static str,
) -> CheckResult {
    let request = RelayRequest {
        from: sender.clone(),
        body: command.to_string(),
        has_media: false,
    };

    match client.whatsapp_in(&request).await {
        Ok(response) if response.reply_text().is_some() => CheckResult::pass(name, "reply returned"),
        Ok(_) => CheckResult::fail(name, "backend sent no reply"),
        Err(e) => CheckResult::fail(name, e.to_string()),
    }
}
