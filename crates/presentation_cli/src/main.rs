//! Glass Bot CLI
//!
//! Command-line interface for setup checks and manual testing.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::Parser;
use domain::{RelayRequest, SenderId};
use integration_backend::{BackendClient, BackendClientConfig};
use presentation_cli::{Cli, Commands, log_filter_from_verbosity, run_checks};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn backend_client(base_url: String) -> anyhow::Result<BackendClient> {
    BackendClient::new(BackendClientConfig {
        base_url,
        ..Default::default()
    })
    .context("Invalid backend URL")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // BACKEND_API_URL may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Verify { backend_url } => {
            println!("🤖 WhatsApp Glass Bot Setup Verification");
            println!("{}", "=".repeat(50));
            println!("Backend: {backend_url}");
            println!();

            let client = backend_client(backend_url)?;
            let sender = SenderId::new(presentation_cli::DEFAULT_SENDER)?;
            let results = run_checks(&client, &sender).await;

            for result in &results {
                let status = if result.passed() { "✅ PASS" } else { "❌ FAIL" };
                println!("{}: {status} ({})", result.name, result.detail);
            }

            println!();
            if results.iter().all(presentation_cli::CheckResult::passed) {
                println!("🎉 All checks passed! The relay can be started.");
            } else {
                println!("❌ Some checks failed. Is the backend running and BACKEND_API_URL correct?");
                std::process::exit(1);
            }
        },

        Commands::Send {
            body,
            from,
            backend_url,
        } => {
            let client = backend_client(backend_url)?;
            let request = RelayRequest {
                from: SenderId::new(from)?,
                body,
                has_media: false,
            };

            println!("💬 Sending: {}", request.body);

            let response = client
                .whatsapp_in(&request)
                .await
                .context("Backend call failed")?;

            match response.reply_text() {
                Some(reply) => println!("\n🤖 Reply:\n{reply}"),
                None => println!("\n(no reply)"),
            }
        },
    }

    Ok(())
}
