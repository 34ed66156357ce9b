//! Glass Bot relay server
//!
//! Main entry point: receives WhatsApp webhooks, relays text to the backend
//! and sends the backend's replies back.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    RelayDispatcher, RelayService, inbound_channel,
    ports::{BackendPort, MessengerPort},
};
use infrastructure::{AppConfig, BackendApiAdapter, WhatsAppMessengerAdapter, init_logging};
use integration_whatsapp::WhatsAppClient;
use presentation_http::{AppState, WhatsAppState, create_router};
use tokio::{net::TcpListener, signal, task::JoinHandle};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_path = dotenvy::dotenv().ok();

    // Logging needs the configured format, so config errors are reported
    // once the subscriber is up.
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(config.server.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    info!("🤖 Glass Bot relay v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv_path {
        debug!(path = %path.display(), "Loaded environment from .env");
    }
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        backend = %config.backend.base_url,
        "Configuration loaded"
    );

    let backend_adapter = BackendApiAdapter::new(config.backend.to_client_config())
        .context("Invalid backend configuration")?;
    let backend_url = backend_adapter.base_url().to_string();
    let backend: Arc<dyn BackendPort> = Arc::new(backend_adapter);

    let (whatsapp, dispatcher) = match config.whatsapp.to_client_config() {
        Some(client_config) => {
            let client = Arc::new(
                WhatsAppClient::new(client_config).context("Invalid WhatsApp configuration")?,
            );
            let messenger: Arc<dyn MessengerPort> =
                Arc::new(WhatsAppMessengerAdapter::new(Arc::clone(&client)));

            let service = Arc::new(RelayService::new(
                Arc::clone(&messenger),
                Arc::clone(&backend),
            ));
            let (inbound, receiver) = inbound_channel(config.server.queue_capacity);
            let dispatcher = RelayDispatcher::new(service).spawn(receiver);

            spawn_startup_probes(Arc::clone(&messenger), Arc::clone(&backend));

            (
                Some(WhatsAppState {
                    client,
                    messenger,
                    inbound,
                }),
                Some(dispatcher),
            )
        },
        None => {
            warn!(
                "WhatsApp is not configured (access_token and phone_number_id required), \
                 webhook routes will answer 503"
            );
            (None, None)
        },
    };

    let state = AppState {
        backend,
        backend_url,
        whatsapp,
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 Server listening on http://{}", addr);
    info!("WhatsApp relay is ready!");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    // The router held the only inbound sender; the dispatcher now drains.
    if let Some(dispatcher) = dispatcher {
        drain_dispatcher(dispatcher, shutdown_timeout).await;
    }

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Log whether WhatsApp and the backend answer, without delaying startup
fn spawn_startup_probes(messenger: Arc<dyn MessengerPort>, backend: Arc<dyn BackendPort>) {
    tokio::spawn(async move {
        if messenger.is_available().await {
            info!(platform = messenger.platform(), "Messaging platform reachable");
        } else {
            warn!(
                platform = messenger.platform(),
                "Messaging platform not reachable, check access_token and phone_number_id"
            );
        }

        if backend.is_healthy().await {
            info!("Backend API reachable");
        } else {
            warn!("Backend API not reachable, messages will get the generic error reply");
        }
    });
}

async fn drain_dispatcher(dispatcher: JoinHandle<()>, timeout: Duration) {
    match tokio::time::timeout(timeout, dispatcher).await {
        Ok(Ok(())) => debug!("Relay dispatcher drained"),
        Ok(Err(e)) => warn!(error = %e, "Relay dispatcher task failed"),
        Err(_) => warn!(
            "Relay dispatcher did not drain within {:?}, abandoning in-flight messages",
            timeout
        ),
    }
}

async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for in-flight messages...", timeout);
}
