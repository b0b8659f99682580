mod config;
mod errors;
mod notify;
mod render;
mod routes;
mod state;
mod storage;
mod submission;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::notify::{DisabledNotifier, MailApiNotifier, Notifier};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::OutputStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    let store = OutputStore::new(&config.upload_dir, &config.output_dir)?;
    info!(
        "Uploads in {}, resumes published to {}",
        config.upload_dir.display(),
        store.output_path().display()
    );

    let notifier: Arc<dyn Notifier> = match &config.mail {
        Some(mail) => {
            info!("Mail delivery enabled (recipient: {})", mail.recipient);
            Arc::new(MailApiNotifier::new(mail)?)
        }
        None => {
            info!("MAIL_API_URL not set, mail delivery disabled");
            Arc::new(DisabledNotifier)
        }
    };

    let state = AppState {
        config: config.clone(),
        store,
        notifier,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
