use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::storage::OutputStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: OutputStore,
    /// Pluggable notifier. `MailApiNotifier` when MAIL_API_URL is set,
    /// `DisabledNotifier` otherwise.
    pub notifier: Arc<dyn Notifier>,
}

/// State rooted in a scratch directory, mail handled by `notifier`.
#[cfg(test)]
pub fn test_state(dir: &std::path::Path, notifier: Arc<dyn Notifier>) -> AppState {
    let config = Config {
        port: 0,
        rust_log: "debug".to_string(),
        upload_dir: dir.join("uploads"),
        output_dir: dir.join("out"),
        max_upload_bytes: 1024 * 1024,
        mail: None,
    };
    let store = OutputStore::new(&config.upload_dir, &config.output_dir)
        .expect("scratch directories");
    AppState {
        config,
        store,
        notifier,
    }
}
