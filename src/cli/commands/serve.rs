//! The `serve` command: match session HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api;
use crate::cli::args::ServeArgs;
use crate::config::MatchSettings;
use crate::error::RefwatchError;
use crate::session::{MemoryStore, SessionStore};

/// Start the HTTP server over an in-memory session store.
///
/// # Errors
///
/// Returns a config error when the settings file is missing or invalid,
/// or an I/O error when the listener cannot bind.
pub async fn run(args: &ServeArgs) -> Result<(), RefwatchError> {
    let settings = match &args.settings {
        Some(path) => {
            info!(settings = %path.display(), "loading match settings");
            MatchSettings::load(path)?
        }
        None => MatchSettings::default(),
    };
    info!(
        half_duration_secs = settings.half_duration_secs,
        countdown_seconds = settings.countdown_seconds,
        tick_interval_ms = settings.tick_interval_ms,
        "match settings resolved"
    );

    let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::new());
    let app = api::router(store, settings);

    let listener = TcpListener::bind(&args.bind).await?;
    let bound_addr = listener.local_addr()?;
    info!(%bound_addr, "HTTP server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
