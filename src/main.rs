use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luckywheel::{
    audio::SilentAudio, config::WheelConfig, events::WheelEvent, state::WheelApp,
    store::JsonFileStore,
};

/// Headless run: load the roster, spin once, print the winner.
#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luckywheel=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lucky wheel...");

    let config = WheelConfig::from_env();
    let store = Arc::new(JsonFileStore::new(config.store_path.clone()));
    let app = WheelApp::new(config, store, Arc::new(SilentAudio));

    let participants = app.get_participants().await;
    tracing::info!(
        "Participants: {}",
        participants
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut events = app.subscribe();
    if let Err(e) = app.spin().await {
        tracing::warn!("Cannot spin: {}", e);
        return;
    }

    loop {
        match events.recv().await {
            Ok(WheelEvent::WinnerRevealed {
                winner,
                revealed_at,
                ..
            }) => {
                println!("{}", winner.name);
                tracing::info!("Revealed at {}", revealed_at);
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::error!("Event channel closed: {}", e);
                break;
            }
        }
    }
}
