use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stream_client::application::ports::StreamConfig;
use stream_client::application::SessionManager;
use stream_client::config::ClientConfig;
use stream_client::domain::AudioStreamType;
use stream_client::infrastructure::driven::HttpGatewayConnector;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ClientConfig::load()?;
    let settings = config.settings()?;
    let audio_spec = config.audio_spec()?;

    info!("Stream client starting for {} via {}", settings.app, settings.gateway.url);

    let connector = Arc::new(HttpGatewayConnector::new(config.http_timeout()));
    let mut sessions = SessionManager::new(connector);
    sessions
        .setup(&settings)
        .await
        .context("failed to create session")?;

    let stream_config = StreamConfig::from_session(sessions.state())?
        .with_audio_spec(AudioStreamType::Output, audio_spec);

    info!("Session id: {}", sessions.id());
    info!("Signaling URL: {}", stream_config.signaling_url);
    info!("Region: {}", sessions.region());
    for server in &stream_config.stun_servers {
        info!("STUN server: {}", server.urls.join(", "));
    }
    info!(
        "Audio output: {:?} {} Hz, {} channels ({} bytes per slice)",
        audio_spec.format,
        audio_spec.freq,
        audio_spec.channels,
        audio_spec.slice_len()
    );

    info!("Press Ctrl-C to release the session");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    if let Err(e) = sessions.release().await {
        error!("Failed to release session: {}", e);
    }

    Ok(())
}
