use anyhow::{anyhow, Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use shared::ScreenSpec;
use std::time::Duration;

use crate::application::RenderConfig;
use crate::domain::{AudioSpec, GatewaySettings, Settings};

const CONFIG_FILE: &str = "stream-client";
const ENV_PREFIX: &str = "STREAM_CLIENT";

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSection {
    pub frame_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSection {
    pub timeout_secs: u64,
}

/// Client configuration: defaults, then `stream-client.toml`, then
/// `STREAM_CLIENT_*` environment variables (`__` separates nested keys)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub gateway: GatewaySettings,
    pub app: String,
    pub screen: ScreenSpec,
    pub render: RenderSection,
    pub audio: AudioSpec,
    pub http: HttpSection,
}

impl ClientConfig {
    pub fn load() -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let config = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Validated session settings
    pub fn settings(&self) -> Result<Settings> {
        let settings = Settings {
            gateway: self.gateway.clone(),
            app: self.app.clone(),
            screen: self.screen,
        };
        settings
            .validate()
            .map_err(|e| anyhow!("invalid settings: {}", e))?;
        Ok(settings)
    }

    pub fn audio_spec(&self) -> Result<AudioSpec> {
        self.audio
            .validate()
            .map_err(|e| anyhow!("invalid audio configuration: {}", e))?;
        Ok(self.audio)
    }

    pub fn render_config(&self) -> Result<RenderConfig> {
        let config = RenderConfig {
            frame_timeout: Duration::from_millis(self.render.frame_timeout_ms),
        };
        config
            .validate()
            .map_err(|e| anyhow!("invalid render configuration: {}", e))?;
        Ok(config)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    let builder = Config::builder()
        .set_default("gateway.url", "")?
        .set_default("gateway.api_token", "")?
        .set_default("gateway.use_insecure_tls", false)?
        .set_default("gateway.region", "")?
        .set_default("app", "")?
        .set_default("screen.width", 1280_i64)?
        .set_default("screen.height", 720_i64)?
        .set_default("screen.fps", 60_i64)?
        .set_default("screen.density", 180_i64)?
        .set_default("render.frame_timeout_ms", 100_i64)?
        .set_default("audio.format", "pcm16")?
        .set_default("audio.freq", 48_000_i64)?
        .set_default("audio.channels", 2_i64)?
        .set_default("http.timeout_secs", 30_i64)?;
    Ok(builder)
}
