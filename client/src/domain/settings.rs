use serde::{Deserialize, Serialize};
use shared::{ScreenSpec, SessionRequest};
use std::fmt;
use url::Url;

/// Gateway endpoint and credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub url: String,
    pub api_token: String,
    #[serde(default)]
    pub use_insecure_tls: bool,
    /// Empty lets the gateway pick a region
    #[serde(default)]
    pub region: String,
}

impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("url", &self.url)
            .field("api_token", &"<redacted>")
            .field("use_insecure_tls", &self.use_insecure_tls)
            .field("region", &self.region)
            .finish()
    }
}

/// Immutable input for a streaming session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub app: String,
    pub screen: ScreenSpec,
}

impl Settings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.gateway.url.is_empty() {
            return Err("No gateway URL specified");
        }
        match Url::parse(&self.gateway.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => return Err("Gateway URL must be an absolute http(s) URL"),
        }
        if self.gateway.api_token.is_empty() {
            return Err("No gateway API token specified");
        }
        if self.app.is_empty() {
            return Err("No application specified");
        }
        if self.screen.width == 0 {
            return Err("Invalid screen width specified");
        }
        if self.screen.height == 0 {
            return Err("Invalid screen height specified");
        }
        if self.screen.fps == 0 {
            return Err("Invalid screen FPS specified");
        }
        if self.screen.density == 0 {
            return Err("Invalid screen density specified");
        }
        Ok(())
    }

    pub fn session_request(&self) -> SessionRequest {
        SessionRequest {
            app: self.app.clone(),
            screen: self.screen,
            region: self.gateway.region.clone(),
        }
    }

    /// Value of the `Authorization` header sent with every gateway request
    pub fn authorization(&self) -> String {
        format!("Macaroon root={}", self.gateway.api_token)
    }

    /// `{gateway}/1.0/sessions/`
    pub fn sessions_endpoint(&self) -> String {
        format!("{}/1.0/sessions/", self.gateway_base())
    }

    /// `{gateway}/1.0/sessions/{id}/`
    pub fn session_endpoint(&self, id: &str) -> String {
        format!("{}/1.0/sessions/{}/", self.gateway_base(), id)
    }

    fn gateway_base(&self) -> &str {
        self.gateway.url.trim_end_matches('/')
    }
}
