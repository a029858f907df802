use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::application::ports::{GatewayConnector, GatewayPort, HttpResponse};
use crate::domain::Settings;
use crate::error::GatewayError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Construction options for [`HttpGatewayClient`]
#[derive(Debug, Clone, Default)]
pub struct HttpClientOptions {
    /// Sent with every request
    pub headers: Vec<(String, String)>,
    pub insecure_tls: bool,
    pub timeout: Option<Duration>,
}

/// reqwest-based gateway client.
///
/// Redirects are not followed, so a 3xx reply counts as success and its body
/// is returned as-is.
pub struct HttpGatewayClient {
    client: reqwest::Client,
}

impl HttpGatewayClient {
    pub fn new(options: HttpClientOptions) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| GatewayError::InvalidHeader(name.clone()))?;
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|_| GatewayError::InvalidHeader(name.clone()))?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .danger_accept_invalid_certs(options.insecure_tls);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(GatewayError::ClientBuild)?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse, GatewayError> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(GatewayError::Transport)?;
        let body = String::from_utf8(bytes.to_vec()).map_err(GatewayError::InvalidBody)?;
        debug!("Gateway replied with HTTP {} ({} bytes)", status, body.len());

        if !(200..400).contains(&status) {
            return Err(GatewayError::Status { status, body });
        }
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl GatewayPort for HttpGatewayClient {
    async fn send_post(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
    ) -> Result<HttpResponse, GatewayError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body.to_owned())
            .send()
            .await
            .map_err(GatewayError::Transport)?;
        Self::read(response).await
    }

    async fn send_delete(&self, url: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(GatewayError::Transport)?;
        Self::read(response).await.map(|_| ())
    }
}

/// Builds an [`HttpGatewayClient`] authorized for the session's gateway
#[derive(Debug, Clone)]
pub struct HttpGatewayConnector {
    timeout: Duration,
}

impl HttpGatewayConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpGatewayConnector {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl GatewayConnector for HttpGatewayConnector {
    fn connect(&self, settings: &Settings) -> Result<Arc<dyn GatewayPort>, GatewayError> {
        let client = HttpGatewayClient::new(HttpClientOptions {
            headers: vec![(AUTHORIZATION.as_str().to_string(), settings.authorization())],
            insecure_tls: settings.gateway.use_insecure_tls,
            timeout: Some(self.timeout),
        })?;
        Ok(Arc::new(client))
    }
}
