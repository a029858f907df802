use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Settings;
use crate::error::GatewayError;

/// Response of a successful gateway request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Port for talking to the session gateway (implemented by infrastructure).
///
/// Any status outside `[200, 400)` is reported as [`GatewayError::Status`].
/// Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewayPort: Send + Sync {
    async fn send_post(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
    ) -> Result<HttpResponse, GatewayError>;

    async fn send_delete(&self, url: &str) -> Result<(), GatewayError>;
}

/// Builds a gateway client carrying the credentials of one session
pub trait GatewayConnector: Send + Sync {
    fn connect(&self, settings: &Settings) -> Result<Arc<dyn GatewayPort>, GatewayError>;
}

impl<F> GatewayConnector for F
where
    F: Fn(&Settings) -> Result<Arc<dyn GatewayPort>, GatewayError> + Send + Sync,
{
    fn connect(&self, settings: &Settings) -> Result<Arc<dyn GatewayPort>, GatewayError> {
        self(settings)
    }
}
