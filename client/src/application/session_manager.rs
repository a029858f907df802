use shared::{ResponseMessage, SessionResponse, StunServer};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::application::ports::{GatewayConnector, GatewayPort};
use crate::domain::{ActiveSession, SessionState, Settings};
use crate::error::GatewayError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Negotiates the lifecycle of one remote session with the gateway.
///
/// At most one session is active per manager. A session still active when the
/// manager is dropped is released in the background if a tokio runtime is
/// available.
pub struct SessionManager {
    connector: Arc<dyn GatewayConnector>,
    client: Option<Arc<dyn GatewayPort>>,
    state: SessionState,
}

impl SessionManager {
    pub fn new(connector: Arc<dyn GatewayConnector>) -> Self {
        Self {
            connector,
            client: None,
            state: SessionState::Idle,
        }
    }

    /// Ask the gateway for a new session running `settings.app`
    pub async fn setup(&mut self, settings: &Settings) -> Result<(), GatewayError> {
        if self.state.is_active() {
            return Err(GatewayError::AlreadyActive);
        }

        settings.validate().map_err(GatewayError::InvalidSettings)?;

        let client = self.connector.connect(settings)?;
        let request = settings.session_request().to_json();
        let endpoint = settings.sessions_endpoint();
        debug!("Requesting session for {} from {}", settings.app, endpoint);

        let response = match client.send_post(&endpoint, JSON_CONTENT_TYPE, &request).await {
            Ok(response) => response,
            Err(e) => {
                log_gateway_failure("create session", &e);
                return Err(e);
            }
        };

        let decoded = SessionResponse::from_json(&response.body)?;
        if decoded.dropped_stun_servers > 0 {
            warn!(
                "Ignored {} malformed STUN server entries in gateway response",
                decoded.dropped_stun_servers
            );
        }

        let session = ActiveSession::from_response(settings.clone(), decoded)
            .map_err(GatewayError::MissingField)?;

        info!(
            "Created session {} (region: {}, signaling: {})",
            session.id, session.region, session.signaling_url
        );

        self.client = Some(client);
        self.state = SessionState::Active(session);
        Ok(())
    }

    /// Terminate the active session. Does nothing when idle.
    ///
    /// On failure the session stays active so the caller may retry.
    pub async fn release(&mut self) -> Result<(), GatewayError> {
        let (Some(session), Some(client)) = (self.state.active(), self.client.as_ref()) else {
            return Ok(());
        };

        let endpoint = session.settings.session_endpoint(session.id.as_str());
        debug!("Deleting session {}", session.id);

        if let Err(e) = client.send_delete(&endpoint).await {
            log_gateway_failure("delete session", &e);
            return Err(e);
        }

        info!("Released session {}", session.id);
        self.state = SessionState::Idle;
        self.client = None;
        Ok(())
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn id(&self) -> &str {
        self.state.id()
    }

    pub fn signaling_url(&self) -> &str {
        self.state.signaling_url()
    }

    pub fn region(&self) -> &str {
        self.state.region()
    }

    pub fn stun_servers(&self) -> &[StunServer] {
        self.state.stun_servers()
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.state.active().map(|session| &session.settings)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        let SessionState::Active(session) = std::mem::take(&mut self.state) else {
            return;
        };
        let Some(client) = self.client.take() else {
            return;
        };

        let endpoint = session.settings.session_endpoint(session.id.as_str());
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                debug!("Releasing session {} in background", session.id);
                handle.spawn(async move {
                    match client.send_delete(&endpoint).await {
                        Ok(()) => info!("Released session {}", session.id),
                        Err(e) => log_gateway_failure("delete session", &e),
                    }
                });
            }
            Err(_) => warn!(
                "Session {} still active and no runtime available to release it",
                session.id
            ),
        }
    }
}

fn log_gateway_failure(operation: &str, e: &GatewayError) {
    match e {
        GatewayError::Status { status, body } => {
            let detail = ResponseMessage::from_json(body)
                .ok()
                .map(|message| message.error)
                .filter(|text| !text.is_empty());
            match detail {
                Some(text) => error!("Failed to {}: HTTP {}: {}", operation, status, text),
                None => error!("Failed to {}: HTTP {}", operation, status),
            }
        }
        other => error!("Failed to {}: {}", operation, other),
    }
}
