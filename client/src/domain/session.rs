use chrono::{DateTime, Utc};
use shared::{SessionResponse, StunServer};

use super::settings::Settings;

/// Gateway-assigned session id value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A session the gateway has allocated for us
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub id: SessionId,
    pub signaling_url: String,
    pub region: String,
    pub stun_servers: Vec<StunServer>,
    pub settings: Settings,
    pub created_at: DateTime<Utc>,
}

impl ActiveSession {
    /// Build from a decoded gateway response; id and signaling url are required
    pub fn from_response(settings: Settings, response: SessionResponse) -> Result<Self, &'static str> {
        if response.id.is_empty() {
            return Err("id");
        }
        if response.url.is_empty() {
            return Err("url");
        }
        Ok(Self {
            id: SessionId::from_string(response.id),
            signaling_url: response.url,
            region: response.region,
            stun_servers: response.stun_servers,
            settings,
            created_at: Utc::now(),
        })
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Active(ActiveSession),
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            SessionState::Active(session) => Some(session),
            SessionState::Idle => None,
        }
    }

    pub fn id(&self) -> &str {
        self.active().map(|s| s.id.as_str()).unwrap_or_default()
    }

    pub fn signaling_url(&self) -> &str {
        self.active().map(|s| s.signaling_url.as_str()).unwrap_or_default()
    }

    pub fn region(&self) -> &str {
        self.active().map(|s| s.region.as_str()).unwrap_or_default()
    }

    pub fn stun_servers(&self) -> &[StunServer] {
        self.active().map(|s| s.stun_servers.as_slice()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::tests::sample_settings;

    fn response(id: &str, url: &str) -> SessionResponse {
        SessionResponse {
            id: id.to_string(),
            url: url.to_string(),
            region: "eu-west".to_string(),
            stun_servers: vec![StunServer {
                urls: vec!["stun:1.2.3.4".to_string()],
                username: "u".to_string(),
                password: "p".to_string(),
            }],
            dropped_stun_servers: 0,
        }
    }

    #[test]
    fn test_active_session_requires_id_and_url() {
        assert_eq!(
            ActiveSession::from_response(sample_settings(), response("", "wss://x")),
            Err("id")
        );
        assert_eq!(
            ActiveSession::from_response(sample_settings(), response("abc", "")),
            Err("url")
        );

        let session = ActiveSession::from_response(sample_settings(), response("abc", "wss://x")).unwrap();
        assert_eq!(session.id.as_str(), "abc");
        assert_eq!(session.signaling_url, "wss://x");
        assert_eq!(session.region, "eu-west");
    }

    #[test]
    fn test_idle_accessors_are_empty() {
        let state = SessionState::Idle;
        assert!(!state.is_active());
        assert_eq!(state.id(), "");
        assert_eq!(state.signaling_url(), "");
        assert_eq!(state.region(), "");
        assert!(state.stun_servers().is_empty());
    }

    #[test]
    fn test_active_accessors() {
        let session = ActiveSession::from_response(sample_settings(), response("abc", "wss://x")).unwrap();
        let state = SessionState::Active(session);
        assert!(state.is_active());
        assert_eq!(state.id(), "abc");
        assert_eq!(state.signaling_url(), "wss://x");
        assert_eq!(state.stun_servers().len(), 1);
    }
}
