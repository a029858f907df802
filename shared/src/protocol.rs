use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while decoding gateway messages
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

fn parse_message<T: DeserializeOwned>(data: &str) -> Result<T, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(data)?)
}

/// Screen geometry the streamed application is started with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSpec {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub density: u32,
}

/// Body of `POST /1.0/sessions/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub app: String,
    pub screen: ScreenSpec,
    pub region: String,
}

impl SessionRequest {
    pub fn to_json(&self) -> String {
        serde_json::json!({
            "app": self.app,
            "screen": {
                "width": self.screen.width,
                "height": self.screen.height,
                "fps": self.screen.fps,
                "density": self.screen.density,
            },
            "region": self.region,
        })
        .to_string()
    }
}

/// Generic gateway response envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub status_code: u32,
    pub error: String,
}

impl ResponseMessage {
    pub fn from_json(data: &str) -> Result<Self, ProtocolError> {
        parse_message(data)
    }

    /// Whether the envelope describes a failed operation
    pub fn is_error(&self) -> bool {
        self.kind == "error" || self.status_code >= 400
    }
}

/// STUN/TURN credentials handed verbatim to the media engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StunServer {
    pub urls: Vec<String>,
    pub username: String,
    pub password: String,
}

impl StunServer {
    pub fn from_json(data: &str) -> Result<Self, ProtocolError> {
        parse_message(data)
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({
            "urls": self.urls,
            "username": self.username,
            "password": self.password,
        })
        .to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSessionResponse {
    metadata: RawSessionMetadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSessionMetadata {
    id: String,
    url: String,
    region: String,
    stun_servers: Vec<serde_json::Value>,
}

/// Decoded `metadata` of a session-creation response.
///
/// Individual STUN entries that do not decode, or that carry no urls, are
/// skipped while the rest of the list is kept; `dropped_stun_servers` counts
/// them so callers can report a partial list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionResponse {
    pub id: String,
    pub url: String,
    pub region: String,
    pub stun_servers: Vec<StunServer>,
    pub dropped_stun_servers: usize,
}

impl SessionResponse {
    pub fn from_json(data: &str) -> Result<Self, ProtocolError> {
        let raw: RawSessionResponse = parse_message(data)?;
        let metadata = raw.metadata;

        let mut stun_servers = Vec::with_capacity(metadata.stun_servers.len());
        let mut dropped_stun_servers = 0;
        for entry in metadata.stun_servers {
            match serde_json::from_value::<StunServer>(entry) {
                Ok(server) if !server.urls.is_empty() => stun_servers.push(server),
                _ => dropped_stun_servers += 1,
            }
        }

        Ok(Self {
            id: metadata.id,
            url: metadata.url,
            region: metadata.region,
            stun_servers,
            dropped_stun_servers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_request_encoding() {
        let request = SessionRequest {
            app: "com.example.game".to_string(),
            screen: ScreenSpec { width: 1280, height: 720, fps: 60, density: 180 },
            region: "eu-west".to_string(),
        };

        let value: serde_json::Value = serde_json::from_str(&request.to_json()).unwrap();
        assert_eq!(value["app"], "com.example.game");
        assert_eq!(value["screen"]["width"], 1280);
        assert_eq!(value["screen"]["height"], 720);
        assert_eq!(value["screen"]["fps"], 60);
        assert_eq!(value["screen"]["density"], 180);
        assert_eq!(value["region"], "eu-west");
    }

    #[test]
    fn test_session_response_decoding() {
        let data = r#"{"metadata":{"id":"abc","url":"wss://x","stun_servers":[{"urls":["stun:1.2.3.4"],"username":"u","password":"p"}]}}"#;
        let response = SessionResponse::from_json(data).unwrap();

        assert_eq!(response.id, "abc");
        assert_eq!(response.url, "wss://x");
        assert_eq!(response.region, "");
        assert_eq!(response.stun_servers.len(), 1);
        assert_eq!(response.stun_servers[0].urls, vec!["stun:1.2.3.4".to_string()]);
        assert_eq!(response.stun_servers[0].username, "u");
        assert_eq!(response.stun_servers[0].password, "p");
        assert_eq!(response.dropped_stun_servers, 0);
    }

    #[test]
    fn test_session_response_missing_fields_default() {
        let response = SessionResponse::from_json(r#"{"type":"sync"}"#).unwrap();
        assert!(response.id.is_empty());
        assert!(response.url.is_empty());
        assert!(response.stun_servers.is_empty());
    }

    #[test]
    fn test_malformed_stun_entries_are_dropped() {
        let data = r#"{"metadata":{"id":"abc","url":"wss://x","stun_servers":[
            {"urls":["turn:10.0.0.1"],"username":"a","password":"b"},
            {"urls":"not-a-list"},
            {"username":"no-urls"},
            {"urls":["stun:10.0.0.2"]}
        ]}}"#;
        let response = SessionResponse::from_json(data).unwrap();

        assert_eq!(response.stun_servers.len(), 2);
        assert_eq!(response.stun_servers[0].urls, vec!["turn:10.0.0.1".to_string()]);
        assert_eq!(response.stun_servers[1].urls, vec!["stun:10.0.0.2".to_string()]);
        assert_eq!(response.dropped_stun_servers, 2);
    }

    #[test]
    fn test_empty_and_invalid_input_fail() {
        assert!(matches!(SessionResponse::from_json(""), Err(ProtocolError::Empty)));
        assert!(matches!(ResponseMessage::from_json(""), Err(ProtocolError::Empty)));
        assert!(matches!(StunServer::from_json(""), Err(ProtocolError::Empty)));

        assert!(matches!(
            SessionResponse::from_json("<html>bad gateway</html>"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(ResponseMessage::from_json("{\"status_code\": \"oops\"}").is_err());
        assert!(SessionResponse::from_json("{\"metadata\": {\"id\": 12}}").is_err());
    }

    #[test]
    fn test_response_envelope() {
        let ok = ResponseMessage::from_json(
            r#"{"type":"sync","status":"Success","status_code":200}"#,
        )
        .unwrap();
        assert_eq!(ok.kind, "sync");
        assert_eq!(ok.status, "Success");
        assert_eq!(ok.status_code, 200);
        assert!(!ok.is_error());

        let failed = ResponseMessage::from_json(
            r#"{"type":"error","error":"application not found","status_code":404}"#,
        )
        .unwrap();
        assert!(failed.is_error());
        assert_eq!(failed.error, "application not found");
    }

    #[test]
    fn test_stun_server_json() {
        let server = StunServer {
            urls: vec!["turn:relay.example.com:3478".to_string()],
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        let decoded = StunServer::from_json(&server.to_json()).unwrap();
        assert_eq!(decoded, server);
    }
}
