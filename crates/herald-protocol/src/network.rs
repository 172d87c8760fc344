//! Connection status and raw protocol updates

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    Closed,
    TimedOut,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => write!(f, "connected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Closed => write!(f, "closed"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// Status report from one named transport connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatusChange {
    pub name: String,
    pub status: ConnectionStatus,
    pub dc_id: u32,
    #[serde(default)]
    pub is_file_networker: bool,
    #[serde(default)]
    pub is_file_download: bool,
    #[serde(default)]
    pub is_file_upload: bool,
    /// Unix millis of the next reconnect attempt, if one is scheduled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_at: Option<i64>,
}

impl ConnectionStatusChange {
    pub fn new(name: impl Into<String>, status: ConnectionStatus, dc_id: u32) -> Self {
        Self {
            name: name.into(),
            status,
            dc_id,
            is_file_networker: false,
            is_file_download: false,
            is_file_upload: false,
            retry_at: None,
        }
    }

    pub fn with_retry_at(mut self, retry_at: i64) -> Self {
        self.retry_at = Some(retry_at);
        self
    }
}

/// Raw server update. Only the constructor name is typed; the body is kept
/// as an open field map for consumers that understand it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUpdate {
    #[serde(rename = "_")]
    pub constructor: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ApiUpdate {
    pub fn new(constructor: impl Into<String>) -> Self {
        Self {
            constructor: constructor.into(),
            fields: serde_json::Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }
}
