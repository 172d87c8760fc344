//! Event log replay for the herald bus.

use herald_events::{AuthState, BroadcastBus, Event, EventName};
use herald_protocol::ConnectionStatusChange;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::BufRead;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read event log: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses one tagged event per line. Blank lines and lines starting with
/// `#` are skipped.
pub fn read_events(reader: impl BufRead) -> Result<Vec<Event>, ReplayError> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }

    Ok(events)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub by_name: BTreeMap<EventName, usize>,
    pub auth: AuthState,
    pub connections: BTreeMap<String, ConnectionStatusChange>,
}

pub fn replay(bus: &BroadcastBus, events: Vec<Event>) -> ReplaySummary {
    let mut by_name = BTreeMap::new();
    let total = events.len();

    for event in events {
        *by_name.entry(event.event_name()).or_insert(0) += 1;
        bus.dispatch(event);
    }

    tracing::info!("Replayed {} events across {} names", total, by_name.len());

    ReplaySummary {
        events: total,
        by_name,
        auth: bus.auth_state(),
        connections: bus.connection_statuses().into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_protocol::{ConnectionStatus, UserId};

    const LOG: &str = r#"
# session start
{"type": "user_auth", "detail": 42}
{"type": "connection_status_change", "detail": {"name": "websocket", "status": "connecting", "dc_id": 2}}

{"type": "connection_status_change", "detail": {"name": "websocket", "status": "connected", "dc_id": 2}}
{"type": "messages_read", "detail": null}
"#;

    #[test]
    fn test_read_events_skips_comments_and_blanks() {
        let events = read_events(LOG.as_bytes()).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], Event::UserAuth(UserId(42)));
    }

    #[test]
    fn test_read_events_reports_line() {
        let log = "{\"type\": \"user_auth\", \"detail\": 1}\n{\"type\": \"dialog_top\"}\n";
        match read_events(log.as_bytes()) {
            Err(ReplayError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_events_void_without_detail() {
        let log = "{\"type\": \"history_request\"}\n{\"type\": \"messages_pending\"}\n";
        let events = read_events(log.as_bytes()).unwrap();
        assert_eq!(
            events,
            vec![Event::HistoryRequest(()), Event::MessagesPending(())]
        );
    }

    #[test]
    fn test_replay_summary() {
        let bus = BroadcastBus::new();
        let events = read_events(LOG.as_bytes()).unwrap();
        let summary = replay(&bus, events);

        assert_eq!(summary.events, 4);
        assert_eq!(summary.by_name[&EventName::ConnectionStatusChanged], 2);
        assert_eq!(summary.auth, AuthState::Authenticated(UserId(42)));
        assert_eq!(
            summary.connections["websocket"].status,
            ConnectionStatus::Connected
        );
    }
}
