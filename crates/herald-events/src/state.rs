use herald_protocol::{ConnectionStatusChange, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of the signed-in account as last observed on the bus.
/// There is no logout transition; once authenticated it only moves to
/// another user id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "user_id", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(UserId),
}

impl AuthState {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Debug)]
struct TrackedStatus {
    seq: u64,
    change: ConnectionStatusChange,
}

/// Fields the bus maintains from its own broadcasts.
#[derive(Debug, Default)]
pub(crate) struct DerivedState {
    auth: AuthState,
    connections: HashMap<String, TrackedStatus>,
    next_seq: u64,
    connection_limit: Option<usize>,
}

impl DerivedState {
    pub(crate) fn new(connection_limit: Option<usize>) -> Self {
        Self {
            connection_limit: connection_limit.map(|limit| limit.max(1)),
            ..Self::default()
        }
    }

    pub(crate) fn auth(&self) -> AuthState {
        self.auth
    }

    pub(crate) fn set_user(&mut self, user_id: UserId) {
        self.auth = AuthState::Authenticated(user_id);
    }

    pub(crate) fn connection(&self, name: &str) -> Option<&ConnectionStatusChange> {
        self.connections.get(name).map(|tracked| &tracked.change)
    }

    pub(crate) fn connections(&self) -> HashMap<String, ConnectionStatusChange> {
        self.connections
            .iter()
            .map(|(name, tracked)| (name.clone(), tracked.change.clone()))
            .collect()
    }

    /// Last write wins per connection name. With a limit configured, the
    /// least recently updated name is dropped once the map grows past it.
    pub(crate) fn record_connection(&mut self, change: ConnectionStatusChange) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.connections
            .insert(change.name.clone(), TrackedStatus { seq, change });

        let Some(limit) = self.connection_limit else {
            return;
        };

        while self.connections.len() > limit {
            let oldest = self
                .connections
                .iter()
                .min_by_key(|(_, tracked)| tracked.seq)
                .map(|(name, _)| name.clone());

            match oldest {
                Some(name) => {
                    tracing::warn!("Connection status limit reached, forgetting '{}'", name);
                    self.connections.remove(&name);
                }
                None => break,
            }
        }
    }
}
