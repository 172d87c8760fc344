//! Identifier types shared across the catalog

use serde::{Deserialize, Serialize};

/// Peer identifier. Positive values are users, negative values are chats
/// and channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(pub i64);

impl PeerId {
    pub fn is_user(&self) -> bool {
        self.0 > 0
    }

    pub fn is_chat(&self) -> bool {
        self.0 < 0
    }

    pub fn to_chat_id(&self) -> Option<ChatId> {
        self.is_chat().then(|| ChatId(-self.0))
    }

    pub fn to_user_id(&self) -> Option<UserId> {
        self.is_user().then_some(UserId(self.0))
    }
}

impl From<UserId> for PeerId {
    fn from(id: UserId) -> Self {
        Self(id.0)
    }
}

impl From<ChatId> for PeerId {
    fn from(id: ChatId) -> Self {
        Self(-id.0)
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier. Locally queued messages carry a temporary id until
/// the server assigns the final one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub i64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type FilterId = u32;
