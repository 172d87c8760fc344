//! Structured payloads for catalog entries that carry more than one field.
//! Entries that carry a single identifier or record use the protocol type
//! directly.

use herald_protocol::{
    ChatId, Dialog, Document, DraftMessage, MessageId, PeerId, Poll, PollResults, UserTyping,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingState {
    pub peer_id: PeerId,
    pub typings: Vec<UserTyping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftChange {
    pub peer_id: PeerId,
    /// `None` when the draft was cleared.
    #[serde(default)]
    pub draft: Option<DraftMessage>,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    pub peer_id: PeerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRef {
    pub peer_id: PeerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogDropped {
    pub peer_id: PeerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<Dialog>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogMigration {
    pub migrate_from: PeerId,
    pub migrate_to: PeerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedUnread {
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendedMessage {
    pub peer_id: PeerId,
    pub message_id: MessageId,
    #[serde(default)]
    pub my: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub peer_id: PeerId,
    pub mid: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedMessages {
    pub peer_id: PeerId,
    pub msgs: BTreeSet<MessageId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedMessage {
    pub peer_id: PeerId,
    pub mid: MessageId,
    #[serde(default)]
    pub just_media: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCount {
    pub mid: MessageId,
    pub views: u32,
}

/// Remaps a locally queued message to the id the server assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub temp_id: MessageId,
    pub mid: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumChange {
    pub peer_id: PeerId,
    pub group_id: String,
    pub deleted_mids: Vec<MessageId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioPlayback {
    pub doc: Document,
    pub mid: MessageId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollChange {
    pub poll: Poll,
    pub results: PollResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub channel_id: ChatId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPageChange {
    pub id: String,
    pub msgs: Vec<MessageId>,
}
