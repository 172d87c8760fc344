//! Dialog list records

use crate::{FilterId, MessageId, PeerId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    pub peer_id: PeerId,
    pub top_message: MessageId,
    #[serde(default)]
    pub read_inbox_max_id: MessageId,
    #[serde(default)]
    pub read_outbox_max_id: MessageId,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub unread_mentions_count: u32,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<DraftMessage>,
}

impl Dialog {
    pub fn new(peer_id: PeerId, top_message: MessageId) -> Self {
        Self {
            peer_id,
            top_message,
            read_inbox_max_id: MessageId::default(),
            read_outbox_max_id: MessageId::default(),
            unread_count: 0,
            unread_mentions_count: 0,
            pinned: false,
            folder_id: None,
            draft: None,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.folder_id == Some(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMessage {
    pub message: String,
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_msg_id: Option<MessageId>,
    #[serde(default)]
    pub no_webpage: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogFilter {
    pub id: FilterId,
    pub title: String,
    #[serde(default)]
    pub include_peers: Vec<PeerId>,
    #[serde(default)]
    pub exclude_peers: Vec<PeerId>,
    #[serde(default)]
    pub pinned_peers: Vec<PeerId>,
    #[serde(default)]
    pub exclude_muted: bool,
    #[serde(default)]
    pub exclude_read: bool,
    #[serde(default)]
    pub exclude_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingAction {
    Typing,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadPhoto,
    UploadDocument,
    ChooseSticker,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTyping {
    pub user_id: UserId,
    pub action: TypingAction,
    pub timestamp: i64,
}
