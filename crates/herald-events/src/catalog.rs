//! The event catalog: every broadcast name and the payload bound to it.
//!
//! Each entry produces a zero-sized marker type implementing
//! [`BroadcastEvent`], a variant of [`EventName`] and a variant of the
//! tagged [`Event`] envelope. The trait is sealed, so names outside this
//! list cannot be subscribed to or broadcast.

use crate::bus::BroadcastBus;
use crate::payload::{
    AlbumChange, AppendedMessage, ArchivedUnread, AudioPlayback, ChannelRef, DeletedMessages,
    DialogDropped, DialogMigration, DraftChange, EditedMessage, MessageRef, PeerRef, PollChange,
    SentMessage, TypingState, UnreadCount, ViewCount, WebPageChange,
};
use herald_protocol::{
    ApiUpdate as RawUpdate, ChatId, ConnectionStatusChange, Dialog, DialogFilter, FilterId,
    GroupCall, MessageId, PeerId, StickerSet, UserId,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

mod sealed {
    pub trait Sealed {}
}

/// A catalog entry. `NAME` is the wire name, `Payload` the shape every
/// publisher must send and every subscriber receives.
pub trait BroadcastEvent: sealed::Sealed + Send + Sync + 'static {
    const NAME: EventName;
    type Payload: Send + Sync + 'static;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event name: {0}")]
pub struct EventNameParseError(pub String);

macro_rules! catalog {
    ($( $(#[$meta:meta])* $marker:ident => $name:literal : $payload:ty, )+) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $marker;

            impl sealed::Sealed for $marker {}

            impl BroadcastEvent for $marker {
                const NAME: EventName = EventName::$marker;
                type Payload = $payload;
            }
        )+

        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum EventName {
            $(
                #[serde(rename = $name)]
                $marker,
            )+
        }

        impl EventName {
            pub const ALL: &'static [EventName] = &[$(EventName::$marker,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$marker => $name,)+
                }
            }
        }

        impl std::str::FromStr for EventName {
            type Err = EventNameParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$marker),)+
                    _ => Err(EventNameParseError(s.to_string())),
                }
            }
        }

        /// A catalog event together with its payload, for code that receives
        /// events in serialized or otherwise dynamic form.
        ///
        /// Void events may omit `detail` entirely.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type", content = "detail")]
        pub enum Event {
            $(
                #[serde(rename = $name)]
                $marker($payload),
            )+
        }

        impl<'de> Deserialize<'de> for Event {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = RawEvent::deserialize(deserializer)?;
                let event = match raw.name {
                    $(EventName::$marker => serde_json::from_value(raw.detail).map(Self::$marker),)+
                };
                event.map_err(D::Error::custom)
            }
        }

        impl Event {
            pub fn event_name(&self) -> EventName {
                match self {
                    $(Self::$marker(_) => EventName::$marker,)+
                }
            }

            pub(crate) fn dispatch_on(self, bus: &BroadcastBus) {
                match self {
                    $(Self::$marker(payload) => bus.broadcast::<$marker>(payload),)+
                }
            }
        }
    };
}

catalog! {
    UserUpdate => "user_update": PeerId,
    /// The signed-in account. Drives the bus's own auth state.
    UserAuth => "user_auth": UserId,
    PeerChanged => "peer_changed": PeerId,
    PeerPinnedMessages => "peer_pinned_messages": PeerId,
    PeerTypings => "peer_typings": TypingState,

    FilterDelete => "filter_delete": DialogFilter,
    FilterUpdate => "filter_update": DialogFilter,
    FilterOrder => "filter_order": Vec<FilterId>,

    DialogDraft => "dialog_draft": DraftChange,
    DialogUnread => "dialog_unread": UnreadCount,
    DialogFlush => "dialog_flush": PeerRef,
    DialogDrop => "dialog_drop": DialogDropped,
    DialogMigrate => "dialog_migrate": DialogMigration,
    DialogNotifySettings => "dialog_notify_settings": PeerId,
    DialogsMultiupdate => "dialogs_multiupdate": BTreeMap<PeerId, Dialog>,
    DialogsArchivedUnread => "dialogs_archived_unread": ArchivedUnread,

    HistoryAppend => "history_append": AppendedMessage,
    HistoryUpdate => "history_update": MessageRef,
    HistoryReplyMarkup => "history_reply_markup": PeerRef,
    /// New message ids grouped by peer, flushed in one batch.
    HistoryMultiappend => "history_multiappend": BTreeMap<PeerId, BTreeSet<MessageId>>,
    HistoryDelete => "history_delete": DeletedMessages,
    HistoryForbidden => "history_forbidden": PeerId,
    HistoryReload => "history_reload": PeerId,
    HistoryRequest => "history_request": (),

    MessageEdit => "message_edit": EditedMessage,
    MessageViews => "message_views": ViewCount,
    MessageSent => "message_sent": SentMessage,
    MessagesPending => "messages_pending": (),
    MessagesRead => "messages_read": (),
    MessagesDownloaded => "messages_downloaded": Vec<MessageId>,
    MessagesMediaRead => "messages_media_read": Vec<MessageId>,

    AlbumEdit => "album_edit": AlbumChange,

    StickersInstalled => "stickers_installed": StickerSet,
    StickersDeleted => "stickers_deleted": StickerSet,

    AudioPlay => "audio_play": AudioPlayback,
    AudioPause => "audio_pause": (),

    StateSynchronized => "state_synchronized": PeerId,
    StateSynchronizing => "state_synchronizing": PeerId,

    AvatarUpdate => "avatar_update": PeerId,
    ChatFullUpdate => "chat_full_update": ChatId,
    PollUpdate => "poll_update": PollChange,
    ChatUpdate => "chat_update": ChatId,
    ChannelSettings => "channel_settings": ChannelRef,
    WebpageUpdated => "webpage_updated": WebPageChange,
    GroupCallUpdate => "group_call_update": GroupCall,

    /// Raw protocol update; the body stays an open field map.
    ApiUpdate => "apiUpdate": RawUpdate,
    /// Unconstrained payload. The only entry without a fixed shape.
    DownloadProgress => "download_progress": serde_json::Value,
    /// Per-connection transport status. Drives the bus's connection map.
    ConnectionStatusChanged => "connection_status_change": ConnectionStatusChange,
}

/// Wire form of [`Event`]. A missing `detail` reads as `null`.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    name: EventName,
    #[serde(default)]
    detail: serde_json::Value,
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
