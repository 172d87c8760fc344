use std::sync::Arc;

use herald_events::catalog::{
    ConnectionStatusChanged, DialogDraft, DialogUnread, DownloadProgress, HistoryAppend,
    MessageEdit, PeerChanged, UserAuth,
};
use herald_events::{
    AppendedMessage, AuthState, BroadcastBus, Callback, DraftChange, EditedMessage, Event,
    EventName, UnreadCount,
};
use herald_protocol::{ConnectionStatus, ConnectionStatusChange, MessageId, PeerId, UserId};
use parking_lot::Mutex;
use serde_json::json;

fn unread(peer: i64, count: u32) -> UnreadCount {
    UnreadCount {
        peer_id: PeerId(peer),
        count: Some(count),
    }
}

#[test]
fn test_unread_scenario() {
    let bus = BroadcastBus::new();
    let received = Arc::new(Mutex::new(Vec::new()));

    let log = received.clone();
    let cb_a = bus.subscribe::<DialogUnread>(move |payload| log.lock().push(*payload));

    bus.broadcast::<DialogUnread>(unread(7, 3));
    assert_eq!(*received.lock(), vec![unread(7, 3)]);

    assert!(bus.unsubscribe::<DialogUnread>(&cb_a));
    bus.broadcast::<DialogUnread>(unread(7, 4));
    assert_eq!(received.lock().len(), 1);
}

#[test]
fn test_every_subscriber_called_exactly_once() {
    let bus = BroadcastBus::new();
    let counts = Arc::new(Mutex::new([0usize; 4]));

    for slot in 0..4 {
        let counts = counts.clone();
        bus.subscribe::<MessageEdit>(move |edit| {
            assert_eq!(edit.mid, MessageId(55));
            counts.lock()[slot] += 1;
        });
    }

    bus.broadcast::<MessageEdit>(EditedMessage {
        peer_id: PeerId(1),
        mid: MessageId(55),
        just_media: false,
    });

    assert_eq!(*counts.lock(), [1, 1, 1, 1]);
}

#[test]
fn test_no_cross_talk_between_names() {
    let bus = BroadcastBus::new();
    let calls = Arc::new(Mutex::new(0));

    let counter = calls.clone();
    bus.subscribe::<HistoryAppend>(move |_| *counter.lock() += 1);

    bus.broadcast::<PeerChanged>(PeerId(1));
    bus.broadcast::<DialogUnread>(unread(1, 1));
    assert_eq!(*calls.lock(), 0);

    bus.broadcast::<HistoryAppend>(AppendedMessage {
        peer_id: PeerId(1),
        message_id: MessageId(2),
        my: true,
    });
    assert_eq!(*calls.lock(), 1);
}

#[test]
fn test_auth_state_follows_user_auth() {
    let bus = BroadcastBus::new();
    assert_eq!(bus.auth_state(), AuthState::Unauthenticated);
    assert_eq!(bus.my_id(), None);

    bus.broadcast::<UserAuth>(UserId(42));
    assert_eq!(bus.my_id(), Some(UserId(42)));

    bus.broadcast::<PeerChanged>(PeerId(9));
    bus.broadcast::<DownloadProgress>(json!({"done": 10, "total": 20}));
    assert_eq!(bus.auth_state(), AuthState::Authenticated(UserId(42)));
}

#[test]
fn test_connection_status_last_write_wins() {
    let bus = BroadcastBus::new();

    bus.broadcast::<ConnectionStatusChanged>(ConnectionStatusChange::new(
        "websocket",
        ConnectionStatus::Connecting,
        2,
    ));
    bus.broadcast::<ConnectionStatusChanged>(
        ConnectionStatusChange::new("websocket", ConnectionStatus::TimedOut, 2)
            .with_retry_at(1_700_000_000_000),
    );

    let status = bus.connection_status("websocket").unwrap();
    assert_eq!(status.status, ConnectionStatus::TimedOut);
    assert_eq!(status.retry_at, Some(1_700_000_000_000));
    assert!(bus.connection_status("download-4").is_none());
    assert_eq!(bus.connection_statuses().len(), 1);
}

#[test]
fn test_clones_share_registry_and_state() {
    let bus = BroadcastBus::new();
    let handle = bus.clone();
    let calls = Arc::new(Mutex::new(0));

    let counter = calls.clone();
    handle.subscribe::<PeerChanged>(move |_| *counter.lock() += 1);
    bus.broadcast::<PeerChanged>(PeerId(4));
    bus.broadcast::<UserAuth>(UserId(8));

    assert_eq!(*calls.lock(), 1);
    assert_eq!(handle.my_id(), Some(UserId(8)));
}

#[test]
fn test_separate_buses_are_isolated() {
    let first = BroadcastBus::new();
    let second = BroadcastBus::new();

    first.broadcast::<UserAuth>(UserId(1));
    assert_eq!(second.my_id(), None);
}

#[test]
fn test_subscribe_during_dispatch_applies_next_time() {
    let bus = BroadcastBus::new();
    let late_calls = Arc::new(Mutex::new(0));

    let inner_bus = bus.clone();
    let counter = late_calls.clone();
    bus.subscribe_once::<PeerChanged>(move |_| {
        let counter = counter.clone();
        inner_bus.subscribe::<PeerChanged>(move |_| *counter.lock() += 1);
    });

    bus.broadcast::<PeerChanged>(PeerId(1));
    assert_eq!(*late_calls.lock(), 0);

    bus.broadcast::<PeerChanged>(PeerId(2));
    assert_eq!(*late_calls.lock(), 1);
}

#[test]
fn test_unsubscribe_during_dispatch_keeps_in_flight_delivery() {
    let bus = BroadcastBus::new();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let victim: Arc<Mutex<Option<Callback<PeerChanged>>>> = Arc::new(Mutex::new(None));

    let inner_bus = bus.clone();
    let target = victim.clone();
    bus.subscribe::<PeerChanged>(move |_| {
        if let Some(callback) = target.lock().as_ref() {
            inner_bus.unsubscribe::<PeerChanged>(callback);
        }
    });

    let log = calls.clone();
    let callback = bus.subscribe::<PeerChanged>(move |peer| log.lock().push(*peer));
    *victim.lock() = Some(callback);

    bus.broadcast::<PeerChanged>(PeerId(1));
    bus.broadcast::<PeerChanged>(PeerId(2));

    assert_eq!(*calls.lock(), vec![PeerId(1)]);
    assert_eq!(bus.listener_count(EventName::PeerChanged), 1);
}

#[test]
fn test_reentrant_broadcast_from_callback() {
    let bus = BroadcastBus::new();
    let drafts = Arc::new(Mutex::new(Vec::new()));

    let inner_bus = bus.clone();
    bus.subscribe::<DialogUnread>(move |payload| {
        inner_bus.broadcast::<DialogDraft>(DraftChange {
            peer_id: payload.peer_id,
            draft: None,
            index: 0,
        });
    });

    let log = drafts.clone();
    bus.subscribe::<DialogDraft>(move |change| log.lock().push(change.peer_id));

    bus.broadcast::<DialogUnread>(unread(12, 0));
    assert_eq!(*drafts.lock(), vec![PeerId(12)]);
}

#[test]
fn test_dispatch_from_serialized_envelope() {
    let bus = BroadcastBus::new();
    let received = Arc::new(Mutex::new(Vec::new()));

    let log = received.clone();
    bus.subscribe::<DialogUnread>(move |payload| log.lock().push(*payload));

    let event: Event = serde_json::from_value(json!({
        "type": "dialog_unread",
        "detail": {"peer_id": 7, "count": 3}
    }))
    .unwrap();
    bus.dispatch(event);

    let auth: Event = serde_json::from_value(json!({"type": "user_auth", "detail": 99})).unwrap();
    bus.dispatch(auth);

    assert_eq!(*received.lock(), vec![unread(7, 3)]);
    assert_eq!(bus.my_id(), Some(UserId(99)));
}

#[test]
fn test_broadcast_from_many_threads() {
    let bus = BroadcastBus::new();
    let calls = Arc::new(Mutex::new(0));

    let counter = calls.clone();
    bus.subscribe::<PeerChanged>(move |_| *counter.lock() += 1);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bus = bus.clone();
            std::thread::spawn(move || {
                for _ in 0..25 {
                    bus.broadcast::<PeerChanged>(PeerId(i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*calls.lock(), 200);
}
