use crate::catalog::{BroadcastEvent, ConnectionStatusChanged, Event, EventName, UserAuth};
use crate::state::{AuthState, DerivedState};
use herald_protocol::{ConnectionStatusChange, UserId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A subscriber callback. The `Arc` is the callback's identity: pass the
/// same handle to [`BroadcastBus::unsubscribe`] to remove it.
pub type Callback<E> = Arc<dyn Fn(&<E as BroadcastEvent>::Payload) + Send + Sync>;

/// Producer-side seam for code that only publishes dynamic envelopes.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: Event);
    fn listener_count(&self, name: EventName) -> usize;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusSettings {
    /// Maximum number of connection names kept in the status map. `None`
    /// keeps every name ever reported.
    #[serde(default)]
    pub connection_status_limit: Option<usize>,
}

struct Listener {
    id: u64,
    once: bool,
    /// Always a `Callback<E>` for the `E` whose name keys this listener.
    callback: Box<dyn Any + Send + Sync>,
}

type Registry = HashMap<EventName, Vec<Arc<Listener>>>;

/// Process-wide publish/subscribe registry keyed by catalog name.
///
/// Delivery is synchronous: [`broadcast`](Self::broadcast) runs every
/// listener registered for the name, in registration order, before it
/// returns. Clones share the same registry and derived state.
#[derive(Clone)]
pub struct BroadcastBus {
    registry: Arc<RwLock<Registry>>,
    state: Arc<RwLock<DerivedState>>,
    next_id: Arc<AtomicU64>,
}

impl BroadcastBus {
    pub fn new() -> Self {
        Self::with_settings(&BusSettings::default())
    }

    pub fn with_settings(settings: &BusSettings) -> Self {
        let bus = Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            state: Arc::new(RwLock::new(DerivedState::new(
                settings.connection_status_limit,
            ))),
            next_id: Arc::new(AtomicU64::new(0)),
        };
        bus.install_state_listeners();
        bus
    }

    fn install_state_listeners(&self) {
        let state = self.state.clone();
        self.subscribe::<UserAuth>(move |user_id| {
            state.write().set_user(*user_id);
        });

        let state = self.state.clone();
        self.subscribe::<ConnectionStatusChanged>(move |change| {
            state.write().record_connection(change.clone());
        });
    }

    pub fn subscribe<E: BroadcastEvent>(
        &self,
        callback: impl Fn(&E::Payload) + Send + Sync + 'static,
    ) -> Callback<E> {
        let callback: Callback<E> = Arc::new(callback);
        self.register::<E>(callback.clone(), false);
        callback
    }

    /// Registers an existing handle again. Every registration is invoked,
    /// so a handle added twice runs twice per broadcast.
    pub fn subscribe_callback<E: BroadcastEvent>(&self, callback: &Callback<E>) {
        self.register::<E>(callback.clone(), false);
    }

    /// Like [`subscribe`](Self::subscribe), but the registration is removed
    /// as the first broadcast that reaches it begins delivery.
    pub fn subscribe_once<E: BroadcastEvent>(
        &self,
        callback: impl Fn(&E::Payload) + Send + Sync + 'static,
    ) -> Callback<E> {
        let callback: Callback<E> = Arc::new(callback);
        self.register::<E>(callback.clone(), true);
        callback
    }

    fn register<E: BroadcastEvent>(&self, callback: Callback<E>, once: bool) {
        let listener = Arc::new(Listener {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            once,
            callback: Box::new(callback),
        });

        let mut registry = self.registry.write();
        let listeners = registry.entry(E::NAME).or_default();
        listeners.push(listener);
        tracing::trace!("Subscribed to {} ({} listeners)", E::NAME, listeners.len());
    }

    /// Removes the earliest registration of `callback` under `E`. Returns
    /// `false` when there was nothing to remove.
    pub fn unsubscribe<E: BroadcastEvent>(&self, callback: &Callback<E>) -> bool {
        let mut registry = self.registry.write();
        let Some(listeners) = registry.get_mut(&E::NAME) else {
            return false;
        };

        let position = listeners.iter().position(|listener| {
            listener
                .callback
                .downcast_ref::<Callback<E>>()
                .is_some_and(|registered| Arc::ptr_eq(registered, callback))
        });

        match position {
            Some(index) => {
                listeners.remove(index);
                tracing::trace!(
                    "Unsubscribed from {} ({} listeners)",
                    E::NAME,
                    listeners.len()
                );
                true
            }
            None => false,
        }
    }

    /// Delivers `payload` to every listener registered under `E`.
    ///
    /// The listener list is copied before the first callback runs, so
    /// callbacks may subscribe or unsubscribe freely; those changes apply
    /// from the next broadcast on. A panicking callback does not stop the
    /// remaining ones. The first panic is resumed once all have run.
    pub fn broadcast<E: BroadcastEvent>(&self, payload: E::Payload) {
        let listeners = self.snapshot(E::NAME);
        if listeners.is_empty() {
            return;
        }

        tracing::debug!("Broadcasting {} to {} listeners", E::NAME, listeners.len());

        let mut first_panic = None;
        for listener in &listeners {
            let Some(callback) = listener.callback.downcast_ref::<Callback<E>>() else {
                tracing::warn!(
                    "Listener {} under {} has a foreign payload type",
                    listener.id,
                    E::NAME
                );
                continue;
            };

            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| callback(&payload))) {
                tracing::error!("Listener {} panicked while handling {}", listener.id, E::NAME);
                first_panic.get_or_insert(panic);
            }
        }

        if let Some(panic) = first_panic {
            panic::resume_unwind(panic);
        }
    }

    /// Broadcasts an event whose payload is `()`.
    pub fn signal<E: BroadcastEvent<Payload = ()>>(&self) {
        self.broadcast::<E>(());
    }

    /// Routes a dynamic envelope to the typed listeners for its name.
    pub fn dispatch(&self, event: Event) {
        event.dispatch_on(self);
    }

    fn snapshot(&self, name: EventName) -> Vec<Arc<Listener>> {
        let mut listeners = match self.registry.read().get(&name) {
            Some(listeners) => listeners.clone(),
            None => return Vec::new(),
        };

        if listeners.iter().any(|listener| listener.once) {
            let mut registry = self.registry.write();
            let mut claimed = Vec::new();
            if let Some(registered) = registry.get_mut(&name) {
                registered.retain(|listener| {
                    let take = listener.once
                        && listeners.iter().any(|snap| snap.id == listener.id);
                    if take {
                        claimed.push(listener.id);
                    }
                    !take
                });
            }
            // another broadcast may have claimed a once listener between the locks
            listeners.retain(|listener| !listener.once || claimed.contains(&listener.id));
        }

        listeners
    }

    /// Number of registrations under `name`, including the bus's own
    /// state listeners on `user_auth` and `connection_status_change`.
    pub fn listener_count(&self, name: EventName) -> usize {
        self.registry.read().get(&name).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, name: EventName) -> bool {
        self.listener_count(name) > 0
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.read().auth()
    }

    pub fn my_id(&self) -> Option<UserId> {
        self.auth_state().user_id()
    }

    pub fn connection_status(&self, name: &str) -> Option<ConnectionStatusChange> {
        self.state.read().connection(name).cloned()
    }

    pub fn connection_statuses(&self) -> HashMap<String, ConnectionStatusChange> {
        self.state.read().connections()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BroadcastBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.read();
        let listeners: usize = registry.values().map(Vec::len).sum();
        f.debug_struct("BroadcastBus")
            .field("names", &registry.len())
            .field("listeners", &listeners)
            .field("auth", &self.auth_state())
            .finish()
    }
}

impl EventBus for BroadcastBus {
    fn publish(&self, event: Event) {
        self.dispatch(event);
    }

    fn listener_count(&self, name: EventName) -> usize {
        BroadcastBus::listener_count(self, name)
    }
}
