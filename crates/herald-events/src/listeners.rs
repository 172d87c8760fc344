use crate::bus::{BroadcastBus, Callback};
use crate::catalog::BroadcastEvent;

type Remover = Box<dyn FnOnce(&BroadcastBus) + Send>;

/// Tracks the subscriptions one component makes so they can all be
/// removed together when the component is torn down. Dropping the set
/// removes whatever is still registered.
pub struct ListenerSet {
    bus: BroadcastBus,
    removers: Vec<Remover>,
}

impl ListenerSet {
    pub fn new(bus: &BroadcastBus) -> Self {
        Self {
            bus: bus.clone(),
            removers: Vec::new(),
        }
    }

    pub fn add<E: BroadcastEvent>(
        &mut self,
        callback: impl Fn(&E::Payload) + Send + Sync + 'static,
    ) -> Callback<E> {
        let callback = self.bus.subscribe::<E>(callback);
        self.track::<E>(&callback);
        callback
    }

    pub fn add_once<E: BroadcastEvent>(
        &mut self,
        callback: impl Fn(&E::Payload) + Send + Sync + 'static,
    ) -> Callback<E> {
        let callback = self.bus.subscribe_once::<E>(callback);
        self.track::<E>(&callback);
        callback
    }

    fn track<E: BroadcastEvent>(&mut self, callback: &Callback<E>) {
        let handle = callback.clone();
        self.removers.push(Box::new(move |bus| {
            bus.unsubscribe::<E>(&handle);
        }));
    }

    pub fn len(&self) -> usize {
        self.removers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removers.is_empty()
    }

    pub fn remove_all(&mut self) {
        if self.removers.is_empty() {
            return;
        }

        tracing::trace!("Removing {} tracked listeners", self.removers.len());
        for remove in self.removers.drain(..) {
            remove(&self.bus);
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.remove_all();
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("tracked", &self.removers.len())
            .finish()
    }
}
