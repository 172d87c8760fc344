//! Herald Events - typed broadcast bus for the chat client
//!
//! Publishers and subscribers agree on payload shapes through the closed
//! [`catalog`]: every event name is a marker type whose payload type is fixed
//! at compile time. The [`BroadcastBus`] fans each broadcast out
//! synchronously to the callbacks registered for that name and keeps the
//! signed-in user id and per-connection status it observes along the way.

mod bus;
pub mod catalog;
mod listeners;
mod payload;
mod state;

pub use bus::{BroadcastBus, BusSettings, Callback, EventBus};
pub use catalog::{BroadcastEvent, Event, EventName, EventNameParseError};
pub use listeners::ListenerSet;
pub use payload::*;
pub use state::AuthState;
