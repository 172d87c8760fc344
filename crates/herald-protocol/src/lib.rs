//! Herald Protocol - payload types for the client broadcast bus
//!
//! These are the data shapes bound to event names in the catalog:
//! - Identifier newtypes (peers, users, chats, messages)
//! - Dialog, draft and filter records
//! - Media records (sticker sets, documents, polls, group calls)
//! - Connection status and the generic protocol update envelope

mod dialogs;
mod media;
mod network;
mod types;

pub use dialogs::*;
pub use media::*;
pub use network::*;
pub use types::*;
