//! Cookie-session authentication over the key-value store.
//!
//! Users live at `user:<lowercased-email>`, sessions at
//! `session:<sid>` with a store-enforced TTL. Handlers compose the
//! stores with the cookie protocol.

pub mod cookie;
pub mod handlers;
pub mod hasher;
pub mod session;
pub mod users;

pub use session::{SessionRecord, SessionStore};
pub use users::{UserRecord, UserStore};
