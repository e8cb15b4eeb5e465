//! Bridge between a line-oriented chat client protocol and an ID-addressed chat
//! backend.
//!
//! One [`Client`] serves one client connection. The client layer ([`ILayer`])
//! parses incoming lines and calls the matching `handle_*` method; handlers
//! resolve client-side names to backend objects through the connection's
//! [`Session`](relay_backend::session::Session), perform the backend operation,
//! and return a result for the client layer to format.
//!
//! # Scope
//!
//! The client protocol has a single flat namespace. Which backend namespace it
//! maps onto is chosen when the client authenticates: a password of `token`
//! selects direct messages, where each room is the private channel with another
//! user, and `token:guild` selects that server, where rooms are its channels.
//! Scope is stored with the session handle and is only replaced with it.
//!
//! # Live updates
//!
//! Joining a room subscribes to the scope's user list and to the room's messages.
//! Events are forwarded to the client layer by background tasks holding a
//! snapshot of what they need; the subscriptions are cancelled when the session
//! is replaced or the client is closed or dropped.
//!
//! # Text conventions
//!
//! Messages starting with `s/` are edit commands against the sender's most recent
//! message (see [`text::Substitution`]). CTCP `ACTION` messages become emphasised
//! text, and `@name` tokens become backend mentions.

mod client;
pub use client::Client;

mod delivery;
mod errors;
pub use errors::{BridgeError, BridgeResult};

mod handlers;

pub mod config;
pub mod layer;
pub use layer::ILayer;

pub mod prefix;
pub mod render;
pub use render::Renderer;

mod subscriptions;
pub mod text;
pub mod tracing_config;
