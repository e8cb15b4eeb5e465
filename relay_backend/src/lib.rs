//! The back-protocol model consumed by the bridge.
//!
//! Nothing in this crate talks to the network. It defines the identifiers and
//! object records the backend hands out, the [`Session`](session::Session)
//! trait through which the bridge performs lookups and mutations, and the
//! [`Subscription`](subscription::Subscription) type used to deliver live
//! events back to a connection.
//!
//! Name resolution is split out into [`NameResolver`](session::NameResolver):
//! those lookups are answered from the session's local cache and never block,
//! so they are safe to call from inside event forwarding code.

pub mod prelude;

pub mod id;
pub mod errors;
pub mod objects;
pub mod scope;
pub mod session;
pub mod subscription;

pub mod utils;
