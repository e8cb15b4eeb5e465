//! The client-protocol side of a bridged connection.
//!
//! The [`ILayer`] owns line framing, registration state and channel membership
//! for one client connection. It dispatches each parsed command to the matching
//! `handle_*` method on [`Client`](crate::Client), one at a time, and the client
//! calls back into it to push notifications.

use chrono::{DateTime, Utc};

use crate::prefix::IdentityPrefix;

/// One entry of a channel listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub channel: String,
    pub topic: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WhoisReply {
    pub prefix: IdentityPrefix,
    pub realname: String,
}

/// A backend message, ready to be written to the client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub source: IdentityPrefix,
    /// The room the message was posted in
    pub target: String,
    /// One client-protocol message per line
    pub lines: Vec<String>,
    pub time: DateTime<Utc>,
    /// Replayed from backlog, rather than posted live
    pub history: bool,
}

/// Notifications pushed to the client connection.
///
/// These may be called from event forwarding tasks concurrently with a command
/// handler, so implementations must be internally synchronised.
pub trait ILayer: Send + Sync + 'static {
    fn set_client_prefix(&self, prefix: IdentityPrefix);

    fn is_registered(&self) -> bool;

    fn in_channel(&self, name: &str) -> bool;

    /// Populate connection state once registration has completed
    fn seed_state(&self) -> anyhow::Result<()>;

    fn join(
        &self,
        name: &str,
        topic: &str,
        created_at: DateTime<Utc>,
        names: &[String],
    ) -> anyhow::Result<()>;

    /// A user visible in `room` changed display name
    fn user_renamed(&self, room: &str, old: &str, new: &str) -> anyhow::Result<()>;

    fn send_message(&self, message: &OutboundMessage) -> anyhow::Result<()>;
}
