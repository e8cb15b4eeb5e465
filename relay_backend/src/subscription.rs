//! Live event delivery from a session to a connection

use crate::prelude::*;
use std::fmt;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A change to the user list of a scope
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserListChange {
    /// A member present when the subscription was made
    Initial { user: UserId, name: String },
    /// A member's display name changed
    Renamed { user: UserId, old: String, new: String },
}

impl UserListChange {
    pub fn user(&self) -> UserId {
        match self {
            Self::Initial { user, .. } | Self::Renamed { user, .. } => *user,
        }
    }
}

/// Deregisters a subscription when cancelled.
///
/// Cancelling more than once is harmless. A handle that is dropped without
/// being cancelled is cancelled on drop.
pub struct CancelHandle(Option<Box<dyn FnOnce() + Send>>);

impl CancelHandle {
    pub fn new(on_cancel: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(on_cancel)))
    }

    /// A handle with nothing to deregister
    pub fn noop() -> Self {
        Self(None)
    }

    pub fn cancel(&mut self) {
        if let Some(on_cancel) = self.0.take() {
            on_cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_none()
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// A live registration: a queue of events and the handle that ends it
#[derive(Debug)]
pub struct Subscription<T> {
    events: UnboundedReceiver<T>,
    cancel: CancelHandle,
}

impl<T> Subscription<T> {
    pub fn new(events: UnboundedReceiver<T>, cancel: CancelHandle) -> Self {
        Self { events, cancel }
    }

    /// Create a subscription along with the sender its events should be pushed to
    pub fn channel(cancel: CancelHandle) -> (UnboundedSender<T>, Self) {
        let (sender, events) = unbounded_channel();
        (sender, Self::new(events, cancel))
    }

    pub fn into_parts(self) -> (UnboundedReceiver<T>, CancelHandle) {
        (self.events, self.cancel)
    }
}
