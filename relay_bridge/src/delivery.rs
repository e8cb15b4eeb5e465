//! Translation of backend events into client notifications.
//!
//! Forwarding tasks run alongside command handlers. Each one works from the
//! snapshot it was created with (session handle, scope, room name) and makes a
//! single notification call per event, so nothing here reaches back into the
//! connection's command state.

use relay_backend::prelude::*;
use std::sync::Arc;
use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle};

use crate::{
    layer::{ILayer, OutboundMessage},
    prefix::user_prefix,
    render::Renderer,
};

/// Everything needed to turn a backend message into an [`OutboundMessage`]
pub(crate) struct Delivery<S, L, R> {
    pub session: Arc<S>,
    pub scope: Scope,
    pub layer: Arc<L>,
    pub renderer: Arc<R>,
}

impl<S, L, R> Clone for Delivery<S, L, R> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            scope: self.scope,
            layer: Arc::clone(&self.layer),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<S: Session, L: ILayer, R: Renderer> Delivery<S, L, R> {
    pub fn outbound(&self, room: &str, message: &Message, history: bool) -> OutboundMessage {
        let text = self
            .renderer
            .render(self.scope, &*self.session, &message.content, Some(message));

        let lines = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .chain(message.attachments.iter().map(|a| a.url.clone()))
            .collect();

        OutboundMessage {
            source: user_prefix(&*self.session, self.scope, &message.author),
            target: room.to_owned(),
            lines,
            time: message.id.created_at(),
            history,
        }
    }

    pub fn deliver(&self, room: &str, message: &Message, history: bool) -> anyhow::Result<()> {
        self.layer.send_message(&self.outbound(room, message, history))
    }
}

/// Apply a rename to a names list that hasn't been sent to the client yet
pub(crate) fn apply_rename(names: &mut [String], old: &str, new: &str) {
    if let Some(name) = names.iter_mut().find(|n| n.as_str() == old) {
        *name = new.to_owned();
    }
}

/// Forward later renames in a room's user list as rename notifications.
///
/// Initial entries arriving at this point belong to a names reply that has
/// already been sent, so they are dropped.
pub(crate) fn forward_renames<L: ILayer>(
    layer: Arc<L>,
    room: String,
    mut events: UnboundedReceiver<UserListChange>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(change) = events.recv().await {
            match change {
                UserListChange::Renamed { old, new, .. } => {
                    layer
                        .user_renamed(&room, &old, &new)
                        .or_log(format_args!("forwarding rename in {}", room));
                }
                UserListChange::Initial { user, .. } => {
                    tracing::trace!(%user, %room, "ignoring late user list entry");
                }
            }
        }
        tracing::debug!(%room, "user list subscription closed");
    })
}

/// Relay messages posted live in a room.
///
/// Messages at or before `replayed_up_to` were already delivered from backlog.
/// Messages by `me` are not relayed, since clients don't expect their own
/// messages echoed back.
pub(crate) fn forward_messages<S: Session, L: ILayer, R: Renderer>(
    delivery: Delivery<S, L, R>,
    room: String,
    me: UserId,
    replayed_up_to: Option<MessageId>,
    mut events: UnboundedReceiver<Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = events.recv().await {
            if message.author.id == me || replayed_up_to.is_some_and(|last| message.id <= last) {
                continue;
            }
            delivery
                .deliver(&room, &message, false)
                .or_log(format_args!("relaying message {} to {}", message.id, room));
        }
        tracing::debug!(%room, "message subscription closed");
    })
}
