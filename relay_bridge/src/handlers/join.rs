use relay_backend::prelude::*;

use crate::{
    delivery::{apply_rename, forward_messages, forward_renames},
    subscriptions::ActiveSubscription,
    BridgeError, BridgeResult, Client, ILayer, Renderer,
};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    /// Join a room: a channel of the current server, or the private channel
    /// with the named user outside of one.
    ///
    /// The client is sent the join with the current user list, followed by the
    /// room's backlog oldest-first. Renames and new messages are then forwarded
    /// as they happen.
    pub async fn handle_join(&mut self, name: &str) -> BridgeResult<()> {
        if self.layer.in_channel(name) {
            return Err(BridgeError::AlreadyInChannel);
        }

        let (session, scope) = self.session()?;
        let channel = Self::resolve_room(&session, scope, name).await?;

        let room = match scope {
            Scope::Direct => name.to_owned(),
            Scope::Guild(_) => session.channel_name(scope, channel.id)?,
        };
        let me = self.own_id()?;

        let (mut user_events, user_cancel) = session.subscribe_user_list(scope).into_parts();
        let user_list = ActiveSubscription::new(user_cancel);

        let mut names = Vec::new();
        while let Ok(change) = user_events.try_recv() {
            match change {
                UserListChange::Initial { name, .. } => names.push(name),
                UserListChange::Renamed { old, new, .. } => apply_rename(&mut names, &old, &new),
            }
        }

        let (message_events, message_cancel) = session.subscribe_messages(channel.id).into_parts();
        let live_messages = ActiveSubscription::new(message_cancel);

        let topic = self
            .renderer
            .render(scope, &*session, &channel.topic, None)
            .replace('\n', " ");

        // Until the client has been told about the join, failing here drops both
        // subscriptions, which cancels them
        self.layer.join(&room, &topic, channel.id.created_at(), &names)?;

        let forwarder = forward_renames(std::sync::Arc::clone(&self.layer), room.clone(), user_events);
        self.subscriptions.push(user_list.with_forwarder(forwarder));

        let delivery = self.delivery(&session, scope);
        let (backlog, replayed) = match session.messages(channel.id).await {
            Ok(backlog) => {
                let replayed = backlog
                    .iter()
                    .rev()
                    .try_for_each(|message| delivery.deliver(&room, message, true));
                (backlog, replayed.map_err(BridgeError::from))
            }
            Err(error) => (Vec::new(), Err(error.into())),
        };

        // The client is in the room now, so live messages are relayed even if the
        // backlog couldn't be
        let replayed_up_to = backlog.first().map(|m| m.id);
        let forwarder = forward_messages(delivery, room.clone(), me, replayed_up_to, message_events);
        self.subscriptions.push(live_messages.with_forwarder(forwarder));
        replayed?;

        tracing::debug!(%room, channel = %channel.id, members = names.len(), backlog = backlog.len(), "joined");
        Ok(())
    }
}
