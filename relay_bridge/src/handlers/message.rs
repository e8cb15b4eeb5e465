use relay_backend::prelude::*;

use crate::{
    text::{is_substitution, replace_mentions, unwrap_action, Substitution},
    BridgeError, BridgeResult, Client, ILayer, Renderer,
};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    /// Send a message to a room.
    ///
    /// Content of the form `s/pattern/replacement/[g]` is not sent; it edits the
    /// sender's most recent message in the room instead.
    pub async fn handle_message(&mut self, target: &str, content: &str) -> BridgeResult<()> {
        let (session, scope) = self.session()?;

        if is_substitution(content) {
            let substitution = Substitution::parse(content)?;
            let channel = Self::resolve_room(&session, scope, target).await?;
            return Self::edit_own_message(&session, self.own_id()?, channel.id, &substitution).await;
        }

        let channel = Self::resolve_room(&session, scope, target).await?;

        let content = unwrap_action(content);
        let content = replace_mentions(&*session, scope, &content);

        let sent = session.send_message(channel.id, &content).await?;
        self.last_sent.insert(channel.id, sent.id);

        tracing::trace!(channel = %channel.id, message = %sent.id, "sent message");
        Ok(())
    }

    async fn edit_own_message(
        session: &F::Session,
        me: UserId,
        channel: ChannelId,
        substitution: &Substitution,
    ) -> BridgeResult<()> {
        let backlog = session.messages(channel).await?;
        let own = backlog
            .iter()
            .find(|m| m.author.id == me)
            .ok_or(BridgeError::OwnMessageNotFound)?;

        let message = session.message(channel, own.id).await?;
        let edited = substitution.apply(&message.content)?;
        session.edit_message(message.channel, message.id, &edited).await?;

        tracing::trace!(%channel, message = %message.id, "edited message");
        Ok(())
    }
}
