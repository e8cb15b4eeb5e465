use relay_backend::prelude::*;

use crate::{layer::ListEntry, BridgeResult, Client, ILayer, Renderer};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    /// List the rooms available in the current scope: the server's visible
    /// channels, or the user's one-to-one private channels.
    pub async fn handle_list(&mut self) -> BridgeResult<Vec<ListEntry>> {
        let (session, scope) = self.session()?;
        let mut entries = Vec::new();

        match scope {
            Scope::Guild(guild) => {
                for channel in session.channels(guild).await? {
                    if !session.can_view_channel(&channel)? {
                        continue;
                    }

                    let topic = self.renderer.render(scope, &*session, &channel.topic, None);
                    entries.push(ListEntry {
                        channel: session.channel_name(scope, channel.id)?,
                        topic: topic.replace('\n', " "),
                    });
                }
            }
            Scope::Direct => {
                for channel in session.private_channels().await? {
                    if !channel.is_direct_message() {
                        continue;
                    }
                    let Some(recipient) = channel.recipients.first() else {
                        continue;
                    };

                    entries.push(ListEntry {
                        channel: session
                            .user_name(scope, recipient.id)
                            .unwrap_or_else(|_| recipient.username.clone()),
                        topic: format!("Direct message with {}", recipient.tag()),
                    });
                }
            }
        }

        Ok(entries)
    }
}
