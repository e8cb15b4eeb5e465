use relay_backend::prelude::*;

use crate::{client::BoundSession, BridgeResult, Client, ILayer, Renderer};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    /// Authenticate with a password of the form `token[:guild]`.
    ///
    /// Any existing session, and every subscription made through it, is released
    /// first. With a guild ID, the connection operates within that server;
    /// without one, it operates on direct messages. Nothing is bound unless the
    /// whole sequence succeeds.
    pub async fn handle_password(&mut self, password: &str) -> BridgeResult<String> {
        self.release_session();

        let (token, guild) = match password.split_once(':') {
            Some((token, guild)) => (token, Some(guild.parse::<GuildId>()?)),
            None => (password, None),
        };

        let session = self.factory.connect(token, self.backend_debug).await?;
        let me = session.me().await?.id;

        let scope = match guild {
            Some(id) => {
                let guild = session.guild(id).await?;
                session.guild_subscribe(guild.id).await?;
                tracing::info!(guild = %guild.id, guild_name = %guild.name, "authenticated in server scope");
                Scope::Guild(guild.id)
            }
            None => {
                tracing::info!("authenticated in direct message scope");
                Scope::Direct
            }
        };

        self.bound = Some(BoundSession { session, scope, me });
        Ok(password.to_owned())
    }
}
