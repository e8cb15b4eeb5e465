use relay_backend::prelude::*;

use crate::{BridgeError, BridgeResult, Client, ILayer, Renderer};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    /// Before registration a nickname is just an announcement, and is accepted
    /// as-is. Afterwards it renames the user in the current server; there is no
    /// equivalent outside of one.
    pub async fn handle_nickname(&mut self, nickname: &str) -> BridgeResult<String> {
        if !self.layer.is_registered() {
            return Ok(nickname.to_owned());
        }

        let Scope::Guild(guild) = self.scope() else {
            return Err(BridgeError::NotInServer);
        };

        let (session, _) = self.session()?;
        session.change_own_nickname(guild, nickname).await?;

        tracing::debug!(%guild, "changed own nickname");
        Ok(nickname.to_owned())
    }

    /// The backend has no username; accept whatever the client sends
    pub fn handle_username(&mut self, username: &str) -> BridgeResult<String> {
        Ok(username.to_owned())
    }

    /// The backend has no real name; accept whatever the client sends
    pub fn handle_realname(&mut self, realname: &str) -> BridgeResult<String> {
        Ok(realname.to_owned())
    }

    pub fn handle_ping(&mut self, nonce: &str) -> BridgeResult<String> {
        Ok(nonce.to_owned())
    }
}
