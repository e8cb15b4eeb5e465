use relay_backend::prelude::*;

use crate::{layer::WhoisReply, prefix::user_prefix, BridgeError, BridgeResult, Client, ILayer, Renderer};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    pub async fn handle_whois(&mut self, name: &str) -> BridgeResult<WhoisReply> {
        let (session, scope) = self.session()?;

        let id = session
            .user_from_name(scope, name)
            .ok_or_else(|| BridgeError::NoSuchUser(name.to_owned()))?;
        let user = session.user(id).await?;

        Ok(WhoisReply {
            prefix: user_prefix(&*session, scope, &user),
            realname: user.username,
        })
    }
}
