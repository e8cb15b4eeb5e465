use relay_backend::prelude::*;

use crate::{prefix::user_prefix, BridgeResult, Client, ILayer, Renderer};

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    /// Called once the client layer has everything it needs to complete
    /// registration. Requires an authenticated session.
    pub async fn handle_register(&mut self) -> BridgeResult<()> {
        let (session, scope) = self.session()?;

        let me = session.me().await?;
        self.layer.set_client_prefix(user_prefix(&*session, scope, &me));
        self.layer.seed_state()?;

        tracing::debug!(user = %me.id, "registration complete");
        Ok(())
    }
}
