use relay_backend::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    config::BridgeConfig,
    delivery::Delivery,
    errors::{BridgeError, BridgeResult},
    layer::ILayer,
    render::Renderer,
    subscriptions::SubscriptionSet,
};

/// The session handle a connection is bound to, and the scope selected along
/// with it. The scope can only change by replacing the whole binding.
pub(crate) struct BoundSession<S> {
    pub session: Arc<S>,
    pub scope: Scope,
    /// The authenticated user
    pub me: UserId,
}

/// The bridge state for one client connection.
///
/// The client layer must not run two command handlers concurrently; handlers take
/// `&mut self`, and each suspends the connection's command processing until its
/// backend round-trips complete.
pub struct Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    pub(crate) factory: F,
    pub(crate) layer: Arc<L>,
    pub(crate) renderer: Arc<R>,
    pub(crate) backend_debug: bool,
    pub(crate) bound: Option<BoundSession<F::Session>>,
    pub(crate) subscriptions: SubscriptionSet,
    pub(crate) last_sent: HashMap<ChannelId, MessageId>,
}

impl<F, L, R> Client<F, L, R>
where
    F: SessionFactory,
    L: ILayer,
    R: Renderer,
{
    pub fn new(factory: F, layer: Arc<L>, renderer: Arc<R>, config: &BridgeConfig) -> Self {
        Self {
            factory,
            layer,
            renderer,
            backend_debug: config.backend_debug,
            bound: None,
            subscriptions: SubscriptionSet::default(),
            last_sent: HashMap::new(),
        }
    }

    /// The scope selected at authentication, or `Direct` if there is no session
    pub fn scope(&self) -> Scope {
        self.bound.as_ref().map_or(Scope::Direct, |b| b.scope)
    }

    pub fn has_session(&self) -> bool {
        self.bound.is_some()
    }

    /// The last message this connection sent to a channel, if any
    pub fn last_sent_message(&self, channel: ChannelId) -> Option<MessageId> {
        self.last_sent.get(&channel).copied()
    }

    /// The number of live subscriptions held for this connection
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Tear down the connection's backend state: cancel every subscription and
    /// release the session handle. Safe to call more than once; also happens on
    /// drop.
    pub fn close(&mut self) {
        self.release_session();
    }

    pub(crate) fn release_session(&mut self) {
        self.subscriptions.release_all();
        self.last_sent.clear();
        if self.bound.take().is_some() {
            tracing::debug!("released session");
        }
    }

    pub(crate) fn session(&self) -> BridgeResult<(Arc<F::Session>, Scope)> {
        self.bound
            .as_ref()
            .map(|b| (Arc::clone(&b.session), b.scope))
            .ok_or(BridgeError::NoSession)
    }

    pub(crate) fn own_id(&self) -> BridgeResult<UserId> {
        self.bound.as_ref().map(|b| b.me).ok_or(BridgeError::NoSession)
    }

    pub(crate) fn delivery(&self, session: &Arc<F::Session>, scope: Scope) -> Delivery<F::Session, L, R> {
        Delivery {
            session: Arc::clone(session),
            scope,
            layer: Arc::clone(&self.layer),
            renderer: Arc::clone(&self.renderer),
        }
    }

    /// Find the channel a client-side room name refers to.
    ///
    /// Outside a server, rooms are named after the other user, and the private
    /// channel with them is created on demand.
    pub(crate) async fn resolve_room(
        session: &F::Session,
        scope: Scope,
        name: &str,
    ) -> BridgeResult<Channel> {
        match scope {
            Scope::Direct => {
                let user = session
                    .user_from_name(scope, name)
                    .ok_or_else(|| BridgeError::NoSuchUser(name.to_owned()))?;
                Ok(session.create_private_channel(user).await?)
            }
            Scope::Guild(_) => {
                let id = session
                    .channel_from_name(scope, name)
                    .ok_or_else(|| BridgeError::NoSuchChannel(name.to_owned()))?;
                Ok(session.channel(id).await?)
            }
        }
    }
}
