//! The collaborator traits through which a bridge talks to the backend

use crate::prelude::*;
use std::future::Future;
use std::sync::Arc;

/// Resolves human-readable names to backend IDs and back, within a [`Scope`].
///
/// These are answered from the session's cache and never block. Names are
/// assumed to be unique within a scope; if two objects share a display name,
/// which one a lookup returns is unspecified.
pub trait NameResolver {
    fn user_from_name(&self, scope: Scope, name: &str) -> Option<UserId>;

    fn channel_from_name(&self, scope: Scope, name: &str) -> Option<ChannelId>;

    /// The display name for a user, as seen from within `scope`
    fn user_name(&self, scope: Scope, id: UserId) -> LookupResult<String>;

    /// The canonical display name for a channel within `scope`
    fn channel_name(&self, scope: Scope, id: ChannelId) -> LookupResult<String>;
}

/// An authenticated backend connection.
///
/// Every async method is a round-trip from the caller's point of view; retry and
/// timeout policy, if any, belongs to the implementation.
pub trait Session: NameResolver + Send + Sync + 'static {
    /// The authenticated user
    fn me(&self) -> impl Future<Output = BackendResult<User>> + Send;

    fn guild(&self, id: GuildId) -> impl Future<Output = BackendResult<Guild>> + Send;

    /// Ask the gateway to stream live events for a guild to this session
    fn guild_subscribe(&self, id: GuildId) -> impl Future<Output = BackendResult<()>> + Send;

    fn channel(&self, id: ChannelId) -> impl Future<Output = BackendResult<Channel>> + Send;

    fn channels(&self, guild: GuildId) -> impl Future<Output = BackendResult<Vec<Channel>>> + Send;

    fn private_channels(&self) -> impl Future<Output = BackendResult<Vec<Channel>>> + Send;

    fn user(&self, id: UserId) -> impl Future<Output = BackendResult<User>> + Send;

    /// Recent messages in a channel, newest first
    fn messages(&self, channel: ChannelId) -> impl Future<Output = BackendResult<Vec<Message>>> + Send;

    fn message(
        &self,
        channel: ChannelId,
        id: MessageId,
    ) -> impl Future<Output = BackendResult<Message>> + Send;

    fn send_message(
        &self,
        channel: ChannelId,
        content: &str,
    ) -> impl Future<Output = BackendResult<Message>> + Send;

    fn edit_message(
        &self,
        channel: ChannelId,
        id: MessageId,
        content: &str,
    ) -> impl Future<Output = BackendResult<Message>> + Send;

    /// Fetch the private channel with a user, creating it if it doesn't exist yet
    fn create_private_channel(
        &self,
        user: UserId,
    ) -> impl Future<Output = BackendResult<Channel>> + Send;

    fn change_own_nickname(
        &self,
        guild: GuildId,
        nickname: &str,
    ) -> impl Future<Output = BackendResult<()>> + Send;

    /// Whether the authenticated user may currently view a channel
    fn can_view_channel(&self, channel: &Channel) -> BackendResult<bool>;

    /// Subscribe to changes in the user list for a scope. Every current member is
    /// queued as a [`UserListChange::Initial`] entry before this returns; later
    /// renames follow as [`UserListChange::Renamed`].
    fn subscribe_user_list(&self, scope: Scope) -> Subscription<UserListChange>;

    /// Subscribe to messages posted in a channel from now on
    fn subscribe_messages(&self, channel: ChannelId) -> Subscription<Message>;
}

/// Hands out sessions for authentication tokens.
///
/// Sessions are shared: the returned handle is reference counted, and dropping
/// the last clone releases the underlying connection.
pub trait SessionFactory: Send + Sync {
    type Session: Session;

    fn connect(
        &self,
        token: &str,
        debug: bool,
    ) -> impl Future<Output = BackendResult<Arc<Self::Session>>> + Send;
}
