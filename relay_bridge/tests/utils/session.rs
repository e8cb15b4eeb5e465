use parking_lot::Mutex;
use relay_backend::prelude::*;
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::mpsc::UnboundedSender;

/// 2022-01-01T00:00:00Z
pub const BASE_MILLIS: u64 = 1_640_995_200_000;

/// Tokens the fake factory refuses
pub const BAD_TOKEN: &str = "expired";

/// A snowflake minted `seconds` after [`BASE_MILLIS`]
pub fn snowflake(seconds: u64) -> Snowflake {
    Snowflake::from_parts(BASE_MILLIS + seconds * 1000, 0, 0, 0)
}

#[derive(Default)]
pub struct FakeState {
    pub me: Option<User>,
    pub users: Vec<User>,
    /// Display names, per scope, in member list order
    pub members: Vec<(Scope, UserId, String)>,
    pub guilds: Vec<Guild>,
    pub channels: Vec<Channel>,
    pub hidden: Vec<ChannelId>,
    /// Every message, oldest first
    pub messages: Vec<Message>,

    pub connections: Vec<(String, bool)>,
    pub requests: Vec<&'static str>,
    pub sent: Vec<(ChannelId, String)>,
    pub edits: Vec<(ChannelId, MessageId, String)>,
    pub nicknames: Vec<(GuildId, String)>,

    /// Make backlog fetches fail
    pub fail_messages: bool,

    user_lists: Vec<(Scope, UnboundedSender<UserListChange>)>,
    message_streams: Vec<(ChannelId, UnboundedSender<Message>)>,
}

/// An in-memory backend, seen from one user's point of view
pub struct FakeSession {
    pub state: Mutex<FakeState>,
    cancelled: Arc<AtomicUsize>,
    next_id: AtomicU64,
}

impl FakeSession {
    pub fn new(me: User) -> Arc<Self> {
        let state = FakeState {
            me: Some(me.clone()),
            users: vec![me],
            ..Default::default()
        };

        Arc::new(Self {
            state: Mutex::new(state),
            cancelled: Arc::new(AtomicUsize::new(0)),
            next_id: AtomicU64::new(1000),
        })
    }

    pub fn add_user(&self, user: User) {
        self.state.lock().users.push(user);
    }

    pub fn add_member(&self, scope: Scope, user: UserId, name: &str) {
        self.state.lock().members.push((scope, user, name.to_owned()));
    }

    pub fn add_guild(&self, id: GuildId, name: &str) {
        self.state.lock().guilds.push(Guild {
            id,
            name: name.to_owned(),
        });
    }

    pub fn add_channel(&self, channel: Channel) {
        self.state.lock().channels.push(channel);
    }

    pub fn hide(&self, channel: ChannelId) {
        self.state.lock().hidden.push(channel);
    }

    fn next_message_id(&self) -> MessageId {
        MessageId::from(snowflake(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    /// Post a message as `author`, delivering it to any live subscribers
    pub fn post(&self, channel: ChannelId, author: u64, content: &str) -> Message {
        self.post_with_attachments(channel, author, content, Vec::new())
    }

    pub fn post_with_attachments(
        &self,
        channel: ChannelId,
        author: u64,
        content: &str,
        attachments: Vec<Attachment>,
    ) -> Message {
        let id = self.next_message_id();
        let mut state = self.state.lock();

        let author = state
            .users
            .iter()
            .find(|u| u.id == UserId::from(author))
            .cloned()
            .expect("message author should be a known user");

        let message = Message {
            id,
            channel,
            author,
            content: content.to_owned(),
            attachments,
        };
        state.messages.push(message.clone());

        for (_, stream) in state.message_streams.iter().filter(|(c, _)| *c == channel) {
            let _ = stream.send(message.clone());
        }
        message
    }

    /// Change a user's display name within `scope`, notifying user list subscribers
    pub fn rename(&self, scope: Scope, user: u64, new: &str) {
        let user = UserId::from(user);
        let mut state = self.state.lock();

        let Some(entry) = state.members.iter_mut().find(|(s, u, _)| *s == scope && *u == user) else {
            return;
        };
        let old = std::mem::replace(&mut entry.2, new.to_owned());

        for (_, list) in state.user_lists.iter().filter(|(s, _)| *s == scope) {
            let _ = list.send(UserListChange::Renamed {
                user,
                old: old.clone(),
                new: new.to_owned(),
            });
        }
    }

    /// The number of backend round-trips of a given kind
    pub fn request_count(&self, name: &str) -> usize {
        self.state.lock().requests.iter().filter(|r| **r == name).count()
    }

    pub fn total_requests(&self) -> usize {
        self.state.lock().requests.len()
    }

    /// The number of subscriptions that have been cancelled
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(ChannelId, String)> {
        self.state.lock().sent.clone()
    }

    pub fn edits(&self) -> Vec<(ChannelId, MessageId, String)> {
        self.state.lock().edits.clone()
    }

    fn request(&self, name: &'static str) {
        self.state.lock().requests.push(name);
    }

    fn cancel_handle(&self) -> CancelHandle {
        let cancelled = Arc::clone(&self.cancelled);
        CancelHandle::new(move || {
            cancelled.fetch_add(1, Ordering::SeqCst);
        })
    }
}

impl NameResolver for FakeSession {
    fn user_from_name(&self, scope: Scope, name: &str) -> Option<UserId> {
        self.state
            .lock()
            .members
            .iter()
            .find(|(s, _, n)| *s == scope && n == name)
            .map(|(_, id, _)| *id)
    }

    fn channel_from_name(&self, scope: Scope, name: &str) -> Option<ChannelId> {
        self.state
            .lock()
            .channels
            .iter()
            .find(|c| Scope::from(c.guild) == scope && c.name == name)
            .map(|c| c.id)
    }

    fn user_name(&self, scope: Scope, id: UserId) -> LookupResult<String> {
        self.state
            .lock()
            .members
            .iter()
            .find(|(s, u, _)| *s == scope && *u == id)
            .map(|(_, _, name)| name.clone())
            .ok_or(LookupError::NoNameForUser(id))
    }

    fn channel_name(&self, scope: Scope, id: ChannelId) -> LookupResult<String> {
        self.state
            .lock()
            .channels
            .iter()
            .find(|c| Scope::from(c.guild) == scope && c.id == id)
            .map(|c| c.name.clone())
            .ok_or(LookupError::NoNameForChannel(id))
    }
}

impl Session for FakeSession {
    async fn me(&self) -> BackendResult<User> {
        self.request("me");
        self.state
            .lock()
            .me
            .clone()
            .ok_or_else(|| BackendError::Unauthorised("not logged in".to_string()))
    }

    async fn guild(&self, id: GuildId) -> BackendResult<Guild> {
        self.request("guild");
        self.state
            .lock()
            .guilds
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| LookupError::NoSuchGuild(id).into())
    }

    async fn guild_subscribe(&self, _id: GuildId) -> BackendResult<()> {
        self.request("guild_subscribe");
        Ok(())
    }

    async fn channel(&self, id: ChannelId) -> BackendResult<Channel> {
        self.request("channel");
        self.state
            .lock()
            .channels
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| LookupError::NoSuchChannel(id).into())
    }

    async fn channels(&self, guild: GuildId) -> BackendResult<Vec<Channel>> {
        self.request("channels");
        Ok(self
            .state
            .lock()
            .channels
            .iter()
            .filter(|c| c.guild == Some(guild))
            .cloned()
            .collect())
    }

    async fn private_channels(&self) -> BackendResult<Vec<Channel>> {
        self.request("private_channels");
        Ok(self
            .state
            .lock()
            .channels
            .iter()
            .filter(|c| c.guild.is_none())
            .cloned()
            .collect())
    }

    async fn user(&self, id: UserId) -> BackendResult<User> {
        self.request("user");
        self.state
            .lock()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| LookupError::NoSuchUser(id).into())
    }

    async fn messages(&self, channel: ChannelId) -> BackendResult<Vec<Message>> {
        self.request("messages");
        let state = self.state.lock();
        if state.fail_messages {
            return Err(BackendError::Request("backlog unavailable".to_string()));
        }
        let backlog = state
            .messages
            .iter()
            .rev()
            .filter(|m| m.channel == channel)
            .cloned()
            .collect();
        Ok(backlog)
    }

    async fn message(&self, channel: ChannelId, id: MessageId) -> BackendResult<Message> {
        self.request("message");
        self.state
            .lock()
            .messages
            .iter()
            .find(|m| m.channel == channel && m.id == id)
            .cloned()
            .ok_or_else(|| LookupError::NoSuchMessage(id).into())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> BackendResult<Message> {
        self.request("send_message");
        let me = {
            let mut state = self.state.lock();
            state.sent.push((channel, content.to_owned()));
            state.me.as_ref().map(|u| u.id.get())
        };
        let me = me.ok_or_else(|| BackendError::Unauthorised("not logged in".to_string()))?;
        Ok(self.post(channel, me, content))
    }

    async fn edit_message(&self, channel: ChannelId, id: MessageId, content: &str) -> BackendResult<Message> {
        self.request("edit_message");
        let mut state = self.state.lock();
        state.edits.push((channel, id, content.to_owned()));

        let message = state
            .messages
            .iter_mut()
            .find(|m| m.channel == channel && m.id == id)
            .ok_or(LookupError::NoSuchMessage(id))?;
        message.content = content.to_owned();
        Ok(message.clone())
    }

    async fn create_private_channel(&self, user: UserId) -> BackendResult<Channel> {
        self.request("create_private_channel");
        let id = ChannelId::from(*self.next_message_id());
        let mut state = self.state.lock();

        if let Some(existing) = state
            .channels
            .iter()
            .find(|c| c.is_direct_message() && c.recipients.first().map(|r| r.id) == Some(user))
        {
            return Ok(existing.clone());
        }

        let recipient = state
            .users
            .iter()
            .find(|u| u.id == user)
            .cloned()
            .ok_or(LookupError::NoSuchUser(user))?;

        let channel = Channel {
            id,
            guild: None,
            kind: ChannelType::DirectMessage,
            name: String::new(),
            topic: String::new(),
            recipients: vec![recipient],
        };
        state.channels.push(channel.clone());
        Ok(channel)
    }

    async fn change_own_nickname(&self, guild: GuildId, nickname: &str) -> BackendResult<()> {
        self.request("change_own_nickname");
        let mut state = self.state.lock();
        state.nicknames.push((guild, nickname.to_owned()));

        let me = state.me.as_ref().map(|u| u.id);
        if let Some(entry) = state
            .members
            .iter_mut()
            .find(|(s, u, _)| *s == Scope::Guild(guild) && Some(*u) == me)
        {
            entry.2 = nickname.to_owned();
        }
        Ok(())
    }

    fn can_view_channel(&self, channel: &Channel) -> BackendResult<bool> {
        Ok(!self.state.lock().hidden.contains(&channel.id))
    }

    fn subscribe_user_list(&self, scope: Scope) -> Subscription<UserListChange> {
        let (sender, subscription) = Subscription::channel(self.cancel_handle());
        let mut state = self.state.lock();

        for (_, user, name) in state.members.iter().filter(|(s, _, _)| *s == scope) {
            let _ = sender.send(UserListChange::Initial {
                user: *user,
                name: name.clone(),
            });
        }
        state.user_lists.push((scope, sender));
        subscription
    }

    fn subscribe_messages(&self, channel: ChannelId) -> Subscription<Message> {
        let (sender, subscription) = Subscription::channel(self.cancel_handle());
        self.state.lock().message_streams.push((channel, sender));
        subscription
    }
}

/// Hands out the same session for every accepted token
pub struct FakeFactory {
    session: Arc<FakeSession>,
}

impl FakeFactory {
    pub fn new(session: &Arc<FakeSession>) -> Self {
        Self {
            session: Arc::clone(session),
        }
    }
}

impl SessionFactory for FakeFactory {
    type Session = FakeSession;

    async fn connect(&self, token: &str, debug: bool) -> BackendResult<Arc<FakeSession>> {
        self.session
            .state
            .lock()
            .connections
            .push((token.to_owned(), debug));

        if token == BAD_TOKEN {
            return Err(BackendError::Unauthorised("invalid token".to_string()));
        }
        Ok(Arc::clone(&self.session))
    }
}
