//! Object records as returned by the backend

use crate::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub id: GuildId,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    GuildText,
    DirectMessage,
    GuildVoice,
    GroupDirectMessage,
    GuildCategory,
    GuildAnnouncement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    #[serde(default)]
    pub guild: Option<GuildId>,
    pub kind: ChannelType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topic: String,
    /// The other participants, for private channels
    #[serde(default)]
    pub recipients: Vec<User>,
}

impl Channel {
    pub fn is_direct_message(&self) -> bool {
        self.kind == ChannelType::DirectMessage
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// The account name, unique across the backend
    pub username: String,
    /// Legacy four-digit tag; `"0"` or empty for accounts that no longer have one
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// The account name, with its discriminator if it still has one
    pub fn tag(&self) -> String {
        match self.discriminator.as_str() {
            "" | "0" => self.username.clone(),
            disc => format!("{}#{}", self.username, disc),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub channel: ChannelId,
    pub author: User,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}
