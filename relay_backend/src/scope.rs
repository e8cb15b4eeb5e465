use crate::prelude::*;

/// The namespace all name resolution is relative to.
///
/// `Direct` selects the peer-to-peer namespace, where rooms are private channels
/// with individual users. `Guild` selects a server, whose channels are the rooms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    #[default]
    Direct,
    Guild(GuildId),
}

impl Scope {
    pub fn guild(&self) -> Option<GuildId> {
        match self {
            Self::Direct => None,
            Self::Guild(id) => Some(*id),
        }
    }

    pub fn is_guild(&self) -> bool {
        matches!(self, Self::Guild(_))
    }
}

impl From<Option<GuildId>> for Scope {
    fn from(guild: Option<GuildId>) -> Self {
        guild.map_or(Self::Direct, Self::Guild)
    }
}
