use relay_backend::prelude::*;
use std::fmt;

/// The `nick!user@host` triple identifying a backend user to the client
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdentityPrefix {
    pub nick: String,
    pub user: String,
    pub host: String,
}

impl fmt::Display for IdentityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}@{}", self.nick, self.user, self.host)
    }
}

/// Derive the identity prefix for `user` as seen from within `scope`
pub fn user_prefix<N: NameResolver + ?Sized>(resolver: &N, scope: Scope, user: &User) -> IdentityPrefix {
    let nick = resolver
        .user_name(scope, user.id)
        .unwrap_or_else(|_| user.username.clone());

    let mut ident: String = user
        .username
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '!' && *c != '@')
        .collect();
    if ident.is_empty() {
        ident.push('*');
    }

    IdentityPrefix {
        nick,
        user: ident,
        host: format!("user/{}", user.id),
    }
}
