use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use relay_backend::prelude::*;

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new("@[^ ]*").expect("mention pattern is valid"));

/// Rewrite `@name` tokens as backend mentions of the named user.
///
/// A bare `@` is left alone, as is any token that doesn't name a user in `scope`.
pub fn replace_mentions<N: NameResolver + ?Sized>(resolver: &N, scope: Scope, text: &str) -> String {
    MENTION
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            if token == "@" {
                return token.to_string();
            }
            match resolver.user_from_name(scope, &token[1..]) {
                Some(id) => format!("<@{}>", id),
                None => token.to_string(),
            }
        })
        .into_owned()
}
