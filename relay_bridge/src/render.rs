//! Conversion of backend markup into client-displayable text

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use relay_backend::prelude::*;

/// Converts raw backend content into text for the client
pub trait Renderer: Send + Sync + 'static {
    /// Render `raw` as seen from `scope`. `message` is the message the content
    /// came from, when there is one.
    fn render(
        &self,
        scope: Scope,
        resolver: &dyn NameResolver,
        raw: &str,
        message: Option<&Message>,
    ) -> String;
}

static USER_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"<@!?(\d+)>").expect("valid pattern"));
static CHANNEL_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"<#(\d+)>").expect("valid pattern"));
static CUSTOM_EMOJI: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a?:(\w+):\d+>").expect("valid pattern"));

/// Rewrites backend references as the names a client would recognise:
/// user mentions as `@name`, channel references as `#name`, and custom emoji as
/// `:name:`. References that can't be resolved are left as they are.
#[derive(Clone, Copy, Debug, Default)]
pub struct MentionRenderer;

impl Renderer for MentionRenderer {
    fn render(
        &self,
        scope: Scope,
        resolver: &dyn NameResolver,
        raw: &str,
        _message: Option<&Message>,
    ) -> String {
        let text = USER_MENTION.replace_all(raw, |caps: &Captures| {
            caps[1]
                .parse::<UserId>()
                .ok()
                .and_then(|id| resolver.user_name(scope, id).ok())
                .map_or_else(|| caps[0].to_string(), |name| format!("@{}", name))
        });

        let text = CHANNEL_MENTION.replace_all(&text, |caps: &Captures| {
            caps[1]
                .parse::<ChannelId>()
                .ok()
                .and_then(|id| resolver.channel_name(scope, id).ok())
                .map_or_else(|| caps[0].to_string(), |name| format!("#{}", name))
        });

        CUSTOM_EMOJI.replace_all(&text, ":$1:").into_owned()
    }
}
