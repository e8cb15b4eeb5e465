use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static ACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\x01ACTION (.*)\x01$").expect("action pattern is valid"));

/// Rewrite a CTCP `ACTION` envelope as emphasised text. Anything else is returned
/// unchanged.
pub fn unwrap_action(content: &str) -> Cow<'_, str> {
    ACTION.replace(content, "*$1*")
}
