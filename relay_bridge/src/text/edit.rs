//! `s/pattern/replacement/flags` message edits

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("invalid replacement")]
    InvalidReplacement,
    #[error("failed to compile regex: {0}")]
    BadPattern(#[from] regex::Error),
    #[error("no matches")]
    NoMatches,
}

/// Whether a message should be treated as an edit command rather than sent
pub fn is_substitution(content: &str) -> bool {
    content.starts_with("s/")
}

/// A parsed substitution command.
///
/// `/` may appear in the pattern or replacement when escaped as `\/`. The only
/// recognised flag is `g`; the trailing delimiter may be omitted entirely.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub global: bool,
    pub pattern: Regex,
    pub replacement: String,
}

impl Substitution {
    pub fn parse(content: &str) -> Result<Self, EditError> {
        let rest = content.strip_prefix("s/").ok_or(EditError::InvalidReplacement)?;

        let (pattern, rest) = split_segment(rest);
        let rest = rest.ok_or(EditError::InvalidReplacement)?;

        let (replacement, flags) = split_segment(rest);
        let global = match flags {
            None | Some("") => false,
            Some("g") => true,
            Some(_) => return Err(EditError::InvalidReplacement),
        };

        Ok(Self {
            global,
            pattern: Regex::new(&pattern)?,
            replacement,
        })
    }

    /// Apply this substitution to `content`.
    ///
    /// Without `g`, only the first match is replaced and every byte outside it is
    /// preserved. An edit that would leave the content unchanged is an error.
    pub fn apply(&self, content: &str) -> Result<String, EditError> {
        if self.global {
            let result = self.pattern.replace_all(content, self.replacement.as_str());
            if result == content {
                return Err(EditError::NoMatches);
            }
            return Ok(result.into_owned());
        }

        let caps = self.pattern.captures(content).ok_or(EditError::NoMatches)?;
        let range = caps.get(0).ok_or(EditError::NoMatches)?.range();

        let mut expanded = String::new();
        caps.expand(&self.replacement, &mut expanded);

        let mut result = String::with_capacity(content.len() - range.len() + expanded.len());
        result.push_str(&content[..range.start]);
        result.push_str(&expanded);
        result.push_str(&content[range.end..]);
        Ok(result)
    }
}

/// Read up to the next unescaped `/`, unescaping `\/` along the way. Returns the
/// segment and whatever follows the delimiter, if one was found.
fn split_segment(input: &str) -> (String, Option<&str>) {
    let mut segment = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some((_, '/'))) => {
                chars.next();
                segment.push('/');
            }
            '/' => return (segment, Some(&input[idx + 1..])),
            _ => segment.push(c),
        }
    }

    (segment, None)
}
