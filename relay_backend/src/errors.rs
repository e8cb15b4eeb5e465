//! Defines errors returned by backend sessions

use crate::prelude::*;
use thiserror::Error;

/// Types of error that can occur while looking up backend objects
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("No such guild id {0}")]
    NoSuchGuild(GuildId),
    #[error("No such channel id {0}")]
    NoSuchChannel(ChannelId),
    #[error("No such user id {0}")]
    NoSuchUser(UserId),
    #[error("No such message id {0}")]
    NoSuchMessage(MessageId),
    #[error("No name known for user {0}")]
    NoNameForUser(UserId),
    #[error("No name known for channel {0}")]
    NoNameForChannel(ChannelId),
}

/// Convenience definition of a Result type used to look up backend objects.
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// An error returned by a backend round-trip
#[derive(Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Not authorised: {0}")]
    Unauthorised(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;
