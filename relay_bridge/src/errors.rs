use relay_backend::prelude::*;
use relay_backend::id::ParseSnowflakeError;
use thiserror::Error;

use crate::text::EditError;

/// An error that may occur while handling a client command.
///
/// None of these end the connection; they are reported back for the single
/// command that produced them.
#[derive(Debug, Error)]
pub enum BridgeError
{
    #[error("no session provided")]
    NoSession,
    #[error("already in channel")]
    AlreadyInChannel,
    #[error("cannot change nickname outside of server")]
    NotInServer,
    #[error("no user named {0} found")]
    NoSuchUser(String),
    #[error("no channel named {0} found")]
    NoSuchChannel(String),
    #[error("invalid guild id: {0}")]
    InvalidGuildId(#[from] ParseSnowflakeError),
    #[error("failed to find your message")]
    OwnMessageNotFound,
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("client layer error: {0}")]
    Layer(#[from] anyhow::Error),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
