use std::fmt::{Debug, Display};

/// Log, rather than return, an error that has nobody to be returned to.
///
/// Used where there is no command in flight to report to, such as inside event
/// forwarding tasks. Yields the success value, if there was one.
pub trait OrLog<T> {
    fn or_log(self, context: impl Display) -> Option<T>;
}

impl<T, E: Debug> OrLog<T> for Result<T, E> {
    fn or_log(self, context: impl Display) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::error!(?error, "{}", context);
                None
            }
        }
    }
}
