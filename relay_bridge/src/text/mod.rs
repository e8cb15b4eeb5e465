//! Pure text transforms applied to client message content

mod action;
pub use action::unwrap_action;

mod edit;
pub use edit::{is_substitution, EditError, Substitution};

mod mentions;
pub use mentions::replace_mentions;
