//! Command handlers, one module per client command.
//!
//! Each module adds `handle_*` methods to [`Client`](crate::Client).

mod identity;
mod join;
mod list;
mod message;
mod password;
mod register;
mod whois;
