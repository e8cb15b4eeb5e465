//! Collects commonly-used names for convenient import

pub use crate::{
    errors::{
        BackendError,
        BackendResult,
        LookupError,
        LookupResult,
    },
    id::*,
    objects::*,
    scope::Scope,
    session::{
        NameResolver,
        Session,
        SessionFactory,
    },
    subscription::*,
    utils::OrLog,
};
