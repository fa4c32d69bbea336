//! Session state: who is logged in and which clinic they are working in.
//!
//! Both values survive a reload through [`SessionSnapshot`].

mod auth;
mod clinic;
mod snapshot;

pub use auth::*;
pub use clinic::*;
pub use snapshot::*;

use thiserror::Error;

use crate::db::DbError;

/// Session errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

pub type SessionResult<T> = Result<T, SessionError>;
