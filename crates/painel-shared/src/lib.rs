//! # painel-shared
//!
//! Types shared by the store and the HTTP server: identifier newtypes with
//! their canonical textual form, protocol constants and the parse error.

pub mod constants;
pub mod error;
pub mod types;

pub use error::ParseIdError;
pub use types::{IdentityId, ProjectId, TaskId};
