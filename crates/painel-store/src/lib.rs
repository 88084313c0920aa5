//! # painel-store
//!
//! In-memory ownership tree for the Painel task tracker.
//!
//! Every anonymous visitor is an [`Identity`] owning a private copy of the
//! seed projects. The crate exposes a cheaply clonable [`IdentityStore`]
//! handle that guards the whole tree behind one read/write lock and provides
//! the three operations the HTTP layer needs: issuing/looking up identities,
//! resolving path segments to owned projects and tasks, and flipping a
//! task's finished flag.

pub mod models;
pub mod mutator;
pub mod resolver;
pub mod seed;
pub mod store;

mod error;

pub use error::{Result, StoreError};
pub use models::*;
pub use mutator::parse_checkbox;
pub use resolver::ResolvedTask;
pub use seed::{ProjectSeed, Seed, TaskSeed};
pub use store::IdentityStore;
