//! The process-wide identity collection.
//!
//! [`IdentityStore`] is a cheaply clonable handle around one
//! `RwLock<HashMap<..>>`. Every store-level operation holds the guard for its
//! whole duration and never awaits anything else while holding it, so readers
//! cannot observe a half-applied write.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use painel_shared::IdentityId;

use crate::error::{Result, StoreError};
use crate::models::Identity;
use crate::seed::Seed;

pub(crate) type Identities = HashMap<IdentityId, Identity>;

/// Owner of every known identity and its resource tree.
#[derive(Clone)]
pub struct IdentityStore {
    identities: Arc<RwLock<Identities>>,
    seed: Arc<Seed>,
}

impl IdentityStore {
    /// Create an empty store whose identities start from `seed`.
    pub fn new(seed: Seed) -> Self {
        Self {
            identities: Arc::new(RwLock::new(HashMap::new())),
            seed: Arc::new(seed),
        }
    }

    /// Issue a brand new identity with its own copy of the seed projects.
    ///
    /// Returns a snapshot; later mutations go through the store.
    pub async fn issue(&self) -> Identity {
        let projects = self.seed.instantiate();

        let mut identities = self.identities.write().await;
        let mut id = IdentityId::new();
        while identities.contains_key(&id) {
            warn!(identity = %id, "Identity collision, regenerating");
            id = IdentityId::new();
        }

        let identity = Identity {
            id,
            projects,
            created_at: Utc::now(),
        };
        identities.insert(id, identity.clone());

        info!(
            identity = %id,
            known = identities.len(),
            "Issued anonymous identity"
        );
        identity
    }

    /// Find the identity whose canonical rendering equals `token`.
    ///
    /// Malformed and unknown tokens are both [`StoreError::UnknownIdentity`].
    pub async fn lookup(&self, token: &str) -> Result<Identity> {
        let Ok(id) = IdentityId::parse(token) else {
            debug!("Identity token is not canonical");
            return Err(StoreError::UnknownIdentity);
        };

        let identities = self.identities.read().await;
        identities.get(&id).cloned().ok_or_else(|| {
            debug!(identity = %id, "Identity token not known");
            StoreError::UnknownIdentity
        })
    }

    /// Number of identities issued so far.
    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }

    pub(crate) fn identities(&self) -> &RwLock<Identities> {
        &self.identities
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new(Seed::default())
    }
}
