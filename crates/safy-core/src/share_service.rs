//! Share-link lifecycle: id generation, snapshot, and load.

use safy_domain::{SessionState, ShareId};
use uuid::Uuid;

use crate::{
    error::{CoreError, Result},
    storage::ShareStore,
};

/// Generated tokens are the first 8 hex characters of a fresh UUID.
const SHARE_ID_LEN: usize = 8;
const MAX_ID_ATTEMPTS: usize = 16;

pub struct ShareService;

impl ShareService {
    /// Produces a share id that is not already present in the store.
    ///
    /// 32 bits of token space makes collisions unlikely but not
    /// impossible, so the store is consulted before an id is handed out
    /// and generation retries on a hit.
    pub fn generate_id(store: &dyn ShareStore) -> Result<ShareId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let token = Uuid::new_v4().simple().to_string()[..SHARE_ID_LEN].to_string();
            let id = ShareId::new(token).map_err(|err| CoreError::InvalidInput(err.to_string()))?;
            if !store.exists(&id) {
                return Ok(id);
            }
            tracing::warn!(%id, "share id collision, regenerating");
        }
        Err(CoreError::Storage(
            "unable to allocate an unused share id".into(),
        ))
    }

    /// Snapshots both session tables under the session's share id,
    /// minting an id first if the session has none.
    pub fn save_session(store: &dyn ShareStore, state: &mut SessionState) -> Result<ShareId> {
        let id = match state.share_id.clone() {
            Some(id) => id,
            None => Self::generate_id(store)?,
        };
        store.save(&id, &state.ledger, &state.allocations)?;
        state.share_id = Some(id.clone());
        tracing::info!(%id, entries = state.ledger.len(), "session shared");
        Ok(id)
    }

    /// Loads the snapshot behind `id` into a fresh session. Derived entry
    /// fields are recomputed; stored values are not trusted.
    pub fn load_session(store: &dyn ShareStore, id: &ShareId) -> Result<SessionState> {
        let mut snapshot = store.load(id)?;
        snapshot.ledger.recompute_all();
        Ok(SessionState {
            ledger: snapshot.ledger,
            allocations: snapshot.allocations,
            share_id: Some(id.clone()),
        })
    }

    /// Like [`Self::load_session`], but any failure degrades to a fresh
    /// session with a warning instead of an error.
    pub fn load_session_or_default(store: &dyn ShareStore, id: &ShareId) -> SessionState {
        match Self::load_session(store, id) {
            Ok(state) => state,
            Err(CoreError::ShareNotFound(_)) => {
                tracing::warn!(%id, "share id has no snapshot, starting fresh");
                SessionState::new()
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "share load failed, starting fresh");
                SessionState::new()
            }
        }
    }
}
