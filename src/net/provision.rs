use embedded_storage::Storage;
use log::warn;

use crate::{
    storage::{CredentialStore, StoreError},
    types::{ConnectionRequest, Outcome},
};

use super::sequencer::{ConnectionSequencer, WifiDriver};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProvisionResult {
    pub outcome: Outcome,
    pub saved: Result<bool, StoreError>,
}

/// Connects with `request` and remembers the credentials once the link is
/// up. Failed attempts leave the stored record untouched.
pub async fn add_network<D, S>(
    sequencer: &mut ConnectionSequencer<'_, D>,
    store: &mut CredentialStore<S>,
    request: &ConnectionRequest,
) -> ProvisionResult
where
    D: WifiDriver,
    S: Storage,
{
    let outcome = sequencer.connect(request).await;
    let saved = if outcome.success {
        store.save(request)
    } else {
        Ok(false)
    };
    if let Err(err) = saved {
        warn!(
            "net: connected but credentials not saved err={}",
            err.as_str()
        );
    }
    ProvisionResult { outcome, saved }
}
