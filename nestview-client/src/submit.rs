use anyhow::{Context, Result, ensure};
use log::info;
use nestview::allocation::{AllocationConfirmation, AllocationSession};

use crate::api::NestingApi;

/// Persists the split of a session. The confirm gate is checked before anything is sent:
/// invalid or empty allocations never reach the backend.
pub async fn submit_allocation(
    api: &impl NestingApi,
    session: &AllocationSession,
) -> Result<AllocationConfirmation> {
    let confirmation = session.confirm()?;
    let ack = api
        .confirm_allocation(&confirmation)
        .await
        .with_context(|| format!("confirming session {} failed", session.id()))?;
    ensure!(
        ack.success,
        "backend rejected session {}: {}",
        session.id(),
        ack.message.as_deref().unwrap_or("no reason given")
    );
    info!("allocation of session {} persisted", session.id());
    Ok(confirmation)
}
