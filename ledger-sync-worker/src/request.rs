// Copyright (c) 2022 MASSA LABS <info@massa.net>

use ledger_sync_exports::{ConnectorError, SyncError};
use ledger_time::LedgerTime;
use std::future::Future;
use tracing::debug;

/// Awaits a peer request for at most `timeout`
pub(crate) async fn request<T, F>(timeout: LedgerTime, name: &str, future: F) -> Result<T, SyncError>
where
    F: Future<Output = Result<T, ConnectorError>>,
{
    match tokio::time::timeout(timeout.to_duration(), future).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            debug!("peer request {} timed out after {} ms", name, timeout.to_millis());
            Err(SyncError::Timeout(format!(
                "{} after {} ms",
                name,
                timeout.to_millis()
            )))
        }
    }
}
