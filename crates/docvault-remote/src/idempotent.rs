//! Idempotency and retry wrapper over a raw remote store.
//!
//! Supplies the contract the hierarchy sagas rely on:
//!
//! - `create_object` is forwarded exactly once. An ambiguous failure is
//!   returned as-is and must be treated as fatal by the caller; retrying
//!   could create a duplicate remote object.
//! - `rename_object`, `delete_object`, and `set_public_readable` are
//!   idempotent from the caller's viewpoint and are retried on transient
//!   failures with exponential backoff.
//! - Deleting an identifier that is already gone is reported as success so
//!   cascading and repeated deletes converge instead of failing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use docvault_core::error::ErrorKind;
use docvault_core::result::AppResult;
use docvault_core::traits::remote::{RemoteObjectKind, RemoteObjectStore};

/// Retry/idempotency policy wrapper around any [`RemoteObjectStore`].
#[derive(Debug, Clone)]
pub struct IdempotentRemote {
    inner: Arc<dyn RemoteObjectStore>,
    max_retries: u32,
    base_delay: Duration,
}

impl IdempotentRemote {
    /// Wrap a raw remote store with the retry policy.
    pub fn new(inner: Arc<dyn RemoteObjectStore>, max_retries: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
        }
    }

    /// Run an idempotent operation, retrying transient failures.
    async fn with_retries<F, Fut>(&self, op_name: &str, mut op: F) -> AppResult<()>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = AppResult<()>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    let delay = self.base_delay * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        op = op_name,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Transient remote failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl RemoteObjectStore for IdempotentRemote {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn create_object(
        &self,
        name: &str,
        kind: RemoteObjectKind,
        parent_id: &str,
        content: Option<Bytes>,
    ) -> AppResult<String> {
        // Single attempt only: create is not safely retryable.
        self.inner.create_object(name, kind, parent_id, content).await
    }

    async fn rename_object(&self, remote_id: &str, new_name: &str) -> AppResult<()> {
        self.with_retries("rename_object", || {
            self.inner.rename_object(remote_id, new_name)
        })
        .await
    }

    async fn delete_object(&self, remote_id: &str) -> AppResult<()> {
        let result = self
            .with_retries("delete_object", || self.inner.delete_object(remote_id))
            .await;
        match result {
            Err(err) if err.kind == ErrorKind::NotFound => {
                debug!(remote_id, "Remote object already deleted");
                Ok(())
            }
            other => other,
        }
    }

    async fn set_public_readable(&self, remote_id: &str) -> AppResult<()> {
        self.with_retries("set_public_readable", || {
            self.inner.set_public_readable(remote_id)
        })
        .await
    }

    fn public_url(&self, remote_id: &str) -> String {
        self.inner.public_url(remote_id)
    }
}
