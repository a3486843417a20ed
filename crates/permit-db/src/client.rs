//! Rate-limited client for the remote data service.
//!
//! Every call goes through one `send` path:
//!
//! 1. Reads (query payloads) are looked up in the cache first. A hit is
//!    returned immediately, with no pacing and no network call.
//! 2. The caller waits for a send slot from the pacing gate, so that two
//!    outbound calls from this process are never closer than
//!    `min_interval`, whoever issued them.
//! 3. A 429 answer is retried in a loop with capped exponential backoff;
//!    each retry is paced like a fresh call. Past the ceiling the
//!    throttling error is surfaced.
//! 4. Any other non-2xx answer is normalized and returned at once.
//!
//! Writes are never cached and invalidate nothing.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::{Instant, sleep, sleep_until, timeout};
use tracing::{debug, warn};

use crate::config::DataServiceConfig;
use crate::error::DataError;
use crate::payload::{Params, Payload, cache_key};
use crate::response::{decode_rows, normalize_error, parse_success};
use crate::state::{ClientState, LocalClientState};
use crate::transport::Transport;

/// Whether a query payload may be answered from, and stored in, the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    Use,
    Bypass,
}

struct Inner<T> {
    transport: T,
    state: Arc<dyn ClientState>,
    config: DataServiceConfig,
}

/// Cheap to clone; clones share transport, pacing gate and cache.
pub struct DataClient<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for DataClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> DataClient<T> {
    pub fn new(transport: T, config: DataServiceConfig) -> Self {
        Self::with_state(transport, config, Arc::new(LocalClientState::new()))
    }

    pub fn with_state(
        transport: T,
        config: DataServiceConfig,
        state: Arc<dyn ClientState>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                state,
                config,
            }),
        }
    }

    pub fn config(&self) -> &DataServiceConfig {
        &self.inner.config
    }

    /// Parameterized read, served from the cache when fresh.
    pub async fn query(&self, text: &str, parameters: Params) -> Result<Value, DataError> {
        let payload = Payload::query(&self.inner.config.database, text, parameters);
        self.send(&payload, CacheMode::Use).await
    }

    /// Query payload that must reach the data service, e.g. a statement
    /// that also writes.
    pub async fn query_uncached(&self, text: &str, parameters: Params) -> Result<Value, DataError> {
        let payload = Payload::query(&self.inner.config.database, text, parameters);
        self.send(&payload, CacheMode::Bypass).await
    }

    /// Named procedure call. Never cached.
    pub async fn invoke(&self, procedure: &str, parameters: Params) -> Result<Value, DataError> {
        let payload = Payload::procedure(&self.inner.config.database, procedure, parameters);
        self.send(&payload, CacheMode::Bypass).await
    }

    pub async fn query_rows<R: DeserializeOwned>(
        &self,
        text: &str,
        parameters: Params,
    ) -> Result<Vec<R>, DataError> {
        decode_rows(self.query(text, parameters).await?)
    }

    pub async fn query_rows_uncached<R: DeserializeOwned>(
        &self,
        text: &str,
        parameters: Params,
    ) -> Result<Vec<R>, DataError> {
        decode_rows(self.query_uncached(text, parameters).await?)
    }

    pub async fn invoke_rows<R: DeserializeOwned>(
        &self,
        procedure: &str,
        parameters: Params,
    ) -> Result<Vec<R>, DataError> {
        decode_rows(self.invoke(procedure, parameters).await?)
    }

    /// Run one logical call, bounded by `call_deadline` when configured.
    pub async fn send(&self, payload: &Payload, cache: CacheMode) -> Result<Value, DataError> {
        match self.inner.config.call_deadline {
            Some(deadline) => timeout(deadline, self.dispatch(payload, cache))
                .await
                .map_err(|_| DataError::Timeout(deadline))?,
            None => self.dispatch(payload, cache).await,
        }
    }

    async fn dispatch(&self, payload: &Payload, cache: CacheMode) -> Result<Value, DataError> {
        let Inner {
            transport,
            state,
            config,
        } = &*self.inner;

        let target = payload.target()?;
        let key = (cache == CacheMode::Use && payload.procedure.is_none())
            .then(|| cache_key(target, payload));

        if let Some(key) = &key
            && let Some(body) = state.cached(key, Instant::now(), config.cache_ttl)
        {
            debug!(operation = payload.label(), "Serving read from cache");
            return Ok(body);
        }

        let mut retries = 0;
        loop {
            self.pace().await;
            let response = transport.send(target, payload).await?;

            if response.is_success() {
                let body = parse_success(&response.body)?;
                if let Some(key) = key {
                    state.store(key, body.clone(), Instant::now(), config.cache_ttl);
                }
                return Ok(body);
            }

            let failure = normalize_error(response.status, &response.body);
            if !response.is_throttled() {
                warn!(
                    operation = payload.label(),
                    status = failure.status,
                    message = %failure.message,
                    "Data service call failed"
                );
                return Err(failure.into());
            }

            if retries >= config.retry.max_retries {
                warn!(
                    operation = payload.label(),
                    retries, "Still throttled, giving up"
                );
                return Err(DataError::Throttled {
                    retries,
                    message: failure.message,
                });
            }

            retries += 1;
            let delay = config.retry.delay_for(retries);
            warn!(
                operation = payload.label(),
                retry = retries,
                max_retries = config.retry.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Throttled by data service, backing off"
            );
            sleep(delay).await;
        }
    }

    async fn pace(&self) {
        let now = Instant::now();
        let slot = self
            .inner
            .state
            .reserve_slot(now, self.inner.config.min_interval);
        if slot > now {
            debug!(wait_ms = (slot - now).as_millis() as u64, "Pacing data service call");
            sleep_until(slot).await;
        }
    }
}
