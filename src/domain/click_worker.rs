//! Background worker applying click increments.
//!
//! Redirects never wait for the counter update. Instead
//! [`crate::application::services::RedirectService`] enqueues a [`ClickEvent`]
//! and this worker applies it with an atomic store-side increment.
//!
//! # Retry Policy
//!
//! Transient storage failures ([`AppError::is_retryable`]) are retried with
//! jittered exponential backoff (10ms, 100ms, 1s). Anything else, or a failure
//! after the last retry, is logged and counted in
//! `snaplink_clicks_failed_total`. The redirect has already been served.
//!
//! # Shutdown
//!
//! The worker exits once every sender is dropped and the queue is empty, after
//! waiting for increments still in flight.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

const RETRY_BASE_MILLIS: u64 = 10;
const MAX_RETRIES: usize = 3;

/// Consumes click events until the channel closes.
///
/// At most `concurrency` increments run at the same time.
pub async fn run_click_worker<R>(
    mut receiver: mpsc::Receiver<ClickEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: MappingRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = receiver.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tokio::spawn(async move {
            apply_click(repository.as_ref(), event).await;
            drop(repository);
            drop(permit);
        });
    }

    // Every permit back means every spawned increment has finished.
    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}

/// Applies a single click increment with retries.
async fn apply_click<R>(repository: &R, event: ClickEvent)
where
    R: MappingRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MILLIS)
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::start(
        strategy,
        || repository.increment_click_count(event.mapping_id),
        |e: &AppError| {
            let retry = e.is_retryable();
            if retry {
                warn!(code = %event.short_code, error = %e, "Click increment failed, retrying");
            }
            retry
        },
    )
    .await;

    match result {
        Ok(true) => {
            metrics::counter!("snaplink_clicks_recorded_total").increment(1);
            debug!(code = %event.short_code, "Click recorded");
        }
        Ok(false) => {
            metrics::counter!("snaplink_clicks_failed_total").increment(1);
            warn!(code = %event.short_code, mapping_id = %event.mapping_id, "Click for unknown mapping ignored");
        }
        Err(e) => {
            metrics::counter!("snaplink_clicks_failed_total").increment(1);
            error!(code = %event.short_code, error = %e, "Failed to record click");
        }
    }
}
