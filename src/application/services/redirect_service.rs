//! Short code resolution and statistics.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, warn};
use url::Url;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Default number of clicks that may wait for room in a full click queue.
pub const DEFAULT_OVERFLOW_LIMIT: usize = 1024;

/// Service behind redirects and the stats endpoint.
///
/// Redirects do not wait for click counting: each hit becomes a
/// [`ClickEvent`] for [`crate::domain::click_worker::run_click_worker`].
pub struct RedirectService<R: MappingRepository> {
    repository: Arc<R>,
    click_sender: mpsc::Sender<ClickEvent>,
    overflow: Arc<Semaphore>,
}

impl<R: MappingRepository> RedirectService<R> {
    pub fn new(repository: Arc<R>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self::with_overflow_limit(repository, click_sender, DEFAULT_OVERFLOW_LIMIT)
    }

    /// Creates a service that parks at most `overflow_limit` clicks while the
    /// queue is full. Clicks beyond that are dropped and counted.
    pub fn with_overflow_limit(
        repository: Arc<R>,
        click_sender: mpsc::Sender<ClickEvent>,
        overflow_limit: usize,
    ) -> Self {
        Self {
            repository,
            click_sender,
            overflow: Arc::new(Semaphore::new(overflow_limit)),
        }
    }

    /// Returns the redirect target for `short_code` and schedules a click increment.
    ///
    /// The target is the stored URL in its serialized form: non-ASCII
    /// characters are percent-encoded so it is always a valid `Location`.
    /// The stored `original_url` itself is not changed.
    ///
    /// The increment is fire-and-forget; its failure never fails the lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::StoreUnavailable`] on storage failures.
    /// Returns [`AppError::Internal`] if the stored URL no longer parses; no
    /// click is counted in that case.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let mapping = self.find(short_code).await?;

        let target = Url::parse(&mapping.original_url).map_err(|e| {
            AppError::internal(format!(
                "Stored URL for '{}' is not a valid URL: {e}",
                mapping.short_code
            ))
        })?;

        self.record_click(ClickEvent::new(mapping.id, mapping.short_code));

        Ok(target.into())
    }

    /// Returns the full mapping, including the current click count, without
    /// counting a click.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn stats(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        self.find(short_code).await
    }

    /// Checks that the underlying store responds.
    pub async fn store_health(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Whether the click queue still has a live consumer.
    pub fn click_queue_open(&self) -> bool {
        !self.click_sender.is_closed()
    }

    /// Free slots in the click queue.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    async fn find(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_short_code(short_code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found"))
    }

    /// Hands the event to the click worker without blocking the caller.
    ///
    /// A full queue defers the send to a background task so short bursts are
    /// delayed rather than dropped. At most `overflow_limit` such tasks exist
    /// at once; past that the click is dropped.
    fn record_click(&self, event: ClickEvent) {
        match self.click_sender.try_send(event) {
            Ok(()) => {
                metrics::counter!("snaplink_clicks_queued_total").increment(1);
            }
            Err(TrySendError::Full(event)) => {
                metrics::counter!("snaplink_click_queue_full_total").increment(1);

                let Ok(permit) = self.overflow.clone().try_acquire_owned() else {
                    metrics::counter!("snaplink_clicks_dropped_total").increment(1);
                    warn!(code = %event.short_code, "Click queue and overflow full, click dropped");
                    return;
                };

                warn!(code = %event.short_code, "Click queue full, deferring click");
                let sender = self.click_sender.clone();
                tokio::spawn(async move {
                    if let Err(e) = sender.send(event).await {
                        metrics::counter!("snaplink_clicks_dropped_total").increment(1);
                        error!(code = %e.0.short_code, "Click queue closed, click dropped");
                    }
                    drop(permit);
                });
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("snaplink_clicks_dropped_total").increment(1);
                error!(code = %event.short_code, "Click queue closed, click dropped");
            }
        }
    }
}
