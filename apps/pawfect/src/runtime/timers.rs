//! UI timers.
//!
//! Every delayed page change is a fire-and-forget tokio task that sleeps,
//! then takes the page lock for one short mutation. Handles are returned so
//! tests (and the CLI) can wait on them; dropping a handle does not cancel
//! the task.

use super::SharedPage;
use pawfect_core::widgets::{InteractiveMap, MapView, Notifier, PageLoader};
use pawfect_core::{ElementId, PawfectError, Severity};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Remove `element` from the page after `after`.
///
/// The task yields whether the element was still there.
pub fn schedule_removal(page: SharedPage, element: ElementId, after: Duration) -> JoinHandle<bool> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        let removed = page.lock().await.remove(element);
        tracing::debug!(%element, removed, "timed removal");
        removed
    })
}

/// Show a floating notice now and dismiss it after `display`.
pub async fn notify(
    page: &SharedPage,
    notifier: Notifier,
    message: &str,
    severity: Severity,
    display: Duration,
) -> Result<(ElementId, JoinHandle<bool>), PawfectError> {
    let notice = notifier.show(&mut *page.lock().await, message, severity)?;
    tracing::info!(%notice, severity = severity.as_str(), "notice shown");

    let page = page.clone();
    let dismissal = tokio::spawn(async move {
        tokio::time::sleep(display).await;
        notifier.dismiss(&mut *page.lock().await, notice)
    });
    Ok((notice, dismissal))
}

/// Fade the page in after `delay`.
pub fn reveal_after(
    page: SharedPage,
    loader: PageLoader,
    delay: Duration,
) -> JoinHandle<Result<(), PawfectError>> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        loader.reveal(&mut *page.lock().await)?;
        tracing::debug!("page revealed");
        Ok(())
    })
}

/// Set up the practice map after `delay`.
pub fn init_map_after(
    page: SharedPage,
    library_available: bool,
    delay: Duration,
) -> JoinHandle<Result<Option<MapView>, PawfectError>> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let view = InteractiveMap.attach(&mut *page.lock().await, library_available)?;
        match &view {
            Some(view) => tracing::info!(container = %view.container, zoom = view.zoom, "map ready"),
            None => tracing::warn!("map library unavailable, placeholder kept"),
        }
        Ok(view)
    })
}

/// Await a background task, turning a cancelled or panicked task into an error.
pub async fn join<T>(handle: JoinHandle<T>) -> Result<T, PawfectError> {
    handle
        .await
        .map_err(|e| PawfectError::RuntimeError(format!("background task failed: {}", e)))
}

// =============================================================================
// DEBOUNCER
// =============================================================================

/// Delays a call and drops the pending one whenever a new call arrives.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `work` after the delay unless another call comes first.
    pub fn call<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        }));
    }

    /// Whether a call is waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the pending call, if any, to finish.
    pub async fn flush(&mut self) -> Result<(), PawfectError> {
        match self.pending.take() {
            Some(handle) => join(handle).await,
            None => Ok(()),
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
