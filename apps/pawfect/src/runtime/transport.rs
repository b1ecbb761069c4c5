//! Message delivery.
//!
//! The site never talks to a server: delivery is a fixed delay followed by a
//! configured outcome. The [`Transport`] trait is the seam where a real
//! backend would plug in.

use crate::config::RuntimeConfig;
use pawfect_core::primitives::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
use pawfect_core::{ContactMessage, SubmissionOutcome};
use std::future::Future;
use std::time::Duration;

/// Delivers a contact message and reports the outcome.
///
/// Delivery never errors: anything that goes wrong is a
/// [`SubmissionOutcome::Failure`] shown to the user.
pub trait Transport: Send + Sync + 'static {
    fn deliver(&self, message: &ContactMessage) -> impl Future<Output = SubmissionOutcome> + Send;
}

/// Waits `latency`, then succeeds (or fails, when built with `failing`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedTransport {
    latency: Duration,
    fail: bool,
}

impl SimulatedTransport {
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail: false,
        }
    }

    #[must_use]
    pub fn failing(latency: Duration) -> Self {
        Self {
            latency,
            fail: true,
        }
    }

    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            latency: config.submit_latency(),
            fail: config.simulate_failure,
        }
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    #[must_use]
    pub fn fails(&self) -> bool {
        self.fail
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::from_config(&RuntimeConfig::default())
    }
}

impl Transport for SimulatedTransport {
    async fn deliver(&self, message: &ContactMessage) -> SubmissionOutcome {
        tracing::debug!(
            latency_ms = self.latency.as_millis() as u64,
            has_phone = message.phone.as_deref().is_some_and(|p| !p.is_empty()),
            "delivering contact message"
        );
        tokio::time::sleep(self.latency).await;
        if self.fail {
            SubmissionOutcome::Failure(FAILURE_MESSAGE.to_string())
        } else {
            SubmissionOutcome::Success(SUCCESS_MESSAGE.to_string())
        }
    }
}
