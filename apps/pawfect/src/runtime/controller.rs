//! Contact form controller.
//!
//! Owns the handlers of one contact form. The page and the session are
//! locked (page first) for each synchronous step and released before the
//! transport is awaited, so the rest of the page stays live while a message
//! is in flight.

use super::SharedPage;
use super::timers::{self, schedule_removal};
use super::transport::Transport;
use pawfect_core::widgets::Notifier;
use pawfect_core::{
    ContactMessage, ElementId, Event, EventKind, FieldId, FormSession, InvalidReason,
    PawfectError, Severity, SubmissionOutcome, SubmitDecision, Validity,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// What a submit action ended with.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitReport {
    /// Validation failed; nothing was sent.
    Rejected {
        failures: Vec<(FieldId, InvalidReason)>,
    },
    /// The transport answered.
    Completed {
        outcome: SubmissionOutcome,
        /// Success banner, while it is shown.
        banner: Option<ElementId>,
        #[serde(skip)]
        banner_removal: Option<JoinHandle<bool>>,
        #[serde(skip)]
        notice_dismissal: Option<JoinHandle<bool>>,
    },
}

impl SubmitReport {
    /// The outcome, when the message was sent.
    #[must_use]
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        match self {
            Self::Completed { outcome, .. } => Some(outcome),
            Self::Rejected { .. } => None,
        }
    }

    /// Wait for the banner and notice timers started by this submission.
    pub async fn settle(self) -> Result<(), PawfectError> {
        if let Self::Completed {
            banner_removal,
            notice_dismissal,
            ..
        } = self
        {
            for handle in [banner_removal, notice_dismissal].into_iter().flatten() {
                timers::join(handle).await?;
            }
        }
        Ok(())
    }
}

/// Event handlers of one contact form, bound to its session.
pub struct FormController<T: Transport> {
    page: SharedPage,
    session: Arc<Mutex<FormSession>>,
    transport: Arc<T>,
    notifier: Option<Notifier>,
    banner_display: Duration,
    notification_display: Duration,
}

impl<T: Transport> Clone for FormController<T> {
    fn clone(&self) -> Self {
        Self {
            page: self.page.clone(),
            session: self.session.clone(),
            transport: self.transport.clone(),
            notifier: self.notifier,
            banner_display: self.banner_display,
            notification_display: self.notification_display,
        }
    }
}

impl<T: Transport> FormController<T> {
    #[must_use]
    pub fn new(page: SharedPage, session: FormSession, transport: T) -> Self {
        Self {
            page,
            session: Arc::new(Mutex::new(session)),
            transport: Arc::new(transport),
            notifier: None,
            banner_display: Duration::from_millis(pawfect_core::primitives::BANNER_DISPLAY_MS),
            notification_display: Duration::from_millis(
                pawfect_core::primitives::NOTIFICATION_DISPLAY_MS,
            ),
        }
    }

    /// Also raise a floating notice for every completed submission.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier, display: Duration) -> Self {
        self.notifier = Some(notifier);
        self.notification_display = display;
        self
    }

    #[must_use]
    pub fn with_banner_display(mut self, display: Duration) -> Self {
        self.banner_display = display;
        self
    }

    #[must_use]
    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    #[must_use]
    pub fn session(&self) -> &Arc<Mutex<FormSession>> {
        &self.session
    }

    /// Submit handler.
    ///
    /// The default navigation is always prevented. Invalid forms return
    /// `Rejected` without touching the trigger; a second submit while one is
    /// in flight fails with [`PawfectError::SubmissionInProgress`].
    ///
    /// An accepted submission is not cancelled by dropping the returned
    /// future: delivery, the finalizer and the banner timer still run.
    pub async fn handle_submit(&self, event: &mut Event) -> Result<SubmitReport, PawfectError> {
        event.prevent_default();
        if event.kind != EventKind::Submit {
            return Err(PawfectError::InvalidArgument(format!(
                "submit handler got a {:?} event",
                event.kind
            )));
        }

        let message = {
            let mut page = self.page.lock().await;
            let mut session = self.session.lock().await;
            match session.begin_submit(&mut page) {
                Ok(SubmitDecision::Accepted(message)) => message,
                Ok(SubmitDecision::Rejected(failures)) => {
                    tracing::info!(failures = failures.len(), "submission rejected by validation");
                    return Ok(SubmitReport::Rejected { failures });
                }
                Err(e) => {
                    tracing::warn!("submit ignored: {}", e);
                    return Err(e);
                }
            }
        };
        tracing::info!("submission accepted, sending");

        // Delivery and finalizer run in their own task.
        let delivery = tokio::spawn(self.clone().deliver_and_finish(message));
        timers::join(delivery).await?
    }

    async fn deliver_and_finish(self, message: ContactMessage) -> Result<SubmitReport, PawfectError> {
        let outcome = self.transport.deliver(&message).await;

        let banner = {
            let mut page = self.page.lock().await;
            let mut session = self.session.lock().await;
            session.complete_submit(&mut page, &outcome)?
        };
        if outcome.is_success() {
            tracing::info!("submission delivered");
        } else {
            tracing::warn!(reason = outcome.message(), "submission failed");
        }

        let banner_removal =
            banner.map(|banner| schedule_removal(self.page.clone(), banner, self.banner_display));

        let notice_dismissal = match self.notifier {
            Some(notifier) => {
                let severity = if outcome.is_success() {
                    Severity::Success
                } else {
                    Severity::Error
                };
                let (_, dismissal) = timers::notify(
                    &self.page,
                    notifier,
                    outcome.message(),
                    severity,
                    self.notification_display,
                )
                .await?;
                Some(dismissal)
            }
            None => None,
        };

        Ok(SubmitReport::Completed {
            outcome,
            banner,
            banner_removal,
            notice_dismissal,
        })
    }

    /// Blur handler.
    pub async fn handle_blur(&self, element: ElementId) -> Result<Option<Validity>, PawfectError> {
        let mut page = self.page.lock().await;
        let mut session = self.session.lock().await;
        let validity = session.validate_field(&mut page, element)?;
        if let Some(Validity::Invalid(reason)) = validity {
            tracing::debug!(%element, reason = reason.code(), "field invalid");
        }
        Ok(validity)
    }

    /// Input handler.
    pub async fn handle_input(&self, element: ElementId) -> Result<(), PawfectError> {
        let mut page = self.page.lock().await;
        let mut session = self.session.lock().await;
        session.field_input(&mut page, element)
    }
}
