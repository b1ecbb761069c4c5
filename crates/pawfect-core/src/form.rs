//! # Form Module
//!
//! Contact form session and submission state machine.
//!
//! ```text
//! Idle ──submit──▶ Validating ──any invalid──▶ Idle
//!                       │
//!                   all valid
//!                       ▼
//!                  Submitting ──outcome──▶ (finalize) ──▶ Idle
//! ```
//!
//! The session never waits. [`FormSession::begin_submit`] runs the
//! validation pass and, when every field passes, moves to `Submitting` and
//! hands back the [`ContactMessage`] to deliver. The runtime performs the
//! delivery and reports its result through [`FormSession::complete_submit`],
//! which always runs the finalizer before returning.

use crate::primitives::{LOADING_CLASS, SENDING_LABEL};
use crate::render::{self, AnnotationSlot};
use crate::rules::RuleEngine;
use crate::{
    ContactMessage, ElementId, FieldId, FieldKind, InvalidReason, Page, PawfectError,
    SubmissionOutcome, Validity,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// FIELD STATE
// =============================================================================

/// Validity and value tracking for one form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub id: FieldId,
    pub kind: FieldKind,
    pub required: bool,
    /// Trimmed value as of the last refresh.
    pub value: String,
    pub validity: Validity,
    annotation: AnnotationSlot,
}

impl FieldState {
    /// Build the state of a control, or `None` if it is not a data field.
    fn from_element(page: &Page, element: ElementId) -> Option<Self> {
        let e = page.get(element)?;
        let kind = FieldKind::classify(&e.tag, e.attr("type"), e.has_attr("multiple"))?;
        let id = e
            .dom_id
            .clone()
            .or_else(|| e.attr("name").map(str::to_string))
            .unwrap_or_default();
        Some(Self {
            id: FieldId(id),
            kind,
            required: e.has_attr("required"),
            value: e.value.trim().to_string(),
            validity: Validity::Pending,
            annotation: AnnotationSlot::new(element),
        })
    }

    /// The control this state tracks.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.annotation.target()
    }

    /// The inline error message element, while one is shown.
    #[must_use]
    pub fn annotation(&self) -> Option<ElementId> {
        self.annotation.message()
    }

    /// Re-read the value from the page. A control that has gone missing
    /// reads as empty.
    fn refresh(&mut self, page: &Page) {
        self.value = page
            .value(self.element())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
    }

    fn show_validity(&mut self, page: &mut Page) -> Result<(), PawfectError> {
        if !page.contains(self.element()) {
            return Ok(());
        }
        match self.validity {
            Validity::Invalid(reason) => {
                render::mark_invalid(page, &mut self.annotation, reason.message())
            }
            _ => render::clear_annotation(page, &mut self.annotation),
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Lifecycle phase of a form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Result of the validation pass started by a submit action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Every field passed; the session is now `Submitting`.
    Accepted(ContactMessage),
    /// At least one field failed; the session is back to `Idle`.
    Rejected(Vec<(FieldId, InvalidReason)>),
}

/// Runtime state of one contact form.
#[derive(Debug, Clone)]
pub struct FormSession {
    form: ElementId,
    fields: Vec<FieldState>,
    trigger: Option<ElementId>,
    form_annotation: AnnotationSlot,
    original_label: Option<String>,
    phase: SubmitPhase,
    in_progress: bool,
}

impl FormSession {
    /// Attach to the form with DOM id `form_id`.
    ///
    /// Fields (`input`, `textarea`, `select` that carry data) are enumerated
    /// once, in document order. The trigger is the first `button` whose type
    /// is `submit` (or unset).
    pub fn attach(page: &Page, form_id: &str) -> Result<Self, PawfectError> {
        let form = page
            .by_dom_id(form_id)
            .ok_or_else(|| PawfectError::FormNotFound(form_id.to_string()))?;
        Ok(Self::attach_element(page, form))
    }

    /// Attach to a known form element.
    #[must_use]
    pub fn attach_element(page: &Page, form: ElementId) -> Self {
        let fields = page
            .find_all(form, |e| matches!(e.tag.as_str(), "input" | "textarea" | "select"))
            .into_iter()
            .filter_map(|id| FieldState::from_element(page, id))
            .collect();
        let trigger = page.find_first(form, |e| {
            e.tag == "button" && e.attr("type").is_none_or(|t| t.eq_ignore_ascii_case("submit"))
        });

        Self {
            form,
            fields,
            trigger,
            form_annotation: AnnotationSlot::new(form),
            original_label: None,
            phase: SubmitPhase::Idle,
            in_progress: false,
        }
    }

    #[must_use]
    pub fn form(&self) -> ElementId {
        self.form
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.id.as_str() == id)
    }

    /// The field tracking a given control element.
    #[must_use]
    pub fn field_for_element(&self, element: ElementId) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.element() == element)
    }

    #[must_use]
    pub fn trigger(&self) -> Option<ElementId> {
        self.trigger
    }

    #[must_use]
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_progress
    }

    /// The form-level failure message element, while one is shown.
    #[must_use]
    pub fn form_annotation(&self) -> Option<ElementId> {
        self.form_annotation.message()
    }

    // =========================================================================
    // FIELD HANDLERS
    // =========================================================================

    /// Blur handler: validate and annotate a single field.
    ///
    /// Returns `None` if no field tracks `element`.
    pub fn validate_field(
        &mut self,
        page: &mut Page,
        element: ElementId,
    ) -> Result<Option<Validity>, PawfectError> {
        let Some(field) = self.fields.iter_mut().find(|f| f.element() == element) else {
            return Ok(None);
        };
        field.refresh(page);
        field.validity = RuleEngine::validate(field);
        field.show_validity(page)?;
        Ok(Some(field.validity))
    }

    /// Input handler: pick up the new value and hide the error while the
    /// user types.
    ///
    /// Validity is left as last computed; only a later validation can turn
    /// an invalid field valid.
    pub fn field_input(&mut self, page: &mut Page, element: ElementId) -> Result<(), PawfectError> {
        if let Some(field) = self.fields.iter_mut().find(|f| f.element() == element) {
            field.refresh(page);
            if page.contains(element) {
                render::clear_annotation(page, &mut field.annotation)?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    /// Run the validation pass for a submit action.
    ///
    /// Every field is refreshed, validated and annotated; there is no early
    /// exit. If all pass, the trigger is disabled and relabelled, the form is
    /// marked `loading`, and the session enters `Submitting`.
    ///
    /// Rejected with [`PawfectError::SubmissionInProgress`] (and no page
    /// change) while a previous submission is still in flight.
    pub fn begin_submit(&mut self, page: &mut Page) -> Result<SubmitDecision, PawfectError> {
        if self.in_progress {
            return Err(PawfectError::SubmissionInProgress);
        }
        self.phase = SubmitPhase::Validating;

        let mut failures = Vec::new();
        let mut pass: Result<(), PawfectError> = Ok(());
        for field in &mut self.fields {
            field.refresh(page);
            field.validity = RuleEngine::validate(field);
            if let Validity::Invalid(reason) = field.validity {
                failures.push((field.id.clone(), reason));
            }
            if pass.is_ok() {
                pass = field.show_validity(page);
            }
        }
        if let Err(e) = pass {
            self.phase = SubmitPhase::Idle;
            return Err(e);
        }

        if !failures.is_empty() {
            self.phase = SubmitPhase::Idle;
            return Ok(SubmitDecision::Rejected(failures));
        }

        let message = self.collect_message(page);
        self.enter_submitting(page)?;
        Ok(SubmitDecision::Accepted(message))
    }

    /// Enter `Submitting`. If the busy state cannot be shown, whatever was
    /// applied is rolled back and the session stays `Idle`.
    fn enter_submitting(&mut self, page: &mut Page) -> Result<(), PawfectError> {
        if let Err(e) = self.show_busy(page) {
            // The original error is the one worth reporting.
            let _ = self.finalize(page);
            return Err(e);
        }
        self.in_progress = true;
        self.phase = SubmitPhase::Submitting;
        Ok(())
    }

    fn show_busy(&mut self, page: &mut Page) -> Result<(), PawfectError> {
        render::clear_annotation(page, &mut self.form_annotation)?;
        page.add_class(self.form, LOADING_CLASS)?;
        if let Some(trigger) = self.trigger.filter(|t| page.contains(*t)) {
            self.original_label = Some(page.text_content(trigger));
            page.set_text(trigger, SENDING_LABEL)?;
            page.set_disabled(trigger, true)?;
        }
        Ok(())
    }

    /// Report the result of the delivery started by `begin_submit`.
    ///
    /// Success shows the banner (its handle is returned so the caller can
    /// schedule removal) and resets every field. Failure annotates the form.
    /// In both cases the finalizer then restores the trigger and returns the
    /// session to `Idle`, even if rendering the outcome failed.
    pub fn complete_submit(
        &mut self,
        page: &mut Page,
        outcome: &SubmissionOutcome,
    ) -> Result<Option<ElementId>, PawfectError> {
        if !self.in_progress {
            return Err(PawfectError::NotSubmitting);
        }

        let rendered = match outcome {
            SubmissionOutcome::Success(message) => self.render_success(page, message).map(Some),
            SubmissionOutcome::Failure(reason) => {
                render::report_submission_failure(page, &mut self.form_annotation, reason)
                    .map(|()| None)
            }
        };
        let finalized = self.finalize(page);

        let banner = rendered?;
        finalized?;
        Ok(banner)
    }

    /// Reset first: once the banner is on the page its handle must reach the
    /// caller, which owns the removal timer.
    fn render_success(&mut self, page: &mut Page, message: &str) -> Result<ElementId, PawfectError> {
        self.reset(page)?;
        render::show_submission_success(page, self.form, message)
    }

    /// Empty every field and clear every annotation (`form.reset()`).
    fn reset(&mut self, page: &mut Page) -> Result<(), PawfectError> {
        for field in &mut self.fields {
            field.value.clear();
            field.validity = Validity::Pending;
            if page.contains(field.element()) {
                page.set_value(field.element(), "")?;
                render::clear_annotation(page, &mut field.annotation)?;
            }
        }
        Ok(())
    }

    fn finalize(&mut self, page: &mut Page) -> Result<(), PawfectError> {
        self.in_progress = false;
        self.phase = SubmitPhase::Idle;
        let label = self.original_label.take();

        if page.contains(self.form) {
            page.remove_class(self.form, LOADING_CLASS)?;
        }
        if let Some(trigger) = self.trigger.filter(|t| page.contains(*t)) {
            if let Some(label) = label {
                page.set_text(trigger, &label)?;
            }
            page.set_disabled(trigger, false)?;
        }
        Ok(())
    }

    /// Collect the payload by well-known control ids.
    fn collect_message(&self, page: &Page) -> ContactMessage {
        let read = |id: &str| {
            page.by_dom_id(id)
                .and_then(|e| page.value(e))
                .map(str::to_string)
        };
        ContactMessage {
            name: read("name"),
            email: read("email"),
            phone: read("phone"),
            pet: read("pet"),
            subject: read("subject"),
            message: read("message"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
