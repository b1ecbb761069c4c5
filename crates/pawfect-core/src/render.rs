//! # Render Module
//!
//! Error/success rendering protocol for the contact form.
//!
//! Errors are attached to an [`AnnotationSlot`]: the control (or the form
//! region) that owns the annotation plus the handle of the message element
//! currently shown for it. A slot holds at most one message, so marking a
//! target twice replaces the first message instead of stacking a second.

use crate::primitives::{ERROR_CLASS, ERROR_MESSAGE_CLASS, SUCCESS_MESSAGE_CLASS};
use crate::{Element, ElementId, Page, PawfectError};
use serde::{Deserialize, Serialize};

/// The error annotation owned by one target element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSlot {
    target: ElementId,
    message: Option<ElementId>,
}

impl AnnotationSlot {
    #[must_use]
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            message: None,
        }
    }

    /// The annotated element.
    #[must_use]
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// The message element currently shown, if any.
    #[must_use]
    pub fn message(&self) -> Option<ElementId> {
        self.message
    }

    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.message.is_some()
    }
}

/// Mark the slot's target as invalid and show `text` right after it.
///
/// Any previous annotation of the same slot is removed first.
pub fn mark_invalid(page: &mut Page, slot: &mut AnnotationSlot, text: &str) -> Result<(), PawfectError> {
    clear_annotation(page, slot)?;
    page.add_class(slot.target, ERROR_CLASS)?;

    let note = page.create(
        Element::new("div")
            .with_class(ERROR_MESSAGE_CLASS)
            .with_text(text)
            .with_style("color", "red")
            .with_style("font-size", "0.8em")
            .with_style("margin-top", "5px"),
    );
    if page.parent(slot.target).is_some() {
        page.insert_after(slot.target, note)?;
    } else {
        // Detached target: keep the message with it rather than losing it.
        page.append_child(slot.target, note)?;
    }
    slot.message = Some(note);
    Ok(())
}

/// Remove the error marker and message, if any.
///
/// Clearing a clean slot leaves the page untouched.
pub fn clear_annotation(page: &mut Page, slot: &mut AnnotationSlot) -> Result<(), PawfectError> {
    if page.has_class(slot.target, ERROR_CLASS) {
        page.remove_class(slot.target, ERROR_CLASS)?;
    }
    if let Some(note) = slot.message.take() {
        page.remove(note);
    }
    Ok(())
}

/// Show a success banner at the top of the form region.
///
/// Returns the banner handle; the caller schedules its removal.
pub fn show_submission_success(
    page: &mut Page,
    form: ElementId,
    message: &str,
) -> Result<ElementId, PawfectError> {
    let banner = page.create(
        Element::new("div")
            .with_class(SUCCESS_MESSAGE_CLASS)
            .with_text(message)
            .with_style("color", "green")
            .with_style("background", "#f0fff0")
            .with_style("padding", "15px")
            .with_style("border-radius", "5px")
            .with_style("margin", "15px 0")
            .with_style("border", "1px solid #00ff00"),
    );
    if let Err(e) = page.prepend_child(form, banner) {
        page.remove(banner);
        return Err(e);
    }
    Ok(banner)
}

/// Report a failed submission on the form region itself.
pub fn report_submission_failure(
    page: &mut Page,
    form_slot: &mut AnnotationSlot,
    reason: &str,
) -> Result<(), PawfectError> {
    mark_invalid(page, form_slot, reason)
}

// =============================================================================
// TESTS
// =============================================================================
