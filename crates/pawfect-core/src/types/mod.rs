//! # Core Type Definitions
//!
//! This module contains the shared types of the PAWfect widget engine:
//! - UI tree identifiers (`ElementId`)
//! - Form field model (`FieldId`, `FieldKind`, `Validity`, `InvalidReason`)
//! - Submission results (`SubmissionOutcome`, `ContactMessage`)
//! - Notice severity (`Severity`)
//! - Error types (`PawfectError`)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// UI TREE IDENTIFIERS
// =============================================================================

/// Handle of one element in a [`Page`](crate::Page).
///
/// Ids are allocated monotonically and never reused within a page, so a
/// stale handle can only miss, never alias another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// FIELD MODEL
// =============================================================================

/// Stable identifier of a form field (the control's `id`, or its `name`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub String);

impl FieldId {
    /// Create a new field identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic kind of a form control, tagged once when the form is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// `<input type="email">`
    Email,
    /// `<input type="text">` (or an input without a type)
    Text,
    /// `<input type="tel">`
    Tel,
    /// `<select>` without `multiple`
    SingleSelect,
    /// Textareas and other input types. No kind rule applies.
    Freeform,
}

impl FieldKind {
    /// Classify a control from its tag and `type` attribute.
    ///
    /// Returns `None` for controls that are not data fields
    /// (buttons, hidden inputs, multi-selects).
    #[must_use]
    pub fn classify(tag: &str, input_type: Option<&str>, multiple: bool) -> Option<Self> {
        match tag {
            "select" if multiple => None,
            "select" => Some(Self::SingleSelect),
            "textarea" => Some(Self::Freeform),
            "input" => match input_type.map(str::to_ascii_lowercase).as_deref() {
                None | Some("text") => Some(Self::Text),
                Some("email") => Some(Self::Email),
                Some("tel") => Some(Self::Tel),
                Some("submit" | "button" | "reset" | "hidden" | "image") => None,
                Some(_) => Some(Self::Freeform),
            },
            _ => None,
        }
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// A required text/tel field is empty.
    Required,
    /// The value is not shaped like `local@domain.tld`.
    BadEmailFormat,
    /// The `phone` field does not look like a phone number.
    BadPhoneFormat,
    /// A required single-select has no selection.
    MissingSelection,
}

impl InvalidReason {
    /// Machine-readable reason code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::BadEmailFormat => "bad-email-format",
            Self::BadPhoneFormat => "bad-phone-format",
            Self::MissingSelection => "missing-selection",
        }
    }

    /// Message shown next to the offending field.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => "This field is required",
            Self::BadEmailFormat => "Please enter a valid email address",
            Self::BadPhoneFormat => "Please enter a valid phone number",
            Self::MissingSelection => "Please select an option",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validity of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "kebab-case")]
pub enum Validity {
    /// Not evaluated since the form was attached or reset.
    #[default]
    Pending,
    Valid,
    Invalid(InvalidReason),
}

impl Validity {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Invalid(reason) => Some(*reason),
            _ => None,
        }
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "kebab-case")]
pub enum SubmissionOutcome {
    Success(String),
    Failure(String),
}

impl SubmissionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The user-facing text carried by the outcome.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Failure(m) => m,
        }
    }
}

/// The payload collected from the contact form when a submission starts.
///
/// Each entry is the raw value of the control with that id; controls
/// missing from the page read as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub pet: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

// =============================================================================
// NOTICES
// =============================================================================

/// Severity of a floating notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Class name appended to `notification`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Background colour of the notice.
    #[must_use]
    pub fn background(&self) -> &'static str {
        match self {
            Self::Info => "#17a2b8",
            Self::Success => "#28a745",
            Self::Error => "#dc3545",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = PawfectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(PawfectError::InvalidArgument(format!(
                "unknown severity '{}'",
                other
            ))),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the PAWfect widgets.
///
/// - Missing form fields are NOT errors; they read as empty values
/// - Widgets never panic; every failure is recoverable page state
#[derive(Debug, Error)]
pub enum PawfectError {
    /// The element handle does not resolve to a live element.
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    /// No form with the given DOM id exists on the page.
    #[error("Form not found: {0}")]
    FormNotFound(String),

    /// A submission is already in flight for this form.
    #[error("Submission already in progress")]
    SubmissionInProgress,

    /// A submission result arrived while no submission was in flight.
    #[error("No submission in progress")]
    NotSubmitting,

    /// A page fixture could not be turned into a page.
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    /// A caller-supplied argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A configuration file could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A background task (timer, delivery) did not run to completion.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

// =============================================================================
// TESTS
// =============================================================================
