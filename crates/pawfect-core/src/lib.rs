//! # pawfect-core
//!
//! The synchronous widget engine for the PAWfect site.
//!
//! Every widget works against an in-memory [`Page`]: an arena of elements
//! addressed by [`ElementId`]. Widgets mutate the page and hand back the
//! handles of anything that must later be removed; they never schedule
//! timers themselves.
//!
//! ## Architectural Constraints
//!
//! - The contact form is the only stateful workflow ([`FormSession`])
//! - Validation is a pure function of field kind, flags and value ([`RuleEngine`])
//! - Has NO async, NO network dependencies, NO logging (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod form;
pub mod formats;
pub mod page;
pub mod primitives;
pub mod render;
pub mod rules;
pub mod site;
pub mod types;
pub mod utils;
pub mod widgets;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ContactMessage, ElementId, FieldId, FieldKind, InvalidReason, PawfectError, Severity,
    SubmissionOutcome, Validity,
};

// =============================================================================
// RE-EXPORTS: Page and Form
// =============================================================================

pub use form::{FieldState, FormSession, SubmitDecision, SubmitPhase};
pub use page::{Element, Event, EventKind, Page, ScrollRequest};
pub use render::AnnotationSlot;
pub use rules::RuleEngine;
pub use site::{PageKind, Site};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{NodeFixture, PageFixture, sample_contact_page};
