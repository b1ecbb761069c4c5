//! # Widget Primitives
//!
//! Fixed constants shared by the widgets and the runtime.
//!
//! Timings are defaults only: the runtime reads its delays from
//! configuration and falls back to these values.

// =============================================================================
// TIMINGS (milliseconds)
// =============================================================================

/// Simulated network round trip of a contact form submission.
pub const SUBMIT_LATENCY_MS: u64 = 2000;

/// How long the submission success banner stays on the form.
pub const BANNER_DISPLAY_MS: u64 = 5000;

/// How long a floating notification stays on the page.
pub const NOTIFICATION_DISPLAY_MS: u64 = 5000;

/// Delay before the page body fades in.
pub const PAGE_FADE_DELAY_MS: u64 = 100;

/// Delay before the map replaces its placeholder.
pub const MAP_INIT_DELAY_MS: u64 = 100;

// =============================================================================
// FORM
// =============================================================================

/// DOM id the contact form is attached under.
pub const CONTACT_FORM_ID: &str = "contact-form";

/// Field identifier that receives the extra phone format check.
pub const PHONE_FIELD_ID: &str = "phone";

/// Minimum number of characters after an optional leading `+`
/// for a value to pass the phone format check.
pub const MIN_PHONE_CHARS: usize = 10;

/// Trigger label while a submission is in flight.
pub const SENDING_LABEL: &str = "Sending...";

/// Success banner text.
pub const SUCCESS_MESSAGE: &str =
    "Message sent successfully! We will get back to you within 24 hours.";

/// Form-level error text when a submission fails.
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again or call us directly.";

// =============================================================================
// CLASS NAMES
// =============================================================================

/// Marker class on an invalid control.
pub const ERROR_CLASS: &str = "error";

/// Class of the inline error message element.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

/// Class of the success banner element.
pub const SUCCESS_MESSAGE_CLASS: &str = "success-message";

/// Class on the form while a submission is in flight.
pub const LOADING_CLASS: &str = "loading";

/// Class toggled by the mobile menu.
pub const ACTIVE_CLASS: &str = "active";

// =============================================================================
// SEARCH
// =============================================================================

/// Queries shorter than this (in characters) clear the results.
pub const SEARCH_MIN_QUERY_CHARS: usize = 2;

/// Maximum number of search results shown.
pub const SEARCH_MAX_RESULTS: usize = 5;

/// Number of characters of element text shown per result.
pub const SEARCH_SNIPPET_CHARS: usize = 100;

/// Tags whose text is searched.
pub const SEARCHABLE_TAGS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "li"];
