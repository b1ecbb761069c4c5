//! # Rules Module
//!
//! Field rule engine for the contact form.
//!
//! - Pure: no page access, no side effects
//! - Kind rules are exclusive (one per kind)
//! - The phone format rule is cross-cutting: it is keyed by identifier and
//!   overrides the kind result

use crate::form::FieldState;
use crate::primitives::{MIN_PHONE_CHARS, PHONE_FIELD_ID};
use crate::{FieldKind, InvalidReason, Validity};
use regex::Regex;
use std::sync::LazyLock;

/// The RuleEngine decides whether a field value is acceptable.
pub struct RuleEngine;

impl RuleEngine {
    /// Validate a field from its current snapshot.
    #[must_use]
    pub fn validate(field: &FieldState) -> Validity {
        Self::evaluate(field.kind, field.required, field.id.as_str(), &field.value)
    }

    /// Validate a raw (kind, required, identifier, value) tuple.
    ///
    /// `value` is trimmed before any rule sees it.
    #[must_use]
    pub fn evaluate(kind: FieldKind, required: bool, id: &str, value: &str) -> Validity {
        let value = value.trim();

        let kind_result = match kind {
            // Requiredness is not checked separately: an empty email fails the shape.
            FieldKind::Email if !is_valid_email(value) => Some(InvalidReason::BadEmailFormat),
            FieldKind::Text | FieldKind::Tel if required && value.is_empty() => {
                Some(InvalidReason::Required)
            }
            FieldKind::SingleSelect if required && value.is_empty() => {
                Some(InvalidReason::MissingSelection)
            }
            _ => None,
        };

        let phone_override = (id == PHONE_FIELD_ID && !value.is_empty() && !is_valid_phone(value))
            .then_some(InvalidReason::BadPhoneFormat);

        match phone_override.or(kind_result) {
            Some(reason) => Validity::Invalid(reason),
            None => Validity::Valid,
        }
    }
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_PATTERN failed")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\+?[0-9\s\-()]{{{},}}$", MIN_PHONE_CHARS))
        .expect("PHONE_PATTERN failed")
});

/// Whether `email` has the shape `local@domain.tld`.
///
/// No whitespace or extra `@` anywhere, and a `.` in the domain with at
/// least one character on each side of it.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Whether `phone` looks like a phone number.
///
/// An optional leading `+`, then at least [`MIN_PHONE_CHARS`] characters drawn
/// from digits, whitespace, `-`, `(` and `)`.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(reason: InvalidReason) -> Validity {
        Validity::Invalid(reason)
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@clinic.co.za"));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("(011) 123-4567"));
        assert!(is_valid_phone("+27 11 123 4567"));
        assert!(is_valid_phone("0111234567"));
        assert!(!is_valid_phone("123"));
        assert!(!is_valid_phone("+123456789"));
        assert!(!is_valid_phone("011-123-4567 ext"));
        assert!(!is_valid_phone("++0111234567"));
        assert!(!is_valid_phone("011123456+7"));
        // Only ASCII digits count.
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn empty_email_is_bad_format_even_when_optional() {
        assert_eq!(
            RuleEngine::evaluate(FieldKind::Email, false, "email", ""),
            invalid(InvalidReason::BadEmailFormat)
        );
    }

    #[test]
    fn required_text_and_tel() {
        for kind in [FieldKind::Text, FieldKind::Tel] {
            assert_eq!(
                RuleEngine::evaluate(kind, true, "name", "   "),
                invalid(InvalidReason::Required)
            );
            assert_eq!(RuleEngine::evaluate(kind, true, "name", "Thandi"), Validity::Valid);
            assert_eq!(RuleEngine::evaluate(kind, false, "name", ""), Validity::Valid);
        }
    }

    #[test]
    fn required_select() {
        assert_eq!(
            RuleEngine::evaluate(FieldKind::SingleSelect, true, "pet", ""),
            invalid(InvalidReason::MissingSelection)
        );
        assert_eq!(
            RuleEngine::evaluate(FieldKind::SingleSelect, true, "pet", "dog"),
            Validity::Valid
        );
    }

    #[test]
    fn phone_rule_overrides_kind_result() {
        assert_eq!(
            RuleEngine::evaluate(FieldKind::Tel, true, "phone", "123"),
            invalid(InvalidReason::BadPhoneFormat)
        );
        assert_eq!(
            RuleEngine::evaluate(FieldKind::Tel, true, "phone", "(011) 123-4567"),
            Validity::Valid
        );
        // An empty phone falls back to the kind rule.
        assert_eq!(
            RuleEngine::evaluate(FieldKind::Tel, true, "phone", ""),
            invalid(InvalidReason::Required)
        );
        assert_eq!(RuleEngine::evaluate(FieldKind::Tel, false, "phone", ""), Validity::Valid);
    }

    #[test]
    fn phone_rule_is_keyed_by_identifier_not_kind() {
        assert_eq!(
            RuleEngine::evaluate(FieldKind::Text, false, "phone", "call me"),
            invalid(InvalidReason::BadPhoneFormat)
        );
        assert_eq!(RuleEngine::evaluate(FieldKind::Tel, false, "mobile", "123"), Validity::Valid);
    }

    #[test]
    fn freeform_is_always_valid() {
        assert_eq!(RuleEngine::evaluate(FieldKind::Freeform, true, "message", ""), Validity::Valid);
    }

    #[test]
    fn values_are_trimmed() {
        assert_eq!(
            RuleEngine::evaluate(FieldKind::Email, true, "email", "  a@b.com \n"),
            Validity::Valid
        );
    }
}
