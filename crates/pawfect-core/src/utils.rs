//! # Utilities
//!
//! Small formatting helpers shared across pages.

pub use crate::rules::is_valid_email as validate_email;

/// Rewrite the first run of ten consecutive digits as `(ddd) ddd-dddd`.
///
/// Text before and after the run is kept as is; input without such a run
/// is returned unchanged.
#[must_use]
pub fn format_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let Some(start) = chars
        .windows(10)
        .position(|w| w.iter().all(char::is_ascii_digit))
    else {
        return phone.to_string();
    };

    let digits: String = chars[start..start + 10].iter().collect();
    let mut out: String = chars[..start].iter().collect();
    out.push_str(&format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]));
    out.extend(&chars[start + 10..]);
    out
}
