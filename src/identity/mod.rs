//! Chilean RUN (national identity number) normalization and validation.
//!
//! Validation runs three stages in order and stops at the first failure:
//! [`normalize_identity`], the structural checks, then the modulo-11 check
//! digit. Every stage is pure.

mod result;
mod run;

pub use crate::identity::result::{ValidationResult, ValidationStatus};
pub use crate::identity::run::{IdentityError, Run};

use crate::check_digit::{ChileanRunChecksum, Validator};
use crate::str_utils::group_thousands;

/// Characters removed from raw input before validation.
const FORMATTING_CHARS: &[char] = &['.', '-'];

pub const MIN_BODY_LENGTH: usize = 7;
pub const MAX_BODY_LENGTH: usize = 8;
pub const MIN_NORMALIZED_LENGTH: usize = MIN_BODY_LENGTH + 1;
pub const MAX_NORMALIZED_LENGTH: usize = MAX_BODY_LENGTH + 1;

/// Strips dots and hyphens, upper-cases letters and trims surrounding whitespace.
pub fn normalize_identity(raw: &str) -> String {
    raw.chars()
        .filter(|c| !FORMATTING_CHARS.contains(c))
        .collect::<String>()
        .to_uppercase()
        .trim()
        .to_string()
}

/// Validates a raw RUN such as `12.345.678-5`, `12345678-5` or `12345678k`.
pub fn validate_identity(raw: &str) -> ValidationResult {
    if raw.trim().is_empty() {
        return ValidationResult::empty();
    }

    let normalized = normalize_identity(raw);
    if normalized.is_empty() {
        return ValidationResult::empty();
    }

    // `12345678-` normalizes to a well-shaped 8 characters but has no check
    // character. A hyphen after a full 9 characters is only punctuation.
    if raw.trim_end().ends_with('-') && normalized.chars().count() == MIN_NORMALIZED_LENGTH {
        return ValidationResult::invalid_format("the check digit is missing");
    }

    if let Err(reason) = check_format(&normalized) {
        return ValidationResult::invalid_format(reason);
    }

    if ChileanRunChecksum.is_valid_match(&normalized) {
        ValidationResult::valid(normalized)
    } else {
        ValidationResult::invalid_checksum()
    }
}

/// Structural checks on a normalized, non-empty identity. Returns the reason
/// of the first failing rule.
fn check_format(normalized: &str) -> Result<(), &'static str> {
    let length = normalized.chars().count();
    if !(MIN_NORMALIZED_LENGTH..=MAX_NORMALIZED_LENGTH).contains(&length) {
        return Err("must total 8-9 characters");
    }

    let mut chars = normalized.chars();
    match chars.next_back() {
        Some(c) if c.is_ascii_digit() || c == 'K' => {}
        _ => return Err("the check digit must be a number or K"),
    }

    let body = chars.as_str();
    if !body.chars().all(|c| c.is_ascii_digit()) {
        return Err("the body must only contain digits");
    }

    // ASCII digits only from here on, so bytes and chars agree
    if !(MIN_BODY_LENGTH..=MAX_BODY_LENGTH).contains(&body.len()) {
        return Err("the body must have 7 or 8 digits");
    }

    Ok(())
}

/// Formats a valid RUN for display as `12.345.678-5`.
pub fn format_identity(raw: &str) -> Option<String> {
    let normalized = validate_identity(raw).normalized?;
    let (body, check_digit) = normalized.split_at(normalized.len() - 1);
    Some(format!("{}-{}", group_thousands(body), check_digit))
}
