//! Input validation helpers shared by request DTOs.

use std::sync::LazyLock;

use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Ten-digit Indian mobile number (leading 6-9).
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile regex is valid"));

/// Six-digit numeric one-time password.
static OTP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("otp regex is valid"));

/// Whether `phone` is a valid ten-digit mobile number.
pub fn is_valid_mobile(phone: &str) -> bool {
    MOBILE_RE.is_match(phone)
}

/// Whether `code` has the shape of an OTP (exactly six digits).
pub fn is_otp_shaped(code: &str) -> bool {
    OTP_RE.is_match(code)
}

/// `validator` custom rule for mobile numbers.
pub fn validate_mobile(phone: &str) -> Result<(), ValidationError> {
    if is_valid_mobile(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("mobile");
        err.message = Some("Phone must be a valid 10-digit mobile number".into());
        Err(err)
    }
}

/// `validator` custom rule for OTP codes.
pub fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    if is_otp_shaped(code) {
        Ok(())
    } else {
        let mut err = ValidationError::new("otp");
        err.message = Some("OTP must be a 6-digit code".into());
        Err(err)
    }
}

/// Return the first violation message in a [`ValidationErrors`] set.
///
/// Fields are visited in name order so the reported message is stable.
/// Nested structs are searched depth-first.
pub fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let found = match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|e| describe(field, e)),
            ValidationErrorsKind::Struct(nested) => Some(first_message(nested)),
            ValidationErrorsKind::List(items) => items.values().next().map(|n| first_message(n)),
        };
        if let Some(message) = found {
            return message;
        }
    }

    "Invalid request".to_string()
}

fn describe(field: &str, err: &ValidationError) -> String {
    match &err.message {
        Some(msg) => msg.to_string(),
        None => format!("Invalid value for '{field}' ({})", err.code),
    }
}
