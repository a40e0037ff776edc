//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on reasonable UX limits for names, reasons,
//! and descriptions; the storage layer has no built-in length
//! enforcement.

use chrono::NaiveDate;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: employee/HR names, departments, designations, titles
pub const MAX_NAME_LEN: usize = 200;

/// Reasons, descriptions, addresses
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers etc.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal email shape check (`local@domain`); uniqueness is enforced
/// by the storage layer.
pub fn validate_email(value: &str) -> Result<(), AppError> {
    validate_required_text(value, "email", MAX_EMAIL_LEN)?;
    let Some((local, domain)) = value.split_once('@') else {
        return Err(AppError::validation("email is not a valid address"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

// ── Date validation (leave / task handlers) ─────────────────────────

/// Parse a required `YYYY-MM-DD` date, reporting format problems as
/// validation errors rather than deserialization failures.
pub fn parse_required_date(value: Option<&str>, field: &str) -> Result<NaiveDate, AppError> {
    let raw = value
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::validation(format!("{field} is required")))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD."))
}

/// Validate a leave date range: both dates present and well-formed,
/// not in the past, start <= end.
pub fn validate_leave_dates(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    if start.is_none_or(|s| s.trim().is_empty()) || end.is_none_or(|s| s.trim().is_empty()) {
        return Err(AppError::validation("start_date and end_date are required"));
    }
    let start_date = parse_required_date(start, "start_date")?;
    let end_date = parse_required_date(end, "end_date")?;
    if start_date < today || end_date < today {
        return Err(AppError::validation("Cannot request leave for past dates."));
    }
    if start_date > end_date {
        return Err(AppError::validation(
            "start_date cannot be after end_date.",
        ));
    }
    Ok((start_date, end_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn leave_dates_valid_range() {
        let (s, e) =
            validate_leave_dates(Some("2024-01-10"), Some("2024-01-12"), day("2024-01-01"))
                .unwrap();
        assert_eq!(s, day("2024-01-10"));
        assert_eq!(e, day("2024-01-12"));
    }

    #[test]
    fn leave_dates_missing_fails() {
        assert!(validate_leave_dates(None, Some("2024-01-12"), day("2024-01-01")).is_err());
        assert!(validate_leave_dates(Some(""), Some("2024-01-12"), day("2024-01-01")).is_err());
    }

    #[test]
    fn leave_dates_bad_format_fails() {
        let err =
            validate_leave_dates(Some("10/01/2024"), Some("2024-01-12"), day("2024-01-01"))
                .unwrap_err();
        assert!(err.to_string().contains("Invalid date format"));
    }

    #[test]
    fn leave_dates_past_fails() {
        assert!(
            validate_leave_dates(Some("2024-01-10"), Some("2024-01-12"), day("2024-02-01"))
                .is_err()
        );
    }

    #[test]
    fn leave_dates_inverted_always_fails() {
        let err =
            validate_leave_dates(Some("2024-01-12"), Some("2024-01-10"), day("2024-01-01"))
                .unwrap_err();
        assert!(err.to_string().contains("start_date cannot be after"));
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@nodot").is_err());
    }
}
