use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;

use super::field_errors::FieldErrors;
use crate::choice::Choice;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("email pattern is valid")
});

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 date-time.
///
/// Offset forms (`...Z`, `...+02:00`) are converted to UTC; zone-less forms,
/// as produced by a `datetime-local` input, are taken as-is.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Trimmed value, `None` when blank.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL.is_match(value)
}

/// Accumulates every violated field instead of stopping at the first.
#[derive(Debug, Default)]
pub struct Checks {
    errors: FieldErrors,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.insert(field, message);
    }

    /// Trimmed value; blank fails.
    pub fn required(&mut self, field: &str, value: &str, message: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.fail(field, message);
        }
        trimmed.to_string()
    }

    pub fn positive(&mut self, field: &str, value: i64, message: &str) -> i64 {
        if value < 1 {
            self.fail(field, message);
        }
        value
    }

    pub fn optional_positive(&mut self, field: &str, value: Option<i64>, message: &str) -> Option<i64> {
        if let Some(id) = value {
            self.positive(field, id, message);
        }
        value
    }

    pub fn all_positive(&mut self, field: &str, values: &[i64], message: &str) -> Vec<i64> {
        if values.iter().any(|id| *id < 1) {
            self.fail(field, message);
        }
        values.to_vec()
    }

    pub fn email(&mut self, field: &str, value: &str, message: &str) -> String {
        let trimmed = value.trim();
        if !is_email(trimmed) {
            self.fail(field, message);
        }
        trimmed.to_string()
    }

    /// Untrimmed: whitespace in a password is significant.
    pub fn min_chars(&mut self, field: &str, value: &str, min: usize, message: &str) -> String {
        if value.chars().count() < min {
            self.fail(field, message);
        }
        value.to_string()
    }

    pub fn choice<C: Choice>(&mut self, field: &str, value: &str) -> Option<C> {
        let parsed = C::parse(value);
        if parsed.is_none() {
            self.fail(
                field,
                format!("Invalid enum value. Expected {}, received '{value}'", C::expected()),
            );
        }
        parsed
    }

    pub fn date_time(&mut self, field: &str, value: &str, message: &str) -> Option<NaiveDateTime> {
        let parsed = parse_date_time(value);
        if parsed.is_none() {
            self.fail(field, message);
        }
        parsed
    }

    pub fn finish(self) -> FieldErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task_priority::TaskPriority;

    #[test]
    fn date_time_accepts_offset_and_local_forms() {
        let utc = parse_date_time("2024-03-01T09:30:00Z").unwrap();
        let shifted = parse_date_time("2024-03-01T11:30:00+02:00").unwrap();
        assert_eq!(utc, shifted);

        assert!(parse_date_time("2024-03-01T09:30:00.123").is_some());
        assert!(parse_date_time("2024-03-01T09:30:00").is_some());
        assert!(parse_date_time("2024-03-01T09:30").is_some());
    }

    #[test]
    fn date_time_rejects_garbage() {
        assert!(parse_date_time("").is_none());
        assert!(parse_date_time("tomorrow").is_none());
        assert!(parse_date_time("2024-13-01T09:30:00").is_none());
        assert!(parse_date_time("2024-03-01").is_none());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("ada@example.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email("ada"));
        assert!(!is_email("ada@localhost"));
        assert!(!is_email(".ada@example.com"));
        assert!(!is_email("ada..b@example.com"));
        assert!(!is_email("ada @example.com"));
    }

    #[test]
    fn every_failed_field_is_reported() {
        let mut checks = Checks::new();
        checks.required("title", "   ", "Title is required");
        checks.positive("createdById", 0, "CreatedById must be a positive integer");
        let priority: Option<TaskPriority> = checks.choice("priority", "URGENT");
        checks.required("description", "ok", "Description is required");

        assert!(priority.is_none());
        let errors = checks.finish();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("title"));
        assert!(errors.contains("createdById"));
        assert_eq!(
            errors.get("priority"),
            Some("Invalid enum value. Expected 'LOW' | 'MEDIUM' | 'HIGH', received 'URGENT'")
        );
    }
}
