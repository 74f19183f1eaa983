//! Date/time parsing for query parameters

use chrono::{DateTime, NaiveDate, Utc};

use super::errors::DomainError;

/// Parse an RFC 3339 instant or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            DomainError::Validation(format!(
                "'{}' is not a valid date (expected RFC 3339 or YYYY-MM-DD)",
                raw
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_rfc3339_with_offset() {
        let dt = parse_instant("2024-03-01T10:00:00+07:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 3, 0, 0).unwrap());
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let dt = parse_instant("2024-03-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn garbage_is_a_validation_error() {
        let err = parse_instant("next tuesday").unwrap_err();
        assert_eq!(err.name(), "ValidationError");
    }
}
