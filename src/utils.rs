// src/utils.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a backend timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (treated as UTC),
/// the same with a space separator, and bare dates.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Normalize free-text search input; `None` means the facet is disabled
pub fn normalize_search(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Truncate text for table output, counting chars rather than bytes
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_millis() {
        assert_eq!(
            parse_timestamp_millis("1970-01-01T00:00:01Z"),
            Some(1_000)
        );
        assert_eq!(
            parse_timestamp_millis("1970-01-01T01:00:00+01:00"),
            Some(0)
        );
        assert_eq!(
            parse_timestamp_millis("1970-01-01T00:00:02.500"),
            Some(2_500)
        );
        assert_eq!(parse_timestamp_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp_millis("yesterday"), None);
        assert_eq!(parse_timestamp_millis(""), None);
    }

    #[test]
    fn test_timestamps_compare_numerically_not_lexically() {
        // Lexically "2024-05-01T09:00:00+02:00" > "2024-05-01T08:30:00Z",
        // but it is the earlier instant.
        let a = parse_timestamp_millis("2024-05-01T09:00:00+02:00").unwrap();
        let b = parse_timestamp_millis("2024-05-01T08:30:00Z").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search("  REACT "), Some("react".to_string()));
        assert_eq!(normalize_search("   "), None);
        assert_eq!(normalize_search(""), None);
    }

    #[test]
    fn test_truncate_for_display() {
        assert_eq!(truncate_for_display("short", 10), "short");
        assert_eq!(truncate_for_display("Senior React Developer", 10), "Senior Re…");
        assert_eq!(truncate_for_display("Développeur", 5), "Déve…");
    }
}
