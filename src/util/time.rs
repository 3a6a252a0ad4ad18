use anyhow::{bail, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

// Parse a window string like "2d", "YYYY-MM-DD", or RFC3339 into a UTC timestamp.
// Returns Some(ts) on success; None if unparseable.
pub fn parse_window_str(s: &str) -> Option<DateTime<Utc>> {
    // "2d" -> now - 2 days
    if let Some(stripped) = s.strip_suffix('d') {
        if let Ok(days) = stripped.parse::<i64>() {
            if days > 0 {
                return Some(Utc::now() - Duration::days(days));
            }
        }
    }
    // "YYYY-MM-DD"
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = nd.and_hms_opt(0, 0, 0) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
        }
    }
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

// --since cutoff, compared against archive-local naive timestamps
pub fn parse_since_opt(since: Option<&str>) -> Result<Option<NaiveDateTime>> {
    let Some(s) = since else { return Ok(None) };
    match parse_window_str(s.trim()) {
        Some(ts) => Ok(Some(ts.naive_utc())),
        None => bail!("Invalid --since value: {} (expected Nd, YYYY-MM-DD or RFC3339)", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_date() {
        let got = parse_since_opt(Some("2024-12-01")).unwrap().unwrap();
        assert_eq!(got.to_string(), "2024-12-01 00:00:00");
    }

    #[test]
    fn since_days_is_in_the_past() {
        let got = parse_since_opt(Some("3d")).unwrap().unwrap();
        assert!(got < Utc::now().naive_utc());
    }

    #[test]
    fn since_rejects_garbage() {
        assert!(parse_since_opt(Some("yesterday")).is_err());
        assert!(parse_since_opt(None).unwrap().is_none());
    }
}
