use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

// genitive month names as they appear in "1 января 2023 года"
const RU_MONTHS: [(&str, u32); 12] = [
    ("января", 1), ("февраля", 2), ("марта", 3), ("апреля", 4),
    ("мая", 5), ("июня", 6), ("июля", 7), ("августа", 8),
    ("сентября", 9), ("октября", 10), ("ноября", 11), ("декабря", 12),
];

const EN_MONTHS: [(&str, u32); 12] = [
    ("january", 1), ("february", 2), ("march", 3), ("april", 4),
    ("may", 5), ("june", 6), ("july", 7), ("august", 8),
    ("september", 9), ("october", 10), ("november", 11), ("december", 12),
];

const YEAR_WORDS: [&str; 3] = ["года", "год", "г."];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("empty date string")]
    Empty,
    #[error("date too short: {tokens} token(s), need day, month and year")]
    TooShort { tokens: usize },
    #[error("unknown month {token:?}")]
    UnknownMonth { token: String },
    #[error("not a number: {token:?}")]
    BadNumber { token: String },
    #[error("invalid calendar date {day:02}.{month:02}.{year}")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

/// Parse an archive date such as `"1 января 2023 года"`, `"15 марта 2022, 14:30"`
/// or `"April 1, 2025, 19:00"`. Time defaults to midnight.
pub fn parse_archive_date(raw: &str) -> Result<NaiveDateTime, DateError> {
    let cleaned = raw.replace(',', " ");
    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| !YEAR_WORDS.contains(&t.to_lowercase().as_str()))
        .collect();

    if tokens.is_empty() { return Err(DateError::Empty); }
    if tokens.len() < 3 { return Err(DateError::TooShort { tokens: tokens.len() }); }

    // "<Month> D YYYY" (English) or "D <month> YYYY" (Russian)
    let (day_tok, month) = match (month_number(tokens[1]), month_number(tokens[0])) {
        (Some(m), _) => (tokens[0], m),
        (None, Some(m)) => (tokens[1], m),
        (None, None) => return Err(DateError::UnknownMonth { token: tokens[1].to_string() }),
    };
    let day = parse_num::<u32>(day_tok)?;
    let year = parse_num::<i32>(strip_year_suffix(tokens[2]))?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateError::InvalidDate { day, month, year })?;

    // a malformed time falls back to the bare date
    let time = tokens.get(3).and_then(|t| parse_hm(t)).unwrap_or(NaiveTime::MIN);
    Ok(date.and_time(time))
}

pub fn month_number(token: &str) -> Option<u32> {
    let t = token.trim_end_matches('.').to_lowercase();
    RU_MONTHS.iter().chain(EN_MONTHS.iter())
        .find(|(name, _)| *name == t)
        .map(|(_, n)| *n)
}

fn strip_year_suffix(tok: &str) -> &str {
    YEAR_WORDS.iter()
        .find_map(|w| tok.strip_suffix(w))
        .unwrap_or(tok)
}

fn parse_num<T: std::str::FromStr>(tok: &str) -> Result<T, DateError> {
    tok.parse::<T>().map_err(|_| DateError::BadNumber { token: tok.to_string() })
}

fn parse_hm(tok: &str) -> Option<NaiveTime> {
    let (h, m) = tok.split_once(':')?;
    NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, 0)
}
