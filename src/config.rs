use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use url::Url;

use crate::util::time::parse_since_opt;

pub const DEFAULT_BASE_URL: &str = "http://kremlin.ru";
pub const DEFAULT_LISTING_PATH: &str = "/events/president/news";
pub const DEFAULT_DELAY_MS: u64 = 2000;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

/// Case-insensitive title keyword filter.
#[derive(Clone, Debug, Default)]
pub struct TitleFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TitleVerdict {
    Keep,
    Excluded(String),
    NotIncluded,
}

impl TitleFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        let norm = |v: &[String]| -> Vec<String> { v.iter().map(|k| k.trim().to_lowercase()).filter(|k| !k.is_empty()).collect() };
        TitleFilter { include: norm(include), exclude: norm(exclude) }
    }

    pub fn check(&self, title: &str) -> TitleVerdict {
        let t = title.to_lowercase();
        if let Some(k) = self.exclude.iter().find(|k| t.contains(k.as_str())) {
            return TitleVerdict::Excluded(k.clone());
        }
        if !self.include.is_empty() && !self.include.iter().any(|k| t.contains(k.as_str())) {
            return TitleVerdict::NotIncluded;
        }
        TitleVerdict::Keep
    }
}

/// Resolved settings for one scrape run: CLI value, then env, then default.
#[derive(Clone, Debug)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub listing_path: String,
    pub start_page: u32,
    pub end_page: u32,
    pub delay: Duration,
    pub user_agent: String,
    pub accept_language: String,
    pub filter: TitleFilter,
    pub since: Option<NaiveDateTime>,
}

/// Raw option values as they arrive from the command line.
#[derive(Clone, Debug, Default)]
pub struct ConfigInput<'a> {
    pub base_url: Option<&'a str>,
    pub listing_path: Option<&'a str>,
    pub start_page: u32,
    pub end_page: u32,
    pub delay_ms: Option<u64>,
    pub user_agent: Option<&'a str>,
    pub accept_language: Option<&'a str>,
    pub include: &'a [String],
    pub exclude: &'a [String],
    pub since: Option<&'a str>,
}

impl ScrapeConfig {
    pub fn resolve(input: ConfigInput<'_>) -> Result<Self> {
        let base = pick(input.base_url, "ARCHIVE_BASE_URL", DEFAULT_BASE_URL);
        let base_url = Url::parse(&base).with_context(|| format!("Invalid base URL: {}", base))?;

        let listing_path = pick(input.listing_path, "ARCHIVE_LISTING_PATH", DEFAULT_LISTING_PATH);
        let listing_path = format!("/{}", listing_path.trim_matches('/'));

        let delay_ms = match input.delay_ms {
            Some(ms) => ms,
            None => match env::var("ARCHIVE_DELAY_MS") {
                Ok(v) => v.trim().parse().with_context(|| format!("Invalid ARCHIVE_DELAY_MS: {}", v))?,
                Err(_) => DEFAULT_DELAY_MS,
            },
        };

        Ok(ScrapeConfig {
            base_url,
            listing_path,
            start_page: input.start_page.max(1),
            end_page: input.end_page.max(1),
            delay: Duration::from_millis(delay_ms),
            user_agent: pick(input.user_agent, "ARCHIVE_USER_AGENT", DEFAULT_USER_AGENT),
            accept_language: pick(input.accept_language, "ARCHIVE_ACCEPT_LANGUAGE", DEFAULT_ACCEPT_LANGUAGE),
            filter: TitleFilter::new(input.include, input.exclude),
            since: parse_since_opt(input.since)?,
        })
    }

    /// Pages in walk order, from `start_page` to `end_page` inclusive.
    pub fn pages(&self) -> Vec<u32> {
        if self.start_page >= self.end_page {
            (self.end_page..=self.start_page).rev().collect()
        } else {
            (self.start_page..=self.end_page).collect()
        }
    }
}

fn pick(cli: Option<&str>, var: &str, default: &str) -> String {
    cli.map(str::to_string)
        .or_else(|| env::var(var).ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(start: u32, end: u32) -> ScrapeConfig {
        ScrapeConfig::resolve(ConfigInput {
            base_url: Some("http://archive.test"),
            listing_path: Some("events/news/"),
            start_page: start,
            end_page: end,
            delay_ms: Some(0),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn page_walk_both_directions() {
        assert_eq!(cfg(3, 1).pages(), vec![3, 2, 1]);
        assert_eq!(cfg(1, 3).pages(), vec![1, 2, 3]);
        assert_eq!(cfg(0, 0).pages(), vec![1]);
    }

    #[test]
    fn listing_path_is_normalized() {
        assert_eq!(cfg(1, 1).listing_path, "/events/news");
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let err = ScrapeConfig::resolve(ConfigInput { base_url: Some("not a url"), delay_ms: Some(0), ..Default::default() });
        assert!(err.is_err());
    }

    #[test]
    fn title_filter() {
        let f = TitleFilter::new(&["Meeting".into(), "talks".into()], &["greeting".into()]);
        assert_eq!(f.check("Meeting with the Governor"), TitleVerdict::Keep);
        assert_eq!(f.check("Greeting to meeting participants"), TitleVerdict::Excluded("greeting".into()));
        assert_eq!(f.check("Telephone conversation"), TitleVerdict::NotIncluded);
        assert_eq!(TitleFilter::default().check("anything"), TitleVerdict::Keep);
    }
}
