use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::normalize::chunk::chunk_full_text;
use crate::normalize::date::parse_archive_date;
use crate::normalize::names::detect_names;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A parsed archive date; `raw` is kept even when `value` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateValue {
    pub value: Option<NaiveDateTime>,
    pub raw: String,
}

impl DateValue {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else { return Self::default() };
        match parse_archive_date(raw) {
            Ok(value) => DateValue { value: Some(value), raw: raw.to_string() },
            Err(e) => {
                warn!(raw = %raw, reason = %e, "unparseable date");
                DateValue { value: None, raw: raw.to_string() }
            }
        }
    }

    pub fn formatted(&self) -> Option<String> {
        self.value.map(|v| v.format(DATE_FORMAT).to_string())
    }
}

/// Fields pulled off an article page before assembly.
#[derive(Debug, Clone, Default)]
pub struct ArticleFields {
    pub url: String,
    pub title: String,
    pub raw_date: Option<String>,
    pub place: String,
    pub summary: String,
    pub text: String,
}

/// Fields pulled off a supplement page before assembly.
#[derive(Debug, Clone, Default)]
pub struct SupplementFields {
    pub url: String,
    pub title: String,
    pub raw_date: Option<String>,
    pub text: String,
    pub blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementRecord {
    pub url: String,
    pub title: String,
    pub date: DateValue,
    pub text_chunks: Vec<String>,
    pub names: Vec<String>,
}

impl SupplementRecord {
    pub fn assemble(fields: SupplementFields) -> Self {
        SupplementRecord {
            date: DateValue::parse(fields.raw_date.as_deref()),
            text_chunks: chunk_full_text(&fields.text),
            names: detect_names(&fields.blocks),
            url: fields.url,
            title: fields.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub date: DateValue,
    pub place: String,
    pub summary: String,
    pub text_chunks: Vec<String>,
    pub url: String,
    pub supplement: Option<SupplementRecord>,
    pub names: Vec<String>,
}

impl ArticleRecord {
    pub fn assemble(fields: ArticleFields, supplement: Option<SupplementRecord>) -> Self {
        // names come only from the supplement
        let names = supplement.as_ref().map(|s| s.names.clone()).unwrap_or_default();
        ArticleRecord {
            date: DateValue::parse(fields.raw_date.as_deref()),
            text_chunks: chunk_full_text(&fields.text),
            title: fields.title,
            place: fields.place,
            summary: fields.summary,
            url: fields.url,
            supplement,
            names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::chunk::CHUNK_COUNT;

    #[test]
    fn unparseable_date_keeps_raw() {
        let d = DateValue::parse(Some(" 15 мартобря 2022 "));
        assert_eq!(d.value, None);
        assert_eq!(d.raw, "15 мартобря 2022");
        assert_eq!(DateValue::parse(None), DateValue::default());
    }

    #[test]
    fn formatted_date() {
        let d = DateValue::parse(Some("15 марта 2022 14:30"));
        assert_eq!(d.formatted().as_deref(), Some("2022-03-15 14:30:00"));
    }

    #[test]
    fn article_takes_names_from_supplement() {
        let supplement = SupplementRecord::assemble(SupplementFields {
            url: "http://kremlin.ru/supplement/1".into(),
            title: "Состав делегации".into(),
            raw_date: Some("1 января 2023 года".into()),
            text: "ИВАНОВ Иван – Министр обороны".into(),
            blocks: vec!["ИВАНОВ Иван – Министр обороны".into(), "текст".into()],
        });
        assert_eq!(supplement.names, vec!["ИВАНОВ – Министр обороны"]);

        let article = ArticleRecord::assemble(
            ArticleFields { title: "Переговоры".into(), text: "abc".into(), ..Default::default() },
            Some(supplement),
        );
        assert_eq!(article.names.len(), 1);
        assert_eq!(article.text_chunks.len(), CHUNK_COUNT);
        assert_eq!(article.text_chunks[0], "abc");
        assert_eq!(article.date, DateValue::default());
    }

    #[test]
    fn no_supplement_no_names() {
        let article = ArticleRecord::assemble(ArticleFields::default(), None);
        assert!(article.names.is_empty());
        assert!(article.supplement.is_none());
    }
}
