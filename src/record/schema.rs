//! Collection-wide flat schema.
//!
//! Records are accumulated first; [`Collection::into_table`] then sizes the
//! `Name_k` columns by the widest name list in the whole collection and
//! flattens every record against that one schema.

use indexmap::IndexMap;
use serde::Serialize;

use crate::normalize::chunk::CHUNK_COUNT;

use super::types::ArticleRecord;

pub type FlatRow = IndexMap<String, Option<String>>;

#[derive(Debug, Default)]
pub struct Collection {
    records: Vec<ArticleRecord>,
}

impl Collection {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, record: ArticleRecord) { self.records.push(record); }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn records(&self) -> &[ArticleRecord] { &self.records }

    pub fn max_names(&self) -> usize {
        self.records.iter().map(|r| r.names.len()).max().unwrap_or(0)
    }

    /// Derive the final schema and flatten all records. Consumes the collection.
    pub fn into_table(self) -> Table {
        let max_names = self.max_names();
        let columns = columns(max_names);
        let rows = self.records.iter().map(|r| flatten(r, max_names)).collect();
        Table { columns, max_names, rows }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub max_names: usize,
    pub rows: Vec<FlatRow>,
}

impl Table {
    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

pub fn columns(max_names: usize) -> Vec<String> {
    let mut cols: Vec<String> = ["title", "date", "raw_date", "place", "summary"]
        .iter().map(|s| s.to_string()).collect();
    cols.extend((1..=CHUNK_COUNT).map(|i| format!("article_full_text_{i}")));
    cols.extend(["url", "supplement_url", "supplement_title", "supplement_date"].iter().map(|s| s.to_string()));
    cols.extend((1..=CHUNK_COUNT).map(|i| format!("supplement_full_text_{i}")));
    cols.extend((1..=max_names).map(|i| format!("Name_{i}")));
    cols
}

fn flatten(record: &ArticleRecord, max_names: usize) -> FlatRow {
    let mut row = FlatRow::new();
    row.insert("title".into(), Some(record.title.clone()));
    row.insert("date".into(), record.date.formatted());
    row.insert("raw_date".into(), Some(record.date.raw.clone()));
    row.insert("place".into(), Some(record.place.clone()));
    row.insert("summary".into(), Some(record.summary.clone()));
    for i in 0..CHUNK_COUNT {
        row.insert(format!("article_full_text_{}", i + 1), Some(record.text_chunks.get(i).cloned().unwrap_or_default()));
    }
    row.insert("url".into(), Some(record.url.clone()));

    let sup = record.supplement.as_ref();
    row.insert("supplement_url".into(), sup.map(|s| s.url.clone()));
    row.insert("supplement_title".into(), sup.map(|s| s.title.clone()));
    row.insert("supplement_date".into(), sup.and_then(|s| s.date.formatted()));
    for i in 0..CHUNK_COUNT {
        row.insert(
            format!("supplement_full_text_{}", i + 1),
            sup.map(|s| s.text_chunks.get(i).cloned().unwrap_or_default()),
        );
    }

    for i in 0..max_names {
        row.insert(format!("Name_{}", i + 1), record.names.get(i).cloned());
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::types::{ArticleFields, SupplementFields, SupplementRecord};

    fn record(title: &str, names: &[&str]) -> ArticleRecord {
        let blocks: Vec<String> = names.iter().map(|n| format!("{n} – должность")).collect();
        let supplement = (!names.is_empty()).then(|| SupplementRecord::assemble(SupplementFields {
            url: format!("http://kremlin.ru/supplement/{title}"),
            title: "Список".into(),
            blocks,
            ..Default::default()
        }));
        ArticleRecord::assemble(ArticleFields { title: title.into(), ..Default::default() }, supplement)
    }

    #[test]
    fn name_columns_follow_widest_record() {
        let mut c = Collection::new();
        c.push(record("a", &["АА", "ББ"]));
        c.push(record("b", &["АА", "ББ", "ВВ", "ГГ", "ДД"]));
        let table = c.into_table();

        assert_eq!(table.max_names, 5);
        let names: Vec<&String> = table.columns.iter().filter(|c| c.starts_with("Name_")).collect();
        assert_eq!(names, ["Name_1", "Name_2", "Name_3", "Name_4", "Name_5"]);

        let a = &table.rows[0];
        assert_eq!(a["Name_2"].as_deref(), Some("ББ – должность"));
        assert_eq!(a["Name_3"], None);
        assert_eq!(a["Name_5"], None);
        assert_eq!(table.rows[1]["Name_5"].as_deref(), Some("ДД – должность"));
    }

    #[test]
    fn rows_follow_column_order() {
        let mut c = Collection::new();
        c.push(record("a", &["АА"]));
        let table = c.into_table();
        let keys: Vec<&String> = table.rows[0].keys().collect();
        let cols: Vec<&String> = table.columns.iter().collect();
        assert_eq!(keys, cols);
        assert_eq!(table.columns.len(), 5 + CHUNK_COUNT + 4 + CHUNK_COUNT + 1);
    }

    #[test]
    fn absent_supplement_is_null() {
        let mut c = Collection::new();
        c.push(record("solo", &[]));
        assert_eq!(c.max_names(), 0);
        let table = c.into_table();
        let row = &table.rows[0];
        assert_eq!(row["supplement_url"], None);
        assert_eq!(row["supplement_title"], None);
        assert_eq!(row["supplement_full_text_1"], None);
        assert_eq!(row["article_full_text_1"].as_deref(), Some(""));
        assert!(!table.columns.iter().any(|c| c.starts_with("Name_")));
    }

    #[test]
    fn empty_collection() {
        let table = Collection::new().into_table();
        assert!(table.is_empty());
        assert_eq!(table.max_names, 0);
    }
}
