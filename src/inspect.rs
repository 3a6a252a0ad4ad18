use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use crate::config::DEFAULT_BASE_URL;
use crate::ingestion::{article, supplement};
use crate::record::schema::{Collection, Table};
use crate::record::types::{ArticleRecord, SupplementRecord};
use crate::telemetry::{self};
use crate::telemetry::ops::inspect::Phase as InspectPhase;

/// Run extraction over saved HTML files
#[derive(Args, Debug)]
pub struct InspectCmd {
    /// Saved article page
    pub article: PathBuf,
    /// Saved supplement page linked from the article
    #[arg(long)]
    pub supplement: Option<PathBuf>,
    /// URL the article was fetched from
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub base_url: Option<String>,
}

/// entry point for inspect
pub async fn run(args: InspectCmd) -> Result<()> {
    let log = telemetry::inspect();
    let _g = log.root_span_kv([
        ("article", args.article.display().to_string()),
        ("supplement", format!("{:?}", args.supplement)),
    ]).entered();

    let base = args.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
    let base = Url::parse(base).with_context(|| format!("Invalid base URL: {}", base))?;
    let url = args.url.clone().unwrap_or_else(|| args.article.display().to_string());

    let (article_html, supplement_html) = {
        let _s = log.span(&InspectPhase::Read).entered();
        let a = read(&args.article)?;
        let s = args.supplement.as_deref().map(read).transpose()?;
        (a, s)
    };

    let _s = log.span(&InspectPhase::Extract).entered();
    let table = match inspect_html(&article_html, supplement_html.as_deref(), &url, &base) {
        Some(t) => t,
        None => {
            log.warn_kv("↩️ skip", [("reason", "missing_title".to_string())]);
            return Ok(());
        }
    };

    if let Some(row) = table.rows.first() {
        for (k, v) in row {
            let Some(v) = v else { continue };
            if v.is_empty() { continue; }
            log.info(format!("{:>24}: {}", k, preview(v, 120)));
        }
    }
    if telemetry::config::json_mode() {
        log.result(&table)?;
    }
    Ok(())
}

/// One-row table for a saved article and optional supplement. `None` if the
/// article has no title.
pub fn inspect_html(article_html: &str, supplement_html: Option<&str>, url: &str, base: &Url) -> Option<Table> {
    let draft = article::extract_article(article_html, url, base).ok()?;
    let supplement = supplement_html.map(|html| {
        let sup_url = draft.supplement_url.clone().unwrap_or_default();
        SupplementRecord::assemble(supplement::extract_supplement(html, &sup_url))
    });
    let mut collection = Collection::new();
    collection.push(ArticleRecord::assemble(draft.fields, supplement));
    Some(collection.into_table())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn preview(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_from_saved_pages() {
        let article = r#"<html><body><h1 class="entry-title">Встреча</h1>
            <a class="cut__item" href="/supplement/3">s</a></body></html>"#;
        let sup = r#"<html><body><div class="read__content"><p>ОРЛОВ – Губернатор области</p></div></body></html>"#;
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        let table = inspect_html(article, Some(sup), "http://kremlin.ru/events/president/news/1", &base).unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row["supplement_url"].as_deref(), Some("http://kremlin.ru/supplement/3"));
        assert_eq!(row["supplement_title"].as_deref(), Some("No title"));
        assert_eq!(row["Name_1"].as_deref(), Some("ОРЛОВ – Губернатор области"));
    }

    #[test]
    fn untitled_article_gives_nothing() {
        let base = Url::parse(DEFAULT_BASE_URL).unwrap();
        assert!(inspect_html("<p>no title</p>", None, "u", &base).is_none());
    }

    #[test]
    fn preview_truncates_on_chars() {
        assert_eq!(preview("абвгд", 3), "абв...");
        assert_eq!(preview("аб", 3), "аб");
    }
}
