//! Per-document extraction and the sequential page walk.
//!
//! Every document is processed to a `Result<ArticleRecord, SkipReason>`; the
//! walk logs and tallies skips and keeps going, so one bad page or article
//! never ends a run.

use anyhow::Context;

use crate::config::{ScrapeConfig, TitleVerdict};
use crate::normalize::date::parse_archive_date;
use crate::record::schema::Collection;
use crate::record::types::{ArticleRecord, SupplementRecord};
use crate::record::types::DATE_FORMAT;
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::scrape::{Phase as ScrapePhase, Scrape};

pub mod article;
pub mod fetch;
pub mod listing;
pub mod page;
pub mod supplement;
pub mod types;

use fetch::Fetch;
use types::{PageSummary, RunTotals, SkipReason};

/// Fetch, extract and assemble one article together with its first supplement.
pub async fn process_document<F: Fetch>(
    fetcher: &F,
    cfg: &ScrapeConfig,
    url: &str,
    log: &LogCtx<Scrape>,
) -> Result<ArticleRecord, SkipReason> {
    let html = {
        let _s = log.span_kv(&ScrapePhase::FetchArticle, [("url", url.to_string())]).entered();
        fetcher.fetch(url).await.context("fetch article")?
    };
    let Some(html) = html else { return Err(SkipReason::NotFound) };

    let draft = {
        let _s = log.span(&ScrapePhase::Extract).entered();
        article::extract_article(&html, url, &cfg.base_url)?
    };

    match cfg.filter.check(&draft.fields.title) {
        TitleVerdict::Keep => {}
        TitleVerdict::Excluded(keyword) => return Err(SkipReason::Excluded { keyword }),
        TitleVerdict::NotIncluded => return Err(SkipReason::NotIncluded),
    }

    // cutoff before the supplement request; undated articles pass
    if let Some(since) = cfg.since {
        let date = draft.fields.raw_date.as_deref().and_then(|raw| parse_archive_date(raw.trim()).ok());
        if let Some(date) = date.filter(|d| *d < since) {
            return Err(SkipReason::BeforeCutoff { date: date.format(DATE_FORMAT).to_string() });
        }
    }

    let supplement = match draft.supplement_url.as_deref() {
        Some(sup_url) => {
            let _s = log.span_kv(&ScrapePhase::Supplement, [("url", sup_url.to_string())]).entered();
            match fetcher.fetch(sup_url).await.context("fetch supplement")? {
                Some(sup_html) => Some(SupplementRecord::assemble(supplement::extract_supplement(&sup_html, sup_url))),
                None => {
                    log.warn_kv("supplement unavailable", [("url", sup_url.to_string())]);
                    None
                }
            }
        }
        None => None,
    };

    let _s = log.span(&ScrapePhase::Assemble).entered();
    Ok(ArticleRecord::assemble(draft.fields, supplement))
}

/// Article links of one listing page.
pub async fn list_page<F: Fetch>(fetcher: &F, cfg: &ScrapeConfig, page_num: u32) -> anyhow::Result<Vec<String>> {
    let url = listing::listing_url(&cfg.base_url, &cfg.listing_path, page_num)?;
    let html = fetcher
        .fetch(url.as_str())
        .await
        .with_context(|| format!("fetch listing page {}", page_num))?
        .with_context(|| format!("listing page {} not found", page_num))?;
    Ok(listing::article_links(&html, &cfg.base_url, &cfg.listing_path))
}

/// Walk the configured pages in order and collect every assembled record.
pub async fn collect<F: Fetch>(
    fetcher: &F,
    cfg: &ScrapeConfig,
    log: &LogCtx<Scrape>,
) -> (Collection, RunTotals, Vec<PageSummary>) {
    let mut collection = Collection::new();
    let mut totals = RunTotals::default();
    let mut per_page: Vec<PageSummary> = Vec::new();

    for page_num in cfg.pages() {
        let links = {
            let _s = log.span_kv(&ScrapePhase::Listing, [("page", page_num.to_string())]).entered();
            list_page(fetcher, cfg, page_num).await
        };
        let links = match links {
            Ok(l) => l,
            Err(e) => {
                log.error_kv("✖ listing failed", [("page", page_num.to_string()), ("error", format!("{:#}", e))]);
                totals.pages_failed += 1;
                continue;
            }
        };

        let mut summary = PageSummary { page: page_num, links: links.len(), ..Default::default() };
        for url in &links {
            match process_document(fetcher, cfg, url, log).await {
                Ok(record) => {
                    log.info_kv("➕ record", [("url", url.clone()), ("title", record.title.clone()), ("names", record.names.len().to_string())]);
                    collection.push(record);
                    summary.extracted += 1;
                }
                Err(reason) => {
                    log.skip(url, &reason);
                    if reason.is_failure() { summary.failed += 1; } else { summary.skipped += 1; }
                }
            }
        }

        log.page_summary(&summary);
        totals.add_page(&summary);
        per_page.push(summary);
    }

    (collection, totals, per_page)
}
