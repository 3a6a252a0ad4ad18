use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{ConfigInput, ScrapeConfig};
use crate::ingestion::{self, fetch::HttpFetcher, listing};
use crate::ingestion::types::{PageSample, ScrapePlan, ScrapeResult};
use crate::output::types::RunMeta;
use crate::record::schema::Table;
use crate::telemetry::{self};
use crate::telemetry::ops::scrape::Phase as ScrapePhase;

#[derive(Args)]
pub struct ScrapeCmd {
    #[arg(long)] pub base_url: Option<String>,
    #[arg(long)] pub listing_path: Option<String>,
    #[arg(long, default_value_t = 10)] pub start_page: u32,
    #[arg(long, default_value_t = 1)] pub end_page: u32,
    /// Delay between requests in milliseconds (env ARCHIVE_DELAY_MS)
    #[arg(long)] pub delay_ms: Option<u64>,
    #[arg(long)] pub user_agent: Option<String>,
    #[arg(long)] pub accept_language: Option<String>,
    /// Keep only titles containing one of these keywords
    #[arg(long)] pub include: Vec<String>,
    /// Drop titles containing any of these keywords
    #[arg(long)] pub exclude: Vec<String>,
    /// Drop records dated before this (Nd, YYYY-MM-DD or RFC3339)
    #[arg(long)] pub since: Option<String>,
    /// Write the final table as JSON
    #[arg(long)] pub out: Option<PathBuf>,
    #[arg(long, default_value_t = false)] pub apply: bool,
    #[arg(long, default_value_t = 10)] pub plan_limit: usize,
}

pub async fn run(args: ScrapeCmd) -> Result<()> {
    let t0 = Instant::now();
    let cfg = ScrapeConfig::resolve(ConfigInput {
        base_url: args.base_url.as_deref(),
        listing_path: args.listing_path.as_deref(),
        start_page: args.start_page,
        end_page: args.end_page,
        delay_ms: args.delay_ms,
        user_agent: args.user_agent.as_deref(),
        accept_language: args.accept_language.as_deref(),
        include: &args.include,
        exclude: &args.exclude,
        since: args.since.as_deref(),
    })?;

    let log = telemetry::scrape();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("base_url", cfg.base_url.to_string()),
        ("start_page", cfg.start_page.to_string()),
        ("end_page", cfg.end_page.to_string()),
        ("delay_ms", (cfg.delay.as_millis() as u64).to_string()),
        ("since", format!("{:?}", cfg.since)),
        ("out", format!("{:?}", args.out)),
    ]).entered();

    let pages = cfg.pages();
    if !args.apply {
        let _s = log.span(&ScrapePhase::Plan).entered();
        log.info(format!(
            "📝 Scrape plan — pages={} ({}→{}) delay_ms={} include={:?} exclude={:?}",
            pages.len(), cfg.start_page, cfg.end_page, cfg.delay.as_millis(), cfg.filter.include, cfg.filter.exclude
        ));
        let mut sample_pages: Vec<PageSample> = Vec::new();
        for page in pages.iter().take(args.plan_limit) {
            let url = listing::listing_url(&cfg.base_url, &cfg.listing_path, *page)?;
            log.info(format!("  page={} url={}", page, url));
            sample_pages.push(PageSample { page: *page, url: url.to_string() });
        }
        if pages.len() > args.plan_limit { log.info(format!("  ... ({} more)", pages.len() - args.plan_limit)); }
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            let plan = ScrapePlan {
                base_url: cfg.base_url.to_string(),
                pages: pages.len(),
                delay_ms: cfg.delay.as_millis() as u64,
                include: cfg.filter.include.clone(),
                exclude: cfg.filter.exclude.clone(),
                since: cfg.since.map(|s| s.to_string()),
                sample_pages,
            };
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let fetcher = HttpFetcher::new(&cfg)?;
    let (collection, totals, per_page) = ingestion::collect(&fetcher, &cfg, &log).await;

    // schema is derived once, after every record is in
    let table = collection.into_table();
    log.totals(&totals);
    log.info(format!("🧾 Table — rows={} columns={} max_names={}", table.len(), table.columns.len(), table.max_names));
    preview(&log, &table);

    if let Some(path) = &args.out {
        let _s = log.span_kv(&ScrapePhase::Export, [("path", path.display().to_string())]).entered();
        write_table(path, &table)?;
        log.info(format!("💾 Saved {} records to {}", table.len(), path.display()));
    }

    log.info(format!("⏱  Done in {:.1}s", t0.elapsed().as_secs_f64()));
    if telemetry::config::json_mode() {
        let run = RunMeta {
            duration_ms: t0.elapsed().as_millis() as u64,
            pages: totals.pages,
            records: table.len(),
        };
        let result = ScrapeResult {
            totals,
            per_page,
            columns: table.columns.len(),
            max_names: table.max_names,
            out: args.out.as_ref().map(|p| p.display().to_string()),
        };
        log.result_with_run(&result, run)?;
    }
    Ok(())
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, table).with_context(|| format!("write {}", path.display()))?;
    w.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

fn preview(log: &telemetry::ctx::LogCtx<telemetry::ops::scrape::Scrape>, table: &Table) {
    if table.is_empty() {
        log.warn("No articles were found!");
        return;
    }
    for row in table.rows.iter().take(5) {
        let field = |k: &str| row.get(k).cloned().flatten().unwrap_or_else(|| "-".to_string());
        log.info(format!("  {} | {} | {}", field("date"), field("place"), field("title")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::schema::Collection;

    #[test]
    fn writes_table_as_json() {
        let path = std::env::temp_dir().join(format!("archive-table-{}.json", std::process::id()));
        write_table(&path, &Collection::new().into_table()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["max_names"], 0);
        assert!(v["rows"].as_array().unwrap().is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_errors_surface() {
        let err = write_table(Path::new("/dev/full"), &Collection::new().into_table());
        assert!(err.is_err());
    }
}
