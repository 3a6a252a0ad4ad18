use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{info, debug, warn, error, Span};

use crate::ingestion::types::{PageSummary, RunTotals, SkipReason};
use crate::output::{config::OutputConfig, types::{Envelope, RunMeta, Stage}, Emitter};
use crate::telemetry::config::json_mode;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if details.is_empty() {
            debug!(op = %self.op_name(), phase = ph.name(), "span_start");
        } else {
            debug!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{}", msg); }
    }

    pub fn warn_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); warn!(op = %self.op_name(), details = %details, "{}", msg); }
        else { warn!("{} {}", msg, kv_to_string(kv)); }
    }

    pub fn error_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); error!(op = %self.op_name(), details = %details, "{}", msg); }
        else { error!("{} {}", msg, kv_to_string(kv)); }
    }

    pub fn plan<T: Serialize>(&self, plan: &T) -> Result<()> {
        self.emit(Envelope::new(self.op_name(), Stage::Plan, plan)?)
    }

    pub fn result<T: Serialize>(&self, result: &T) -> Result<()> {
        self.emit(Envelope::new(self.op_name(), Stage::Result, result)?)
    }

    pub fn result_with_run<T: Serialize>(&self, result: &T, run: RunMeta) -> Result<()> {
        self.emit(Envelope::new(self.op_name(), Stage::Result, result)?.with_run(run))
    }

    fn emit(&self, env: Envelope) -> Result<()> {
        Emitter::new(OutputConfig::resolve(json_mode())).emit(&env)?;
        Ok(())
    }
}

// Scrape-specific helpers on the typed context
impl LogCtx<crate::telemetry::ops::scrape::Scrape> {
    pub fn skip(&self, url: &str, reason: &SkipReason) {
        let kv = [("url", url.to_string()), ("reason", reason.kind().to_string()), ("detail", reason.to_string())];
        if reason.is_failure() { self.error_kv("✖ document failed", kv); } else { self.warn_kv("↩️ skip", kv); }
    }

    pub fn page_summary(&self, p: &PageSummary) {
        if self.json { info!(op = %self.op_name(), page = p.page, links = p.links, extracted = p.extracted, skipped = p.skipped, failed = p.failed, "page_summary"); }
        else { info!("✅ Page {} — links={} extracted={} skipped={} failed={}", p.page, p.links, p.extracted, p.skipped, p.failed); }
    }

    pub fn totals(&self, t: &RunTotals) {
        if self.json { info!(op = %self.op_name(), pages = t.pages, pages_failed = t.pages_failed, links = t.links, extracted = t.extracted, skipped = t.skipped, failed = t.failed, "scrape_totals"); }
        else { info!("📊 Scrape totals — pages={} pages_failed={} links={} extracted={} skipped={} failed={}", t.pages, t.pages_failed, t.links, t.extracted, t.skipped, t.failed); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
