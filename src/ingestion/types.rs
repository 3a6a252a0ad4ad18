use serde::Serialize;
use thiserror::Error;

/// Why a document did not make it into the collection.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("missing title")]
    MissingTitle,
    #[error("document not found")]
    NotFound,
    #[error("title matches excluded keyword {keyword:?}")]
    Excluded { keyword: String },
    #[error("title matches no include keyword")]
    NotIncluded,
    #[error("dated {date} before cutoff")]
    BeforeCutoff { date: String },
    #[error("{0:#}")]
    Failed(anyhow::Error),
}

impl SkipReason {
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::MissingTitle => "missing_title",
            SkipReason::NotFound => "not_found",
            SkipReason::Excluded { .. } => "excluded",
            SkipReason::NotIncluded => "not_included",
            SkipReason::BeforeCutoff { .. } => "before_cutoff",
            SkipReason::Failed(_) => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::Failed(_) | SkipReason::NotFound)
    }
}

impl From<anyhow::Error> for SkipReason {
    fn from(e: anyhow::Error) -> Self { SkipReason::Failed(e) }
}

// Plan envelope types
#[derive(Serialize)]
pub struct PageSample { pub page: u32, pub url: String }

#[derive(Serialize)]
pub struct ScrapePlan {
    pub base_url: String,
    pub pages: usize,
    pub delay_ms: u64,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub since: Option<String>,
    pub sample_pages: Vec<PageSample>,
}

// Apply/result envelope types
#[derive(Serialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary { pub page: u32, pub links: usize, pub extracted: usize, pub skipped: usize, pub failed: usize }

#[derive(Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct RunTotals {
    pub pages: usize,
    pub pages_failed: usize,
    pub links: usize,
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunTotals {
    pub fn add_page(&mut self, p: &PageSummary) {
        self.pages += 1;
        self.links += p.links;
        self.extracted += p.extracted;
        self.skipped += p.skipped;
        self.failed += p.failed;
    }
}

#[derive(Serialize)]
pub struct ScrapeResult {
    pub totals: RunTotals,
    pub per_page: Vec<PageSummary>,
    pub columns: usize,
    pub max_names: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
}
