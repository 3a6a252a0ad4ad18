use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "archive.v1";

/// Whether the envelope carries a dry-run plan or the outcome of `--apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Plan,
    Result,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Plan => "Plan",
            Stage::Result => "Result",
        }
    }
}

/// Run-level figures attached to a finished scrape.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMeta {
    pub duration_ms: u64,
    pub pages: usize,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub run_id: Uuid,
    pub op: &'static str,
    pub stage: Stage,
    pub body: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunMeta>,
}

impl Envelope {
    pub fn new<T: Serialize>(op: &'static str, stage: Stage, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Envelope {
            schema_version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            run_id: Uuid::new_v4(),
            op,
            stage,
            body: serde_json::to_value(body)?,
            run: None,
        })
    }

    pub fn with_run(mut self, run: RunMeta) -> Self {
        self.run = Some(run);
        self
    }
}
