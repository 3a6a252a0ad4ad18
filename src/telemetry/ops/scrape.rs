use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Scrape;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Plan, Listing, FetchArticle, Extract, Supplement, Assemble, Export }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Plan => "plan",
        Phase::Listing => "listing",
        Phase::FetchArticle => "fetch_article",
        Phase::Extract => "extract",
        Phase::Supplement => "supplement",
        Phase::Assemble => "assemble",
        Phase::Export => "export",
    }}
    fn span(&self) -> Span { match self {
        Phase::Plan => info_span!("plan"),
        Phase::Listing => info_span!("listing"),
        Phase::FetchArticle => info_span!("fetch_article"),
        Phase::Extract => info_span!("extract"),
        Phase::Supplement => info_span!("supplement"),
        Phase::Assemble => info_span!("assemble"),
        Phase::Export => info_span!("export"),
    }}
}

impl OpMarker for Scrape {
    const NAME: &'static str = "scrape";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("scrape") }
}
