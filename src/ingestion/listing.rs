use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use super::page::Page;

pub const ENTRY_SELECTOR: &str = "div.hentry, div.h-entry, div.hentry_event";

/// Listing page N: page 1 is the bare listing path, later pages use `/page/N`.
pub fn listing_url(base: &Url, listing_path: &str, page: u32) -> Result<Url> {
    let path = if page <= 1 { listing_path.to_string() } else { format!("{}/page/{}", listing_path, page) };
    base.join(&path).with_context(|| format!("listing url for page {}", page))
}

// "<listing>/<id>" with an optional trailing slash
fn article_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?P<listing>.*)/\d+/?$").expect("article path regex"))
}

fn link_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("a[href]").expect("link selector"))
}

/// Article links of one listing page, in page order, without duplicates.
pub fn article_links(html: &str, base: &Url, listing_path: &str) -> Vec<String> {
    let page = Page::parse(html);

    let mut out: Vec<String> = Vec::new();
    for entry in page.select_all(ENTRY_SELECTOR) {
        let Some(link) = entry_link(entry, base, listing_path) else { continue };
        if !out.contains(&link) { out.push(link); }
    }
    out
}

fn is_article_path(path: &str, listing_path: &str) -> bool {
    article_path_re()
        .captures(path)
        .and_then(|c| c.name("listing"))
        .is_some_and(|m| m.as_str() == listing_path)
}

fn entry_link(entry: ElementRef<'_>, base: &Url, listing_path: &str) -> Option<String> {
    entry
        .select(link_selector())
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .find(|u| is_article_path(u.path(), listing_path))
        .map(|u| u.to_string())
}
