use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::normalize::text::clean_element;

/// A parsed document with ordered-fallback lookups.
pub struct Page {
    doc: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Page { doc: Html::parse_document(html) }
    }

    /// First element with non-empty text, trying each selector in order.
    pub fn first(&self, candidates: &[&str]) -> Option<ElementRef<'_>> {
        candidates.iter().find_map(|sel| {
            let sel = selector(sel)?;
            self.doc.select(&sel).find(|el| !clean_element(*el).is_empty())
        })
    }

    /// Cleaned text of [`Page::first`].
    pub fn first_text(&self, candidates: &[&str]) -> Option<String> {
        self.first(candidates).map(clean_element)
    }

    /// First `href` accepted by `keep`, trying each selector in order.
    pub fn first_href<F>(&self, candidates: &[&str], keep: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        candidates.iter().find_map(|sel| {
            let sel = selector(sel)?;
            self.doc
                .select(&sel)
                .filter_map(|el| el.value().attr("href"))
                .find(|href| keep(href))
                .map(str::to_string)
        })
    }

    pub fn select_all(&self, sel: &str) -> Vec<ElementRef<'_>> {
        match selector(sel) {
            Some(sel) => self.doc.select(&sel).collect(),
            None => Vec::new(),
        }
    }
}

/// Cleaned, non-empty text of the `inner` matches under `el`.
pub fn child_texts(el: ElementRef<'_>, inner: &str) -> Vec<String> {
    let Some(sel) = selector(inner) else { return Vec::new() };
    el.select(&sel)
        .map(clean_element)
        .filter(|t| !t.is_empty())
        .collect()
}

fn selector(s: &str) -> Option<Selector> {
    match Selector::parse(s) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = s, error = ?e, "bad selector");
            None
        }
    }
}
