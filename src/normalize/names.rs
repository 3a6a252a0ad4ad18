//! "SURNAME – position" detection over cleaned text blocks.
//!
//! Each block is run through [`RULES`] in order and the first rule that accepts
//! it produces the stored entry. Blocks no rule accepts are dropped.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

/// One detection rule: `pattern` finds a candidate, `accept` guards it,
/// `compose` builds the stored entry.
pub struct NameRule {
    pub name: &'static str,
    pattern: fn() -> &'static Regex,
    accept: fn(&Captures<'_>) -> bool,
    compose: fn(&str, &Captures<'_>) -> String,
}

impl NameRule {
    pub fn apply(&self, block: &str) -> Option<String> {
        let caps = (self.pattern)().captures(block)?;
        if !(self.accept)(&caps) { return None; }
        Some((self.compose)(block, &caps))
    }
}

/// Rule precedence; earlier rules win when a block satisfies several.
pub const RULES: [NameRule; 2] = [
    NameRule { name: "upper_lead", pattern: upper_lead_re, accept: accept_upper_lead, compose: compose_upper_lead },
    NameRule { name: "mixed_case", pattern: mixed_case_re, accept: accept_mixed_case, compose: compose_verbatim },
];

pub fn detect_names<S: AsRef<str>>(blocks: &[S]) -> Vec<String> {
    blocks.iter().filter_map(|b| classify_block(b.as_ref())).collect()
}

pub fn classify_block(block: &str) -> Option<String> {
    let block = block.trim();
    if block.is_empty() { return None; }
    RULES.iter().find_map(|rule| {
        let hit = rule.apply(block)?;
        debug!(rule = rule.name, entry = %hit, "name entry");
        Some(hit)
    })
}

// "ИВАНОВ Иван Иванович – Министр обороны": uppercase words, optional given
// names or initials, a dash, then the position.
fn upper_lead_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<lead>\p{Lu}+(?:-\p{Lu}+)*\b(?:\s+\p{Lu}+(?:-\p{Lu}+)*\b)*)(?:\s+\p{Lu}\p{Ll}*(?:-\p{Lu}\p{Ll}*)?\.?(?:\p{Lu}\.)*)*\s*[–—-]\s*(?P<rest>.+)$",
        )
        .expect("upper lead regex")
    })
}

// "Петров Пётр Петрович, министр" and friends: surname of two letters or
// more, one or two name tokens, optional separator, the rest.
fn mixed_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<surname>\p{Lu}[\p{L}-]+(?:\s+\p{Lu}[\p{Lu}-]+)*)\s+\p{Lu}\p{Ll}*\.?(?:\s+\p{Lu}\p{Ll}*\.?)?\s*[–—,-]?\s*(?P<rest>.+)$",
        )
        .expect("mixed case regex")
    })
}

fn accept_upper_lead(caps: &Captures<'_>) -> bool {
    let lead = caps.name("lead").map_or("", |m| m.as_str().trim());
    let rest = caps.name("rest").map_or("", |m| m.as_str().trim());
    lead.chars().count() > 1 && rest.chars().count() > 3
}

fn compose_upper_lead(_block: &str, caps: &Captures<'_>) -> String {
    let lead = caps.name("lead").map_or("", |m| m.as_str().trim());
    let rest = caps.name("rest").map_or("", |m| m.as_str().trim());
    format!("{lead} – {rest}")
}

fn accept_mixed_case(caps: &Captures<'_>) -> bool {
    let surname = caps.name("surname").map_or("", |m| m.as_str());
    let letters: Vec<char> = surname.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() { return false; }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    if upper == letters.len() { return true; }
    (upper as f64 / letters.len() as f64) > 0.5 && surname.chars().count() > 3
}

fn compose_verbatim(block: &str, _caps: &Captures<'_>) -> String {
    block.to_string()
}
