use scraper::{ElementRef, Html, Node};

// elements whose boundaries separate words in the rendered text
const BLOCK_TAGS: [&str; 16] = [
    "p", "div", "br", "li", "ul", "ol", "tr", "td", "th",
    "h1", "h2", "h3", "h4", "h5", "h6", "blockquote",
];

/// Reduce a markup fragment to plain text. `None` yields `""`.
pub fn clean_markup(fragment: Option<&str>) -> String {
    let Some(fragment) = fragment else { return String::new() };
    let doc = Html::parse_fragment(fragment);
    clean_element(doc.root_element())
}

/// Plain text of an element with entities decoded and whitespace collapsed.
pub fn clean_element(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in el.descendants() {
        match node.value() {
            Node::Text(t) => raw.push_str(t),
            Node::Element(e) if BLOCK_TAGS.contains(&e.name()) => raw.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&raw)
}

pub fn collapse_whitespace(s: &str) -> String {
    let mut buf = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        // char::is_whitespace covers U+00A0
        if ch.is_whitespace() {
            if !in_ws {
                if !buf.is_empty() { buf.push(' '); }
                in_ws = true;
            }
        } else {
            buf.push(ch);
            in_ws = false;
        }
    }
    buf.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses() {
        let got = clean_markup(Some("<p>Президент  <b>провёл</b>\n\tвстречу</p>"));
        assert_eq!(got, "Президент провёл встречу");
    }

    #[test]
    fn nbsp_entity_becomes_space() {
        assert_eq!(clean_markup(Some("15&nbsp;марта&#160;2022")), "15 марта 2022");
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a b");
    }

    #[test]
    fn block_boundaries_separate_words() {
        assert_eq!(clean_markup(Some("<p>один</p><p>два</p>")), "один два");
        assert_eq!(clean_markup(Some("строка<br>строка")), "строка строка");
    }

    #[test]
    fn none_is_empty_string() {
        assert_eq!(clean_markup(None), "");
        assert_eq!(clean_markup(Some("  <div> </div> ")), "");
    }
}
