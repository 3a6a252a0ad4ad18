use crate::normalize::text::clean_element;
use crate::record::types::SupplementFields;

use super::article::{CONTENT, DATE};
use super::page::{child_texts, Page};

pub const TITLE: &[&str] = &["h1.entry-title", "h1"];
pub const NO_TITLE: &str = "No title";
pub const BLOCKS: &str = "p, li";

pub fn extract_supplement(html: &str, url: &str) -> SupplementFields {
    let page = Page::parse(html);
    let content = page.first(CONTENT);
    let text = content.map(clean_element).unwrap_or_default();

    // paragraph-level blocks for name detection
    let mut blocks = content.map(|el| child_texts(el, BLOCKS)).unwrap_or_default();
    if blocks.is_empty() && !text.is_empty() {
        blocks.push(text.clone());
    }

    SupplementFields {
        url: url.to_string(),
        title: page.first_text(TITLE).unwrap_or_else(|| NO_TITLE.to_string()),
        raw_date: page.first_text(DATE),
        text,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::types::SupplementRecord;

    #[test]
    fn name_list_supplement() {
        let html = r#"
        <html><body>
          <h1 class="entry-title">Состав официальной делегации</h1>
          <time class="read__published">21 марта 2023 года</time>
          <div class="read__content">
            <p>ЛАВРОВ Сергей Викторович – Министр иностранных дел</p>
            <p>УШАКОВ Юрий Викторович&nbsp;–&nbsp;Помощник Президента</p>
            <p>Переговоры пройдут в расширенном составе.</p>
          </div>
        </body></html>"#;
        let fields = extract_supplement(html, "http://kremlin.ru/supplement/5912");
        assert_eq!(fields.title, "Состав официальной делегации");
        assert_eq!(fields.blocks.len(), 3);

        let rec = SupplementRecord::assemble(fields);
        assert_eq!(rec.names, vec![
            "ЛАВРОВ – Министр иностранных дел",
            "УШАКОВ – Помощник Президента",
        ]);
        assert_eq!(rec.date.formatted().as_deref(), Some("2023-03-21 00:00:00"));
    }

    #[test]
    fn bare_content_is_one_block() {
        let html = r#"<html><body><div class="read__content">ПЕСКОВ – пресс-секретарь</div></body></html>"#;
        let fields = extract_supplement(html, "u");
        assert_eq!(fields.title, NO_TITLE);
        assert_eq!(fields.blocks, vec!["ПЕСКОВ – пресс-секретарь"]);
    }
}
