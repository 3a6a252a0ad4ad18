use url::Url;

use crate::record::types::ArticleFields;

use super::page::Page;
use super::types::SkipReason;

pub const TITLE: &[&str] = &["h1.entry-title.p-name", "h1.entry-title", "h1.p-name"];
pub const DATE: &[&str] = &["time.read__published", "time.published", "time.dt-published", "time"];
pub const PLACE: &[&str] = &["div.read__place.p-location", ".read__place", ".p-location"];
pub const SUMMARY: &[&str] = &["div.read__lead", ".entry-summary", ".p-summary"];
pub const CONTENT: &[&str] = &["div.read__content", ".entry-content", "article"];
pub const SUPPLEMENT_LINK: &[&str] = &["a.cut__item[href]", "a[href]"];

/// Article fields plus the first supplement link, if any.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub fields: ArticleFields,
    pub supplement_url: Option<String>,
}

pub fn extract_article(html: &str, url: &str, base: &Url) -> Result<ArticleDraft, SkipReason> {
    let page = Page::parse(html);

    let title = page.first_text(TITLE).ok_or(SkipReason::MissingTitle)?;
    let fields = ArticleFields {
        url: url.to_string(),
        title,
        raw_date: page.first_text(DATE),
        place: page.first_text(PLACE).unwrap_or_default(),
        summary: page.first_text(SUMMARY).unwrap_or_default(),
        text: page.first_text(CONTENT).unwrap_or_default(),
    };

    let supplement_url = page
        .first_href(SUPPLEMENT_LINK, |h| h.contains("/supplement/"))
        .and_then(|href| supplement_url(base, &href));

    Ok(ArticleDraft { fields, supplement_url })
}

/// `<base>/supplement/<id>` from any link whose last path segment is the id.
pub fn supplement_url(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href).ok()?;
    let id = resolved.path_segments()?.filter(|s| !s.is_empty()).last()?.to_string();
    base.join(&format!("/supplement/{}", id)).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url { Url::parse("http://kremlin.ru").unwrap() }

    const ARTICLE: &str = r#"
    <html><body>
      <h1 class="entry-title p-name">Переговоры с Президентом Китая</h1>
      <time class="read__published" datetime="2023-03-21">21 марта 2023 года, 15:00</time>
      <div class="read__place p-location">Москва,&nbsp;Кремль</div>
      <div class="read__lead p-summary"><p>Состоялись  российско-китайские переговоры.</p></div>
      <div class="read__content"><p>Первый абзац.</p><p>Второй абзац.</p></div>
      <h3 class="cut__title">Дополнительные материалы</h3>
      <a class="cut__item" href="/supplement/5912">Список документов</a>
      <a class="cut__item" href="/supplement/5913">Второй список</a>
    </body></html>"#;

    #[test]
    fn extracts_fields_and_first_supplement() {
        let url = "http://kremlin.ru/events/president/news/70748";
        let draft = extract_article(ARTICLE, url, &base()).unwrap();
        let f = &draft.fields;
        assert_eq!(f.title, "Переговоры с Президентом Китая");
        assert_eq!(f.raw_date.as_deref(), Some("21 марта 2023 года, 15:00"));
        assert_eq!(f.place, "Москва, Кремль");
        assert_eq!(f.summary, "Состоялись российско-китайские переговоры.");
        assert_eq!(f.text, "Первый абзац. Второй абзац.");
        assert_eq!(draft.supplement_url.as_deref(), Some("http://kremlin.ru/supplement/5912"));
    }

    #[test]
    fn missing_title_skips() {
        let html = "<html><body><div class=\"read__place\">Сочи</div></body></html>";
        let err = extract_article(html, "u", &base()).unwrap_err();
        assert!(matches!(err, SkipReason::MissingTitle));
    }

    #[test]
    fn missing_place_defaults_empty() {
        let html = "<html><body><h1 class=\"entry-title\">Встреча</h1></body></html>";
        let draft = extract_article(html, "u", &base()).unwrap();
        assert_eq!(draft.fields.place, "");
        assert_eq!(draft.fields.raw_date, None);
        assert_eq!(draft.supplement_url, None);
    }

    #[test]
    fn supplement_url_from_full_link() {
        let got = supplement_url(&base(), "http://en.kremlin.ru/supplement/77/");
        assert_eq!(got.as_deref(), Some("http://kremlin.ru/supplement/77"));
    }
}
