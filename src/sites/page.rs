use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Read-only view of a rendered page, limited to the lookups the site
/// strategies need. `None` means no such element (or a bad selector); an
/// element that is there but blank comes back as an empty string, so callers
/// can stop at it instead of trying the next lookup.
pub trait PageAccessor {
    /// Trimmed text of the first `selector` match inside the first `scope` match.
    fn text_within(&self, scope: &str, selector: &str) -> Option<String>;

    /// Link target of the first `selector` match inside the first `scope` match.
    fn href_within(&self, scope: &str, selector: &str) -> Option<String>;
}

/// A page with no content, used when only the URL is known.
pub struct NoPage;

impl PageAccessor for NoPage {
    fn text_within(&self, _scope: &str, _selector: &str) -> Option<String> {
        None
    }

    fn href_within(&self, _scope: &str, _selector: &str) -> Option<String> {
        None
    }
}

/// Saved HTML document. Relative hrefs are resolved against the page URL,
/// the same way a browser reports `a.href`.
pub struct HtmlPage {
    document: Html,
    base: Option<Url>,
}

impl HtmlPage {
    pub fn parse(html: &str, page_url: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            base: Url::parse(page_url).ok(),
        }
    }

    fn first_within(&self, scope: &str, selector: &str) -> Option<ElementRef<'_>> {
        let scope_sel = parse_selector(scope)?;
        let inner_sel = parse_selector(selector)?;
        let container = self.document.select(&scope_sel).next()?;
        container.select(&inner_sel).next()
    }
}

impl PageAccessor for HtmlPage {
    fn text_within(&self, scope: &str, selector: &str) -> Option<String> {
        let el = self.first_within(scope, selector)?;
        let text = el.text().collect::<String>();
        Some(text.trim().to_string())
    }

    fn href_within(&self, scope: &str, selector: &str) -> Option<String> {
        let el = self.first_within(scope, selector)?;
        let href = el.value().attr("href").unwrap_or_default().trim();
        if href.is_empty() {
            return Some(String::new());
        }
        match &self.base {
            Some(base) => Some(
                base.join(href)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| href.to_string()),
            ),
            None => Some(href.to_string()),
        }
    }
}

fn parse_selector(s: &str) -> Option<Selector> {
    match Selector::parse(s) {
        Ok(sel) => Some(sel),
        Err(e) => {
            debug!("Invalid selector {:?}: {}", s, e);
            None
        }
    }
}
