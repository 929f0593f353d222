pub mod charityjob;
pub mod format;
pub mod indeed;
pub mod linkedin;
pub mod page;

use tracing::{debug, info};
use url::Url;

use format::format_company_name;
use page::PageAccessor;

/// One page lookup, tried in order until something is found.
#[derive(Debug, Clone, Copy)]
pub enum Lookup {
    /// Text content of the element is the company name.
    Text(&'static str),
    /// Link target of the element points at the company's own page.
    Href(&'static str),
}

/// URL shapes and page selectors for a site we can extract from.
#[derive(Debug, Clone)]
pub struct PageRules {
    /// Substring marking a company/organisation page, e.g. `linkedin.com/company/`.
    pub entity_marker: &'static str,
    /// Path segment preceding the company slug, e.g. `company`.
    pub entity_segment: &'static str,
    /// Prefix of job listing URLs whose company must be read from the page.
    pub listing_prefix: &'static str,
    /// Container holding the job details.
    pub scope: &'static str,
    pub lookups: &'static [Lookup],
}

#[derive(Debug, Clone)]
pub enum Support {
    Pages(PageRules),
    /// Recognised site, extraction not implemented yet.
    Unsupported,
}

#[derive(Debug, Clone)]
pub struct SiteStrategy {
    pub name: &'static str,
    pub domain: &'static str,
    pub support: Support,
}

/// Outcome of running one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    NotFound,
    /// The site is known but has no extraction logic; not the same as "checked, nothing there".
    Unsupported,
}

impl Extraction {
    pub fn company(self) -> Option<String> {
        match self {
            Extraction::Found(name) => Some(name),
            Extraction::NotFound | Extraction::Unsupported => None,
        }
    }
}

impl SiteStrategy {
    /// Plain, case-sensitive substring test on the site's domain.
    pub fn can_handle(&self, url: &str) -> bool {
        url.contains(self.domain)
    }

    /// Job listing pages render the company late, so callers may re-check them.
    pub fn is_listing(&self, url: &str) -> bool {
        match &self.support {
            Support::Pages(rules) => url.starts_with(rules.listing_prefix),
            Support::Unsupported => false,
        }
    }

    pub fn extract(&self, url: &str, page: &dyn PageAccessor) -> Extraction {
        let rules = match &self.support {
            Support::Pages(rules) => rules,
            Support::Unsupported => {
                info!(site = self.name, "Company extraction not implemented for this site");
                return Extraction::Unsupported;
            }
        };

        let name = if url.contains(rules.entity_marker) {
            format_company_name(url, rules.entity_segment)
        } else if url.starts_with(rules.listing_prefix) {
            rules
                .find_on_page(page)
                .and_then(|found| resolve_candidate(&found, rules.entity_segment))
        } else {
            debug!(site = self.name, url, "Neither a company nor a listing page");
            None
        };

        match name {
            Some(n) if !n.is_empty() => Extraction::Found(n),
            _ => Extraction::NotFound,
        }
    }
}

impl PageRules {
    /// The first lookup whose element exists decides; a blank one ends the
    /// search with nothing rather than falling through to the next lookup.
    fn find_on_page(&self, page: &dyn PageAccessor) -> Option<String> {
        self.lookups
            .iter()
            .find_map(|lookup| match *lookup {
                Lookup::Text(sel) => page.text_within(self.scope, sel),
                Lookup::Href(sel) => page.href_within(self.scope, sel),
            })
            .filter(|found| !found.is_empty())
    }
}

/// A page lookup yields either a link to the company page or the name itself.
/// Anything that doesn't parse as an absolute URL is taken literally.
fn resolve_candidate(found: &str, entity_segment: &str) -> Option<String> {
    match Url::parse(found) {
        Ok(link) => format_company_name(link.as_str(), entity_segment),
        Err(e) => {
            debug!("Page value {:?} is not a URL ({}), using it as the name", found, e);
            Some(found.to_string())
        }
    }
}

/// Ordered strategy list. The first strategy that handles a URL owns it,
/// even when it finds nothing.
pub struct SiteRegistry {
    sites: Vec<SiteStrategy>,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new(vec![
            linkedin::strategy(),
            indeed::strategy(),
            charityjob::strategy(),
        ])
    }
}

impl SiteRegistry {
    pub fn new(sites: Vec<SiteStrategy>) -> Self {
        Self { sites }
    }

    pub fn sites(&self) -> &[SiteStrategy] {
        &self.sites
    }

    pub fn strategy_for(&self, url: &str) -> Option<&SiteStrategy> {
        self.sites.iter().find(|s| s.can_handle(url))
    }

    pub fn is_supported(&self, url: &str) -> bool {
        self.strategy_for(url).is_some()
    }

    pub fn extract(&self, url: &str, page: &dyn PageAccessor) -> Option<(&SiteStrategy, Extraction)> {
        let site = self.strategy_for(url)?;
        Some((site, site.extract(url, page)))
    }

    pub fn extract_company_name(&self, url: &str, page: &dyn PageAccessor) -> Option<String> {
        self.extract(url, page).and_then(|(_, e)| e.company())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::page::NoPage;
    use super::*;

    /// In-memory page keyed by `(scope, selector)`.
    #[derive(Default)]
    pub struct FixturePage {
        texts: HashMap<(String, String), String>,
        hrefs: HashMap<(String, String), String>,
    }

    impl FixturePage {
        pub fn with_text(mut self, scope: &str, selector: &str, value: &str) -> Self {
            self.texts.insert((scope.into(), selector.into()), value.into());
            self
        }

        pub fn with_href(mut self, scope: &str, selector: &str, value: &str) -> Self {
            self.hrefs.insert((scope.into(), selector.into()), value.into());
            self
        }
    }

    impl PageAccessor for FixturePage {
        fn text_within(&self, scope: &str, selector: &str) -> Option<String> {
            self.texts.get(&(scope.to_string(), selector.to_string())).cloned()
        }

        fn href_within(&self, scope: &str, selector: &str) -> Option<String> {
            self.hrefs.get(&(scope.to_string(), selector.to_string())).cloned()
        }
    }

    const SCOPE: &str = ".details";

    fn example_site(name: &'static str, lookups: &'static [Lookup]) -> SiteStrategy {
        SiteStrategy {
            name,
            domain: "example.com",
            support: Support::Pages(PageRules {
                entity_marker: "example.com/company/",
                entity_segment: "company",
                listing_prefix: "https://example.com/jobs/",
                scope: SCOPE,
                lookups,
            }),
        }
    }

    #[test]
    fn first_registered_strategy_wins_even_when_empty() {
        let registry = SiteRegistry::new(vec![
            example_site("first", &[Lookup::Text(".nothing")]),
            example_site("second", &[Lookup::Text(".name")]),
        ]);
        let page = FixturePage::default().with_text(SCOPE, ".name", "Initech");

        let (site, extraction) = registry.extract("https://example.com/jobs/1", &page).unwrap();
        assert_eq!(site.name, "first");
        assert_eq!(extraction, Extraction::NotFound);
        assert_eq!(registry.extract_company_name("https://example.com/jobs/1", &page), None);
    }

    #[test]
    fn unknown_domain_is_none() {
        let registry = SiteRegistry::default();
        assert!(registry.extract("https://jobs.example.org/123", &NoPage).is_none());
        assert!(!registry.is_supported("https://jobs.example.org/123"));
    }

    #[test]
    fn entity_url_is_formatted_without_page() {
        let site = example_site("s", &[]);
        assert_eq!(
            site.extract("https://example.com/company/acme-corp?trk=1", &NoPage),
            Extraction::Found("Acme Corp".into())
        );
    }

    #[test]
    fn listing_falls_back_to_link() {
        static LOOKUPS: &[Lookup] = &[Lookup::Text(".name"), Lookup::Href("a")];
        let site = example_site("s", LOOKUPS);
        let page = FixturePage::default().with_href(SCOPE, "a", "https://example.com/company/globex-corporation/");
        assert_eq!(
            site.extract("https://example.com/jobs/view/9", &page),
            Extraction::Found("Globex Corporation".into())
        );
    }

    #[test]
    fn blank_primary_element_stops_lookup() {
        static LOOKUPS: &[Lookup] = &[Lookup::Text(".name"), Lookup::Href("a")];
        let site = example_site("s", LOOKUPS);
        let page = FixturePage::default()
            .with_text(SCOPE, ".name", "")
            .with_href(SCOPE, "a", "https://example.com/company/globex-corporation/");
        assert_eq!(site.extract("https://example.com/jobs/view/9", &page), Extraction::NotFound);
    }

    #[test]
    fn non_url_page_value_is_literal() {
        static LOOKUPS: &[Lookup] = &[Lookup::Text(".name")];
        let site = example_site("s", LOOKUPS);
        let page = FixturePage::default().with_text(SCOPE, ".name", "Acme Corp");
        assert_eq!(
            site.extract("https://example.com/jobs/view/9", &page),
            Extraction::Found("Acme Corp".into())
        );
    }

    #[test]
    fn url_without_entity_segment_is_not_found() {
        static LOOKUPS: &[Lookup] = &[Lookup::Href("a")];
        let site = example_site("s", LOOKUPS);
        let page = FixturePage::default().with_href(SCOPE, "a", "https://example.com/about");
        assert_eq!(site.extract("https://example.com/jobs/view/9", &page), Extraction::NotFound);
    }

    #[test]
    fn listing_detection() {
        let site = example_site("s", &[]);
        assert!(site.is_listing("https://example.com/jobs/view/9"));
        assert!(!site.is_listing("https://example.com/company/acme"));
        assert!(!indeed::strategy().is_listing("https://www.indeed.com/jobs?q=rust"));
    }

    #[test]
    fn other_pages_on_site_are_not_found() {
        let site = example_site("s", &[]);
        assert_eq!(site.extract("https://example.com/feed/", &NoPage), Extraction::NotFound);
    }

    #[test]
    fn domain_match_is_case_sensitive() {
        let registry = SiteRegistry::default();
        assert!(registry.is_supported("https://www.linkedin.com/feed/"));
        assert!(!registry.is_supported("https://www.LinkedIn.com/feed/"));
    }

    #[test]
    fn default_registration_order() {
        let names: Vec<_> = SiteRegistry::default().sites().iter().map(|s| s.name).collect();
        assert_eq!(names, ["LinkedIn", "Indeed", "CharityJob"]);
    }
}
