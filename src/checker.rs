use serde::Serialize;
use tracing::{debug, info};

use crate::companies::ReferenceList;
use crate::matcher::tier::Badge;
use crate::matcher::{search_company, MatchTier, SearchResult};
use crate::sites::page::PageAccessor;
use crate::sites::{Extraction, SiteRegistry};

/// What a single page check found.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub url: String,
    pub site: Option<&'static str>,
    pub company: Option<String>,
    pub tier: Option<MatchTier>,
    pub result: Option<SearchResult>,
}

impl CheckOutcome {
    /// Pages without a company get a blank badge, not a red one.
    pub fn badge(&self) -> Badge {
        self.tier.map_or(Badge::CLEARED, MatchTier::badge)
    }
}

/// Extraction plus matching for one session. Until a reference list is
/// attached every company classifies as `MatchTier::None`.
pub struct Checker {
    registry: SiteRegistry,
    references: ReferenceList,
}

impl Checker {
    pub fn new(registry: SiteRegistry) -> Self {
        Self {
            registry,
            references: ReferenceList::default(),
        }
    }

    pub fn with_references(mut self, references: ReferenceList) -> Self {
        self.references = references;
        self
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn search(&self, name: &str) -> SearchResult {
        search_company(name, &*self.references)
    }

    pub fn check(&self, url: &str, page: &dyn PageAccessor) -> CheckOutcome {
        let mut outcome = CheckOutcome {
            url: url.to_string(),
            site: None,
            company: None,
            tier: None,
            result: None,
        };

        let Some((site, extraction)) = self.registry.extract(url, page) else {
            debug!(url, "No strategy for this site");
            return outcome;
        };
        outcome.site = Some(site.name);

        let company = match extraction {
            Extraction::Found(name) => name,
            Extraction::NotFound | Extraction::Unsupported => {
                debug!(url, site = site.name, "No company found");
                return outcome;
            }
        };

        let result = self.search(&company);
        let tier = result.tier();
        info!(company = %company, %tier, "Checked page");

        outcome.company = Some(company);
        outcome.tier = Some(tier);
        outcome.result = Some(result);
        outcome
    }
}
