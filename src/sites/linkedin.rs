use super::{Lookup, PageRules, SiteStrategy, Support};

const JOB_DETAILS: &str = ".job-view-layout.jobs-details";

static LOOKUPS: &[Lookup] = &[
    Lookup::Text(".job-details-jobs-unified-top-card__company-name"),
    Lookup::Href(r#"a[href*="linkedin.com/company"]"#),
];

pub fn strategy() -> SiteStrategy {
    SiteStrategy {
        name: "LinkedIn",
        domain: "linkedin.com",
        support: Support::Pages(PageRules {
            entity_marker: "linkedin.com/company/",
            entity_segment: "company",
            listing_prefix: "https://www.linkedin.com/jobs/",
            scope: JOB_DETAILS,
            lookups: LOOKUPS,
        }),
    }
}
