use super::{Lookup, PageRules, SiteStrategy, Support};

static LOOKUPS: &[Lookup] = &[
    Lookup::Href(r#"a[href*="/organisation/"]"#),
    Lookup::Text(".organisation"),
];

pub fn strategy() -> SiteStrategy {
    SiteStrategy {
        name: "CharityJob",
        domain: "charityjob.co.uk",
        support: Support::Pages(PageRules {
            entity_marker: "charityjob.co.uk/organisation/",
            entity_segment: "organisation",
            listing_prefix: "https://www.charityjob.co.uk/jobs/",
            scope: ".job-title-wrapper",
            lookups: LOOKUPS,
        }),
    }
}
