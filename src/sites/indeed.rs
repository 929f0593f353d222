use super::{SiteStrategy, Support};

/// Indeed job URLs carry no company slug and the page layout isn't mapped yet,
/// so every Indeed page reports `Extraction::Unsupported`.
pub fn strategy() -> SiteStrategy {
    SiteStrategy {
        name: "Indeed",
        domain: "indeed.com",
        support: Support::Unsupported,
    }
}
