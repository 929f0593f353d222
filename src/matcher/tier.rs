use std::fmt;

use serde::Serialize;

use super::SearchResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchTier {
    Exact,
    NearExact,
    Partial,
    None,
}

impl MatchTier {
    /// Best non-empty tier wins: exact, then near-exact, then partial.
    pub fn classify(result: &SearchResult) -> Self {
        if !result.exact_matches.is_empty() {
            MatchTier::Exact
        } else if !result.near_exact_matches.is_empty() {
            MatchTier::NearExact
        } else if !result.partial_matches.is_empty() {
            MatchTier::Partial
        } else {
            MatchTier::None
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            MatchTier::Exact => Badge::new("#28a745", "✓"),
            MatchTier::NearExact => Badge::new("#007bff", "≈"),
            MatchTier::Partial => Badge::new("#ffc107", "⚠"),
            MatchTier::None => Badge::new("#dc3545", "✗"),
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchTier::Exact => "exact",
            MatchTier::NearExact => "near-exact",
            MatchTier::Partial => "partial",
            MatchTier::None => "none",
        };
        f.write_str(s)
    }
}

/// Toolbar badge: background color and a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub color: &'static str,
    pub text: &'static str,
}

impl Badge {
    const fn new(color: &'static str, text: &'static str) -> Self {
        Self { color, text }
    }

    /// Shown while the reference list is still loading.
    pub const LOADING: Badge = Badge::new("#0073b1", "⏳");

    /// No company on the page; the badge is blanked rather than shown red.
    pub const CLEARED: Badge = Badge::new("", "");

    pub fn is_cleared(&self) -> bool {
        self.text.is_empty()
    }
}
