pub mod score;
pub mod tier;

use serde::Serialize;
use tracing::debug;

pub use score::word_match_score;
pub use tier::MatchTier;

/// Most near-exact hits that may still collapse into a single exact match.
const COLLAPSE_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub score: i32,
}

/// Tiered matches of one query. A reference entry lands in at most one tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub exact_matches: Vec<String>,
    pub near_exact_matches: Vec<String>,
    /// Names of `ranked_partial_matches`, best first.
    pub partial_matches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranked_partial_matches: Vec<ScoredCandidate>,
}

impl SearchResult {
    pub fn tier(&self) -> MatchTier {
        MatchTier::classify(self)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

/// Classify every reference entry against `query`.
///
/// Equal (case-insensitive, trimmed) entries are exact; entries starting with
/// the query are near-exact; the rest are kept as partial matches when their
/// word alignment score is positive. A blank query matches nothing.
pub fn search_company<S: AsRef<str>>(query: &str, references: &[S]) -> SearchResult {
    let needle = normalize(query);
    let mut result = SearchResult::default();
    if needle.is_empty() {
        return result;
    }

    let mut partials = Vec::new();
    for reference in references {
        let original = reference.as_ref();
        let candidate = normalize(original);

        if candidate == needle {
            result.exact_matches.push(original.to_string());
        } else if candidate.starts_with(&needle) {
            result.near_exact_matches.push(original.to_string());
        } else {
            let score = word_match_score(&needle, &candidate);
            if score > 0 {
                partials.push(ScoredCandidate {
                    name: original.to_string(),
                    score,
                });
            }
        }
    }

    // stable: equal scores keep reference order
    partials.sort_by(|a, b| b.score.cmp(&a.score));
    result.partial_matches = partials.iter().map(|p| p.name.clone()).collect();
    result.ranked_partial_matches = partials;

    collapse_duplicate_near_matches(&mut result);

    debug!(
        query = %needle,
        exact = result.exact_matches.len(),
        near_exact = result.near_exact_matches.len(),
        partial = result.partial_matches.len(),
        "Search finished"
    );
    result
}

/// A reference list holding the same name up to three times, with no exact
/// hit, counts as one exact match.
fn collapse_duplicate_near_matches(result: &mut SearchResult) {
    let near = &result.near_exact_matches;
    if !result.exact_matches.is_empty() || near.is_empty() || near.len() > COLLAPSE_LIMIT {
        return;
    }
    let first = normalize(&near[0]);
    if near.iter().all(|n| normalize(n) == first) {
        let promoted = result.near_exact_matches.swap_remove(0);
        result.near_exact_matches.clear();
        result.exact_matches.push(promoted);
    }
}
