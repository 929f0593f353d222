use crate::checker::CheckOutcome;
use crate::matcher::tier::Badge;
use crate::matcher::{MatchTier, SearchResult};

/// Plain-text summary of a search, laid out like the extension popup.
pub fn render_result(company: &str, result: &SearchResult, with_scores: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Company:     {}\n", company));

    let (headline, label, best) = match result.tier() {
        MatchTier::Exact => ("✓ Exact Match Found!", "Match:", result.exact_matches.first()),
        MatchTier::NearExact => ("≈ Near Match Found", "Best Match:", result.near_exact_matches.first()),
        MatchTier::Partial => ("⚠ Partial Matches Found", "Best Guess:", result.partial_matches.first()),
        MatchTier::None => ("❌ No Matches Found", "Status:", None),
    };
    out.push_str(&format!("{}\n", headline));
    out.push_str(&format!(
        "{:<12} {}\n",
        label,
        best.map(String::as_str).unwrap_or("No matches found")
    ));

    let listed = match result.tier() {
        MatchTier::NearExact => result.near_exact_matches.len() + result.partial_matches.len(),
        MatchTier::Partial => result.partial_matches.len(),
        MatchTier::Exact | MatchTier::None => 0,
    };
    if listed > 1 {
        if result.tier() == MatchTier::NearExact {
            out.push_str(&format!(
                "\nAll {} matches ({} near exact, {} partial):\n",
                listed,
                result.near_exact_matches.len(),
                result.partial_matches.len()
            ));
            for name in &result.near_exact_matches {
                out.push_str(&format!("  - {} (near exact)\n", name));
            }
        } else {
            out.push_str(&format!("\nAll {} partial matches:\n", listed));
        }
        for p in &result.ranked_partial_matches {
            if with_scores {
                out.push_str(&format!("  - {} (score: {})\n", p.name, p.score));
            } else {
                out.push_str(&format!("  - {}\n", p.name));
            }
        }
    }
    out
}

/// One-line status of a page check, followed by the full report when a
/// company was found.
pub fn render_outcome(outcome: &CheckOutcome, with_scores: bool) -> String {
    let badge = outcome.badge();
    let mut out = String::new();
    let site = outcome.site.unwrap_or("unsupported site");
    match (&outcome.company, &outcome.result) {
        (Some(company), Some(result)) if !badge.is_cleared() => {
            out.push_str(&format!("[{}] {} ({}) {}\n", badge.text, result.tier(), site, outcome.url));
            out.push_str(&render_result(company, result, with_scores));
        }
        _ => {
            out.push_str(&format!("[ ] no company found ({}) {}\n", site, outcome.url));
        }
    }
    out
}

/// Status shown by `watch` until the reference list is in.
pub fn render_loading(source: &str) -> String {
    format!("[{}] loading companies from {}\n", Badge::LOADING.text, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::search_company;

    #[test]
    fn exact_report_has_no_list() {
        let r = search_company("Acme Corp", &["Acme Corp", "Acme Corporation"]);
        let text = render_result("Acme Corp", &r, false);
        assert!(text.contains("✓ Exact Match Found!"));
        assert!(text.contains("Match:       Acme Corp"));
        assert!(!text.contains("All "));
    }

    #[test]
    fn near_exact_lists_near_then_partial() {
        let r = search_company("Acme Corp", &["Acme Corp Inc", "Acme Corp Ltd", "Acme Tools"]);
        let text = render_result("Acme Corp", &r, false);
        assert!(text.contains("≈ Near Match Found"));
        assert!(text.contains("Best Match:  Acme Corp Inc"));
        assert!(text.contains("All 3 matches (2 near exact, 1 partial):"));
        let second = text.find("Acme Corp Ltd (near exact)").unwrap();
        assert!(second > text.find("Acme Corp Inc (near exact)").unwrap());
        assert!(text.find("  - Acme Tools\n").unwrap() > second);
    }

    #[test]
    fn partial_scores_optional() {
        let r = search_company("Beta Widgets", &["Beta Tech", "Beta Tools"]);
        let plain = render_result("Beta Widgets", &r, false);
        assert!(plain.contains("⚠ Partial Matches Found"));
        assert!(plain.contains("Best Guess:  Beta Tech"));
        assert!(plain.contains("  - Beta Tools\n"));
        let scored = render_result("Beta Widgets", &r, true);
        assert!(scored.contains("  - Beta Tech (score: 30)"));
    }

    #[test]
    fn outcome_without_company() {
        let outcome = CheckOutcome {
            url: "https://www.linkedin.com/feed/".into(),
            site: Some("LinkedIn"),
            company: None,
            tier: None,
            result: None,
        };
        assert_eq!(
            render_outcome(&outcome, false),
            "[ ] no company found (LinkedIn) https://www.linkedin.com/feed/\n"
        );
    }

    #[test]
    fn outcome_with_company() {
        let result = search_company("Acme Corp", &["Acme Corp"]);
        let outcome = CheckOutcome {
            url: "https://www.linkedin.com/company/acme-corp/".into(),
            site: Some("LinkedIn"),
            company: Some("Acme Corp".into()),
            tier: Some(result.tier()),
            result: Some(result),
        };
        let text = render_outcome(&outcome, false);
        assert!(text.starts_with("[✓] exact (LinkedIn) https://www.linkedin.com/company/acme-corp/\n"));
        assert!(text.contains("Company:     Acme Corp"));
    }

    #[test]
    fn loading_status_uses_hourglass() {
        assert_eq!(
            render_loading("https://example.com/companies.txt"),
            "[⏳] loading companies from https://example.com/companies.txt\n"
        );
    }

    #[test]
    fn no_match() {
        let r = search_company("Hooli", &["Acme"]);
        let text = render_result("Hooli", &r, false);
        assert!(text.contains("❌ No Matches Found"));
        assert!(text.contains("Status:      No matches found"));
    }
}
