use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::checker::{CheckOutcome, Checker};
use crate::matcher::MatchTier;
use crate::sites::page::{HtmlPage, NoPage};

/// A navigation: the new URL and, optionally, a saved copy of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEvent {
    pub url: String,
    pub page: Option<PathBuf>,
}

/// `URL` or `URL<TAB>page.html`; blank lines are skipped.
pub fn parse_event(line: &str) -> Option<NavEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let mut parts = line.splitn(2, '\t');
    let url = parts.next()?.trim().to_string();
    let page = parts
        .next()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from);
    Some(NavEvent { url, page })
}

#[derive(Debug, Clone)]
pub struct Timing {
    pub settle: Duration,
    pub listing_rechecks: Vec<Duration>,
}

struct Pending {
    event: NavEvent,
    due: VecDeque<Instant>,
    last: Option<(Option<String>, Option<MatchTier>)>,
}

/// Check one navigation. The page file is re-read every time since a
/// listing may still be rendering.
pub fn check_event(checker: &Checker, event: &NavEvent) -> CheckOutcome {
    match &event.page {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(html) => checker.check(&event.url, &HtmlPage::parse(&html, &event.url)),
            Err(e) => {
                warn!("Failed to read page {}: {}", path.display(), e);
                checker.check(&event.url, &NoPage)
            }
        },
        None => checker.check(&event.url, &NoPage),
    }
}

/// Debounce navigation events from `input` and report each settled page.
///
/// An event replaces any check still waiting to run; a repeat of the current
/// URL is ignored. Listing pages get the extra re-checks from `timing`, and a
/// re-check is only reported when the company or tier changed.
pub async fn run<R, F>(checker: &Checker, timing: &Timing, mut input: R, mut emit: F) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(&CheckOutcome),
{
    let mut buf = Vec::new();
    let mut current_url: Option<String> = None;
    let mut pending: Option<Pending> = None;
    let mut input_open = true;

    loop {
        let next_due = pending.as_ref().and_then(|p| p.due.front().copied());
        if !input_open && next_due.is_none() {
            break;
        }

        tokio::select! {
            read = input.read_until(b'\n', &mut buf), if input_open => {
                let eof = match read {
                    Ok(n) => n == 0,
                    Err(e) => {
                        warn!("Failed to read navigation events: {}", e);
                        true
                    }
                };
                if eof {
                    input_open = false;
                }
                // partial reads from a cancelled poll stay in `buf` until the newline arrives
                let line = match String::from_utf8(std::mem::take(&mut buf)) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("Skipping navigation event that is not UTF-8: {}", e);
                        continue;
                    }
                };
                let Some(event) = parse_event(&line) else { continue };
                if current_url.as_deref() == Some(event.url.as_str()) {
                    debug!(url = %event.url, "Same URL, ignoring");
                    continue;
                }
                current_url = Some(event.url.clone());
                pending = Some(schedule(checker, timing, event));
            }
            _ = sleep_until(next_due.unwrap_or_else(Instant::now)), if next_due.is_some() => {
                let Some(p) = pending.as_mut() else { continue };
                p.due.pop_front();
                let outcome = check_event(checker, &p.event);
                let key = (outcome.company.clone(), outcome.tier);
                if p.last.as_ref() != Some(&key) {
                    emit(&outcome);
                    p.last = Some(key);
                }
                if p.due.is_empty() {
                    pending = None;
                }
            }
        }
    }
    Ok(())
}

fn schedule(checker: &Checker, timing: &Timing, event: NavEvent) -> Pending {
    let now = Instant::now();
    let mut due = VecDeque::from([now + timing.settle]);
    let listing = checker
        .registry()
        .strategy_for(&event.url)
        .is_some_and(|s| s.is_listing(&event.url));
    if listing {
        let mut later: Vec<Duration> = timing
            .listing_rechecks
            .iter()
            .copied()
            .filter(|d| *d > timing.settle)
            .collect();
        later.sort();
        due.extend(later.into_iter().map(|d| now + d));
    }
    Pending {
        event,
        due,
        last: None,
    }
}
