mod checker;
mod companies;
mod matcher;
mod report;
mod settings;
mod sites;
mod watch;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use checker::Checker;
use matcher::tier::Badge;
use matcher::MatchTier;
use sites::page::NoPage;
use sites::{SiteRegistry, Support};

#[derive(Parser)]
#[command(name = "company_check", about = "Match the company behind a job page against a known list")]
struct Cli {
    /// Company list: file path or http(s) URL (overrides settings)
    #[arg(short, long, global = true)]
    companies: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the company from a page URL and match it
    Check {
        url: String,
        /// Saved HTML of the page, needed for job listings
        #[arg(short, long)]
        page: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        /// Show partial match scores
        #[arg(long)]
        scores: bool,
    },
    /// Match a company name directly
    Search {
        name: String,
        #[arg(long)]
        json: bool,
        /// Show partial match scores
        #[arg(long)]
        scores: bool,
    },
    /// Classify every line of a file (page URLs or company names) in parallel
    Batch {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Read navigation events (URL[<TAB>page.html]) from stdin and report each settled page
    Watch {
        #[arg(long)]
        json: bool,
    },
    /// List supported sites in dispatch order
    Sites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = settings::Settings::load()?;
    if let Some(source) = cli.companies {
        settings.companies = source;
    }

    match cli.command {
        Commands::Check { url, page, json, scores } => {
            let checker = load_checker(&settings).await;
            let outcome = watch::check_event(&checker, &watch::NavEvent { url, page });
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", report::render_outcome(&outcome, scores));
            }
        }
        Commands::Search { name, json, scores } => {
            let checker = load_checker(&settings).await;
            let result = checker.search(&name);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_result(&name, &result, scores));
            }
        }
        Commands::Batch { file, json } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let inputs: Vec<&str> = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect();
            if inputs.is_empty() {
                println!("Nothing to classify in {}.", file.display());
                return Ok(());
            }
            let checker = load_checker(&settings).await;
            let rows = classify_batch(&checker, &inputs)?;
            print_batch(&rows, json)?;
        }
        Commands::Watch { json } => {
            if json {
                let status = serde_json::json!({
                    "status": "loading",
                    "badge": Badge::LOADING,
                    "companies": settings.companies,
                });
                println!("{}", status);
            } else {
                print!("{}", report::render_loading(&settings.companies));
            }
            let checker = load_checker(&settings).await;
            let timing = watch::Timing {
                settle: settings.settle_delay(),
                listing_rechecks: settings.listing_rechecks(),
            };
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            watch::run(&checker, &timing, stdin, |outcome| {
                if json {
                    match serde_json::to_string(outcome) {
                        Ok(line) => println!("{}", line),
                        Err(e) => tracing::error!("Failed to serialize outcome: {}", e),
                    }
                } else {
                    print!("{}", report::render_outcome(outcome, false));
                }
            })
            .await?;
        }
        Commands::Sites => print_sites(&SiteRegistry::default()),
    }

    Ok(())
}

/// The reference list is loaded before any page is checked.
async fn load_checker(settings: &settings::Settings) -> Checker {
    info!("Loading companies from {}", settings.companies);
    let references = companies::load(&settings.companies).await;
    Checker::new(SiteRegistry::default()).with_references(references)
}

#[derive(Serialize)]
struct BatchRow {
    input: String,
    company: Option<String>,
    tier: Option<MatchTier>,
    best: Option<String>,
}

fn classify_batch(checker: &Checker, inputs: &[&str]) -> anyhow::Result<Vec<BatchRow>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let rows = inputs
        .par_iter()
        .map(|input| {
            let row = classify_one(checker, input);
            pb.inc(1);
            row
        })
        .collect();

    pb.finish_and_clear();
    Ok(rows)
}

fn classify_one(checker: &Checker, input: &str) -> BatchRow {
    let company = if input.starts_with("http://") || input.starts_with("https://") {
        if !checker.registry().is_supported(input) {
            warn!("No strategy for {}", input);
        }
        checker.registry().extract_company_name(input, &NoPage)
    } else {
        Some(input.to_string())
    };
    let result = company.as_deref().map(|c| checker.search(c));
    let best = result.as_ref().and_then(|r| {
        r.exact_matches
            .first()
            .or(r.near_exact_matches.first())
            .or(r.partial_matches.first())
            .cloned()
    });
    BatchRow {
        input: input.to_string(),
        tier: result.as_ref().map(|r| r.tier()),
        company,
        best,
    }
}

fn print_batch(rows: &[BatchRow], json: bool) -> anyhow::Result<()> {
    if json {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
        return Ok(());
    }

    println!("{:<10} | {:<28} | {:<28} | {}", "Tier", "Company", "Best match", "Input");
    println!("{}", "-".repeat(100));
    for r in rows {
        let tier = r.tier.map(|t| t.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "{:<10} | {:<28} | {:<28} | {}",
            tier,
            truncate(r.company.as_deref().unwrap_or("-"), 28),
            truncate(r.best.as_deref().unwrap_or("-"), 28),
            r.input
        );
    }

    let matched = rows
        .iter()
        .filter(|r| matches!(r.tier, Some(t) if t != MatchTier::None))
        .count();
    println!("\n{} of {} matched", matched, rows.len());
    Ok(())
}

fn print_sites(registry: &SiteRegistry) {
    for (i, site) in registry.sites().iter().enumerate() {
        let status = match &site.support {
            Support::Pages(rules) => format!(
                "company pages: *{}*, listings: {}*",
                rules.entity_marker, rules.listing_prefix
            ),
            Support::Unsupported => "extraction not implemented".to_string(),
        };
        println!("{}. {:<12} {:<18} {}", i + 1, site.name, site.domain, status);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::companies::ReferenceList;

    fn checker() -> Checker {
        Checker::new(SiteRegistry::default())
            .with_references(ReferenceList::from_text("Acme Corp\nAcme Corporation\nBeta Tech\n"))
    }

    #[test]
    fn batch_mixes_urls_and_names() {
        let inputs = [
            "https://www.linkedin.com/company/acme-corp/",
            "Beta Industries",
            "https://uk.indeed.com/viewjob?jk=1",
        ];
        let rows = classify_batch(&checker(), &inputs).unwrap();

        assert_eq!(rows[0].company.as_deref(), Some("Acme Corp"));
        assert_eq!(rows[0].tier, Some(MatchTier::Exact));
        assert_eq!(rows[0].best.as_deref(), Some("Acme Corp"));

        assert_eq!(rows[1].tier, Some(MatchTier::Partial));
        assert_eq!(rows[1].best.as_deref(), Some("Beta Tech"));

        assert!(rows[2].company.is_none());
        assert!(rows[2].tier.is_none());
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("Initrode", 28), "Initrode");
        assert_eq!(truncate("Initrode Global Services Holdings", 12), "Initrode ...");
    }
}
