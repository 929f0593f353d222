use std::ops::Deref;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Known company names, loaded once per session and shared read-only.
/// Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct ReferenceList {
    names: Arc<[String]>,
}

impl ReferenceList {
    /// One name per line; blank and whitespace-only lines are dropped.
    pub fn from_text(text: &str) -> Self {
        let names: Vec<String> = text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        Self { names: names.into() }
    }
}

impl Deref for ReferenceList {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.names
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load the reference list from a file path or an http(s) URL.
///
/// Never fails: any load error is logged and yields an empty list, so every
/// later search simply finds nothing.
pub async fn load(source: &str) -> ReferenceList {
    match try_load(source).await {
        Ok(list) => {
            info!("Loaded {} companies from {}", list.len(), source);
            list
        }
        Err(e) => {
            error!("Error loading companies: {}", e);
            ReferenceList::default()
        }
    }
}

async fn try_load(source: &str) -> Result<ReferenceList, LoadError> {
    let text = if is_remote(source) {
        let http = |e| LoadError::Http {
            url: source.to_string(),
            source: e,
        };
        let response = reqwest::get(source).await.map_err(http)?;
        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: source.to_string(),
                status: response.status(),
            });
        }
        response.text().await.map_err(http)?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| LoadError::Io {
                path: source.to_string(),
                source: e,
            })?
    };
    Ok(ReferenceList::from_text(&text))
}
