//! Retrieval of the raw question-bank text.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};

/// Where the question bank text lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Path(PathBuf),
    Url(String),
}

impl FromStr for SourceLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// The source text could not be retrieved.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

/// Read the whole source text. A single attempt is made; failures are not retried.
pub async fn fetch(location: &SourceLocation) -> Result<String, SourceError> {
    let text = match location {
        SourceLocation::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SourceError::Read {
                    path: path.clone(),
                    source,
                })?
        }
        SourceLocation::Url(url) => fetch_url(url).await?,
    };

    info!(source = %location, bytes = text.len(), "question source loaded");
    Ok(text)
}

async fn fetch_url(url: &str) -> Result<String, SourceError> {
    let request_error = |source| SourceError::Request {
        url: url.to_string(),
        source,
    };

    debug!(url, "requesting question source");
    let response = reqwest::get(url).await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(request_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_str() {
        assert_eq!(
            "questions.txt".parse::<SourceLocation>().unwrap(),
            SourceLocation::Path(PathBuf::from("questions.txt"))
        );
        assert_eq!(
            "HTTPS://example.org/de_thi/questions.txt"
                .parse::<SourceLocation>()
                .unwrap(),
            SourceLocation::Url("HTTPS://example.org/de_thi/questions.txt".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let location = SourceLocation::Path(PathBuf::from("definitely/not/here.txt"));
        let err = fetch(&location).await.unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("definitely/not/here.txt"));
    }
}
