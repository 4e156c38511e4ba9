// Release API client
// Fetches release metadata from the repository-scoped releases-by-tag
// endpoint ({base}/tags/{tag}).

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{GithubRelease, ReleaseInfo};

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("no release found for tag {0}")]
    NotFound(String),

    #[error("release request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("release endpoint returned status {0}")]
    Status(StatusCode),

    #[error("release response parse error: {0}")]
    Parse(String),
}

pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Fetch one release by tag name
pub async fn fetch_by_tag(client: &Client, base_url: &str, tag: &str) -> ReleaseResult<ReleaseInfo> {
    let url = format!("{}/tags/{}", base_url.trim_end_matches('/'), tag);

    let response = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, "mcphub")
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(ReleaseError::NotFound(tag.to_string()));
    }
    if !response.status().is_success() {
        return Err(ReleaseError::Status(response.status()));
    }

    let payload: GithubRelease = response
        .json()
        .await
        .map_err(|e| ReleaseError::Parse(e.to_string()))?;

    Ok(ReleaseInfo::from(payload))
}
