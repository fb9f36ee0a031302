use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::BaseUrlResolver;

const MAX_REDIRECTS: usize = 10;

/// Only 301 and 302 lead further; any other status ends the chain
fn follows_redirect(status: StatusCode) -> bool {
    matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND)
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if follows_redirect(attempt.status()) {
            attempt.follow()
        } else {
            attempt.stop()
        }
    })
}

/// Expands shortened links by following 301/302 responses.
///
/// The URL of the last response is returned whatever its status; a page
/// without coordinates simply yields nothing to extract.
pub struct HttpUrlResolver {
    client: reqwest::Client,
}

impl HttpUrlResolver {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(redirect_policy())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl BaseUrlResolver for HttpUrlResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, short_url: &str) -> Result<String> {
        let response = self
            .client
            .get(short_url)
            .send()
            .await
            .with_context(|| format!("Failed to follow map link {}", short_url))?;

        let final_url = response.url().to_string();
        debug!(final_url = %final_url, status = %response.status(), "Resolved map link");
        Ok(final_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_permanent_and_found_are_followed() {
        assert!(follows_redirect(StatusCode::MOVED_PERMANENTLY));
        assert!(follows_redirect(StatusCode::FOUND));

        for status in [
            StatusCode::SEE_OTHER,
            StatusCode::TEMPORARY_REDIRECT,
            StatusCode::PERMANENT_REDIRECT,
            StatusCode::OK,
            StatusCode::NOT_FOUND,
        ] {
            assert!(!follows_redirect(status), "{} must not be followed", status);
        }
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpUrlResolver::new().is_ok());
    }
}
