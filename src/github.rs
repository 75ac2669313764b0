use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const API_BASE: &str = "https://api.github.com";

/// Repository descriptor as returned by the "list user repositories" endpoint.
/// Only the fields the pipeline consumes are deserialized.
#[derive(Deserialize, Debug, Clone)]
pub struct Repo {
    pub name: String,
    pub languages_url: String,
}

#[derive(Clone)]
pub struct GithubClient {
    token: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    pub fn new(token: String) -> Self {
        Self {
            token: Arc::new(token),
            http: Arc::new(Client::new()),
        }
    }

    /// Low-level GET with basic retry/backoff. Deserializes into `T`; a
    /// response that does not match `T`'s shape (e.g. an error object where
    /// an array was expected) is a hard error, not a silent empty result.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        // Simple retry/backoff policy
        const MAX_RETRIES: usize = 4;
        let mut attempt = 0usize;

        loop {
            attempt += 1;

            let req = self
                .http
                .get(url)
                .bearer_auth(&*self.token)
                .header("User-Agent", "toplangs")
                .header("Accept", "application/vnd.github+json");

            let resp = req
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("Network error requesting {what}: {e}"))?;

            let status = resp.status();
            let headers = resp.headers().clone();

            // Parse JSON (even for non-2xx to capture error payloads)
            let json: Value = resp
                .json()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to parse JSON for {what}: {e}"))?;

            if status.is_success() {
                return serde_json::from_value(json)
                    .with_context(|| format!("Unexpected response shape for {what}"));
            }

            // If rate limited, honor Retry-After header when present
            if status.as_u16() == 429 {
                if attempt >= MAX_RETRIES {
                    return Err(anyhow::anyhow!(
                        "GitHub API returned 429 (rate-limited) for {what} and retries exhausted"
                    ));
                }
                let wait_secs = headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(2);
                sleep(Duration::from_secs(wait_secs)).await;
                continue;
            }

            // Retry on 5xx server errors
            if status.is_server_error() && attempt < MAX_RETRIES {
                let backoff = Duration::from_millis(250u64.saturating_mul(1 << (attempt - 1)));
                sleep(backoff).await;
                continue;
            }

            return Err(anyhow::anyhow!(
                "GitHub API returned HTTP {} for {what}: {json:#}",
                status.as_u16()
            ));
        }
    }

    /// List repositories owned by `username` (first page of 100, matching the
    /// original behavior; pagination is out of scope).
    pub async fn list_repos(&self, username: &str) -> Result<Vec<Repo>> {
        let url = format!("{API_BASE}/users/{username}/repos?per_page=100");
        self.get_json(&url, &format!("repository list for {username}"))
            .await
    }

    /// Fetch the language -> byte-count breakdown for one repository.
    pub async fn repo_languages(&self, repo: &Repo) -> Result<HashMap<String, u64>> {
        self.get_json(
            &repo.languages_url,
            &format!("language breakdown for {}", repo.name),
        )
        .await
    }
}
