//! GitHub API client.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::auth::Auth;
use crate::error::{Error, Result};
use crate::traits::ForgeApi;
use crate::types::{PullRequest, PullRequestCommit};

/// Listings request the maximum page size; anything that still spills
/// over is rejected rather than silently truncated.
const PER_PAGE: u32 = 100;

/// GitHub API client.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    /// Token stored as `SecretString` for automatic zeroization on drop.
    token: Option<SecretString>,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn new(auth: &Auth) -> Result<Self> {
        Self::with_base_url(auth, Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub
    /// Enterprise or a test server).
    ///
    /// # Errors
    /// Returns error if authentication fails.
    pub fn with_base_url(auth: &Auth, base_url: impl Into<String>) -> Result<Self> {
        let token = auth.resolve()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("porter-cli"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }

    /// Make a GET request, returning the parsed body and whether the
    /// response advertised a further page.
    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<(T, bool)> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }
        let response = request.send()?;

        let status = response.status();
        if status.is_success() {
            let paginated = has_next_page(response.headers().get(LINK));
            let body = response.json()?;
            return Ok((body, paginated));
        }

        let status_code = status.as_u16();
        match status_code {
            401 => Err(Error::AuthenticationFailed),
            403 if response
                .headers()
                .get("x-ratelimit-remaining")
                .is_some_and(|v| v == "0") =>
            {
                Err(Error::RateLimited)
            }
            _ => {
                let text = response.text().unwrap_or_default();
                Err(Error::ApiError {
                    status: status_code,
                    message: text,
                })
            }
        }
    }
}

impl ForgeApi for GitHubClient {
    fn get_pr(&self, org: &str, repo: &str, number: u64) -> Result<PullRequest> {
        let path = format!("/repos/{org}/{repo}/pulls/{number}");
        match self.get::<PullRequest>(&path) {
            Ok((pr, _)) => Ok(pr),
            Err(Error::ApiError { status: 404, .. }) => Err(Error::PrNotFound(number)),
            Err(e) => Err(e),
        }
    }

    fn list_pr_commits(
        &self,
        org: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<PullRequestCommit>> {
        let path = format!("/repos/{org}/{repo}/pulls/{number}/commits?per_page={PER_PAGE}");
        let (commits, paginated) = match self.get::<Vec<PullRequestCommit>>(&path) {
            Ok(result) => result,
            Err(Error::ApiError { status: 404, .. }) => return Err(Error::PrNotFound(number)),
            Err(e) => return Err(e),
        };

        if paginated {
            return Err(Error::Paginated {
                what: format!("commit list of PR #{number}"),
            });
        }
        Ok(commits)
    }
}

/// Whether a `Link` header advertises a `rel="next"` page.
fn has_next_page(link: Option<&HeaderValue>) -> bool {
    link.and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .any(|part| part.contains("rel=\"next\""))
        })
}
