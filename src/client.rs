use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{DigestError, Result};
use crate::request::StateFilter;
use crate::types::{
    CombinedStatus, OrgMembership, RateSnapshot, RawPullRequest, Repository, RepositoryTarget,
    StatusTarget, User,
};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("gh-digest/", env!("CARGO_PKG_VERSION"));
// Listings are single-page; this is the largest page GitHub serves.
const PER_PAGE: &str = "100";

/// Authenticated GitHub REST client. Cloning shares the connection pool.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
    base_url: Url,
}

impl GitHubClient {
    pub fn with_base_url(token: String, base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| DigestError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(DigestError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http: Client::new(),
            token,
            base_url,
        })
    }

    /// `GET /user`, returning the login and the rate limit headers.
    pub async fn authenticated_user(&self) -> Result<(User, Option<RateSnapshot>)> {
        let response = self.send(self.endpoint(&["user"], &[])).await?;
        let rate = rate_snapshot(&response);
        let user = Self::parse(response).await?;
        Ok((user, rate))
    }

    /// Logins of every organization the viewer is an active member of.
    pub async fn active_organization_logins(&self) -> Result<Vec<String>> {
        let url = self.endpoint(
            &["user", "memberships", "orgs"],
            &[("state", "active"), ("per_page", PER_PAGE)],
        );
        let memberships: Vec<OrgMembership> = self.get(url).await?;

        Ok(memberships
            .into_iter()
            .filter(|m| m.state.as_deref().map_or(true, |s| s == "active"))
            .filter_map(|m| m.organization.login)
            .collect())
    }

    pub async fn organization_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(
            &["orgs", org, "repos"],
            &[("type", "all"), ("per_page", PER_PAGE)],
        );
        self.get(url).await.map_err(|e| match e {
            DigestError::ApiError { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
                DigestError::OrganizationNotFound(org.to_string())
            }
            other => other,
        })
    }

    /// Repositories the viewer owns or collaborates on.
    pub async fn viewer_repositories(&self) -> Result<Vec<Repository>> {
        let url = self.endpoint(
            &["user", "repos"],
            &[("affiliation", "owner,collaborator"), ("per_page", PER_PAGE)],
        );
        self.get(url).await
    }

    pub async fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let url = self.endpoint(&["repos", owner, name], &[]);
        self.get(url).await.map_err(|e| match e {
            DigestError::ApiError { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
                DigestError::RepositoryNotFound {
                    owner: owner.to_string(),
                    name: name.to_string(),
                }
            }
            other => other,
        })
    }

    pub async fn pull_requests(
        &self,
        target: &RepositoryTarget,
        state: StateFilter,
    ) -> Result<Vec<RawPullRequest>> {
        let url = self.endpoint(
            &["repos", target.owner.as_str(), target.name.as_str(), "pulls"],
            &[("state", state.as_str()), ("per_page", PER_PAGE)],
        );
        self.get(url).await
    }

    pub async fn combined_status(&self, target: StatusTarget<'_>) -> Result<CombinedStatus> {
        let url = self.endpoint(
            &["repos", target.owner, target.repo, "commits", target.sha, "status"],
            &[],
        );
        self.get(url).await
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        // cannot-be-a-base URLs are rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn send(&self, url: Url) -> Result<Response> {
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(url).await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(DigestError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response.json().await?)
    }
}

fn rate_snapshot(response: &Response) -> Option<RateSnapshot> {
    let header = |name: &str| {
        response
            .headers()
            .get(name)?
            .to_str()
            .ok()?
            .trim()
            .parse::<u64>()
            .ok()
    };

    Some(RateSnapshot {
        limit: header("x-ratelimit-limit")?,
        remaining: header("x-ratelimit-remaining")?,
    })
}
