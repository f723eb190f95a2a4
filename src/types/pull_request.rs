use serde::{Deserialize, Serialize};

use super::{Account, RelationshipClass};

/// Pull request as returned by `GET /repos/{owner}/{repo}/pulls`.
///
/// Every field besides the number may be absent in the payload, so accessors
/// return `Option` and callers decide on the fallback.
#[derive(Deserialize, Debug, Clone)]
pub struct RawPullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub user: Option<Account>,
    #[serde(default)]
    pub assignee: Option<Account>,
    #[serde(default)]
    pub requested_reviewers: Option<Vec<Account>>,
    #[serde(default)]
    pub mergeable: Option<bool>,
    #[serde(default)]
    pub base: Option<GitRef>,
    #[serde(default)]
    pub head: Option<GitRef>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GitRef {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub repo: Option<RefRepository>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RefRepository {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<Account>,
}

/// Coordinates of the combined status lookup for a pull request head commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTarget<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub sha: &'a str,
}

impl RawPullRequest {
    pub fn author_login(&self) -> Option<&str> {
        self.user.as_ref().and_then(Account::login)
    }

    pub fn assignee_login(&self) -> Option<&str> {
        self.assignee.as_ref().and_then(Account::login)
    }

    pub fn reviewer_logins(&self) -> impl Iterator<Item = &str> {
        self.requested_reviewers
            .iter()
            .flatten()
            .filter_map(Account::login)
    }

    /// Base repository owner/name and head SHA, when all three are present.
    pub fn status_target(&self) -> Option<StatusTarget<'_>> {
        let base_repo = self.base.as_ref()?.repo.as_ref()?;
        Some(StatusTarget {
            owner: base_repo.owner.as_ref()?.login()?,
            repo: base_repo.name.as_deref()?,
            sha: self.head.as_ref()?.sha.as_deref()?,
        })
    }
}

/// Report-ready pull request, one per row.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DetailedPullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub state: String,
    pub author: String,
    pub mergeable: bool,
    pub ci_cd_status: String,
    pub condition: RelationshipClass,
}
