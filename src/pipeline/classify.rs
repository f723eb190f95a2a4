use crate::client::GitHubClient;
use crate::error::Result;
use crate::types::{DetailedPullRequest, RawPullRequest, RelationshipClass, Viewer};

pub const NOT_AVAILABLE: &str = "N/A";

/// Determine the viewer's relationship to a pull request.
///
/// Checks run in the order author, assignee, requested reviewer and each match
/// overwrites the previous one, so the last match wins: a viewer who authored
/// the pull request and is also a requested reviewer is classified as
/// `Reviewer`.
pub fn classify(pr: &RawPullRequest, viewer_login: &str) -> Option<RelationshipClass> {
    let mut condition = None;

    if pr.author_login() == Some(viewer_login) {
        condition = Some(RelationshipClass::Author);
    }
    if pr.assignee_login() == Some(viewer_login) {
        condition = Some(RelationshipClass::Assignee);
    }
    if pr.reviewer_logins().any(|login| login == viewer_login) {
        condition = Some(RelationshipClass::Reviewer);
    }

    condition
}

/// Classify each pull request in order, drop the unrelated ones and attach the
/// combined CI/CD status of the head commit to the rest.
///
/// Status lookups run one at a time. A pull request without a head SHA or a
/// base repository owner/name gets `N/A` without a remote call; any failed
/// lookup fails the whole run.
pub async fn enrich(
    client: &GitHubClient,
    pull_requests: Vec<RawPullRequest>,
    viewer: &Viewer,
) -> Result<Vec<DetailedPullRequest>> {
    let mut detailed = Vec::new();

    for pr in pull_requests {
        let Some(condition) = classify(&pr, &viewer.login) else {
            continue;
        };

        let ci_cd_status = match pr.status_target() {
            Some(target) => client
                .combined_status(target)
                .await?
                .state
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            None => {
                tracing::debug!(
                    number = pr.number,
                    "pull request lacks head SHA or base repository, skipping CI/CD status"
                );
                NOT_AVAILABLE.to_string()
            }
        };

        detailed.push(detail(pr, condition, ci_cd_status));
    }

    Ok(detailed)
}

fn detail(
    pr: RawPullRequest,
    condition: RelationshipClass,
    ci_cd_status: String,
) -> DetailedPullRequest {
    let author = pr.author_login().unwrap_or(NOT_AVAILABLE).to_string();
    let or_placeholder = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    DetailedPullRequest {
        number: pr.number,
        title: or_placeholder(pr.title),
        url: or_placeholder(pr.html_url),
        state: or_placeholder(pr.state),
        author,
        mergeable: pr.mergeable.unwrap_or(false),
        ci_cd_status,
        condition,
    }
}
