use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::client::GitHubClient;
use crate::error::{DigestError, Result};
use crate::request::StateFilter;
use crate::types::{RawPullRequest, RepositoryTarget};

/// Upper bound on listing requests in flight at once.
pub const MAX_CONCURRENT_LISTINGS: usize = 8;

/// List pull requests of every target concurrently, one task per repository.
///
/// At most [`MAX_CONCURRENT_LISTINGS`] requests are in flight at once. Every
/// task runs to completion before the result is decided. If any listing
/// failed the whole call fails, naming each failed repository. On success the
/// pull requests come back in target order, then in listing order.
pub async fn list_pull_requests(
    client: &GitHubClient,
    targets: &[RepositoryTarget],
    state: StateFilter,
) -> Result<Vec<RawPullRequest>> {
    list_with_limit(client, targets, state, MAX_CONCURRENT_LISTINGS).await
}

async fn list_with_limit(
    client: &GitHubClient,
    targets: &[RepositoryTarget],
    state: StateFilter,
    limit: usize,
) -> Result<Vec<RawPullRequest>> {
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let mut tasks = JoinSet::new();
    for (index, target) in targets.iter().cloned().enumerate() {
        let client = client.clone();
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let _permit = permits.acquire_owned().await;
            let result = client.pull_requests(&target, state).await;
            (index, target, result)
        });
    }

    let mut listed: Vec<(usize, Vec<RawPullRequest>)> = Vec::with_capacity(targets.len());
    let mut failures = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, target, Ok(pull_requests))) => {
                tracing::debug!(
                    repository = %target,
                    count = pull_requests.len(),
                    "listed pull requests"
                );
                listed.push((index, pull_requests));
            }
            Ok((_, target, Err(e))) => {
                tracing::warn!(repository = %target, "Error fetching pull requests: {e}");
                failures.push(format!("{target}: {e}"));
            }
            Err(e) => {
                tracing::warn!("listing task failed: {e}");
                failures.push(format!("listing task failed: {e}"));
            }
        }
    }

    if !failures.is_empty() {
        failures.sort();
        return Err(DigestError::RepositoryFetch { failures });
    }

    listed.sort_by_key(|(index, _)| *index);
    Ok(listed.into_iter().flat_map(|(_, prs)| prs).collect())
}
