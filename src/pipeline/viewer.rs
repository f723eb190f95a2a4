use crate::client::GitHubClient;
use crate::config::RateConfig;
use crate::error::{DigestError, Result};
use crate::types::{RateSnapshot, Viewer};

/// Resolve the token owner and stop the run early if the remaining quota is
/// under the configured threshold.
pub async fn resolve_viewer(client: &GitHubClient, rate: RateConfig) -> Result<Viewer> {
    let (user, snapshot) = client.authenticated_user().await?;
    check_quota(snapshot, rate)?;

    Ok(Viewer {
        login: user.login,
        rate: snapshot,
    })
}

pub fn check_quota(snapshot: Option<RateSnapshot>, rate: RateConfig) -> Result<()> {
    let Some(snapshot) = snapshot else {
        tracing::warn!("GitHub did not report rate limit headers, skipping quota check");
        return Ok(());
    };

    tracing::info!(
        remaining = snapshot.remaining,
        limit = snapshot.limit,
        "Rate remaining: {}",
        snapshot.remaining
    );

    let threshold = rate.threshold(snapshot.limit);
    if snapshot.remaining < threshold {
        return Err(DigestError::QuotaExceeded {
            remaining: snapshot.remaining,
            limit: snapshot.limit,
            threshold,
        });
    }

    Ok(())
}
