use crate::client::GitHubClient;
use crate::error::Result;
use crate::request::{OrganizationScope, RepositoryScope, RequestDescriptor};
use crate::types::{RepositoryTarget, Viewer};

/// Repository names sharing one owner login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGroup {
    pub owner: String,
    pub repositories: Vec<String>,
}

impl TargetGroup {
    pub fn targets(&self) -> impl Iterator<Item = RepositoryTarget> + '_ {
        self.repositories
            .iter()
            .map(|name| RepositoryTarget::new(self.owner.as_str(), name.as_str()))
    }
}

/// Expand the descriptor into concrete owner groups: organization groups
/// first, then the viewer's own group.
///
/// The personal group only holds repositories the viewer owns. A repository
/// reachable through both an organization and the viewer's own listing appears
/// once per group; nothing is de-duplicated.
pub async fn resolve_scope(
    client: &GitHubClient,
    descriptor: &RequestDescriptor,
    viewer: &Viewer,
) -> Result<Vec<TargetGroup>> {
    let mut groups = organization_groups(client, &descriptor.organization).await?;

    let personal = personal_repositories(client, &descriptor.repository, viewer).await?;
    if !personal.is_empty() {
        groups.push(TargetGroup {
            owner: viewer.login.clone(),
            repositories: personal,
        });
    }

    tracing::debug!(
        groups = groups.len(),
        repositories = groups.iter().map(|g| g.repositories.len()).sum::<usize>(),
        "resolved repository scope"
    );

    Ok(groups)
}

/// Flatten groups in iteration order.
pub fn flatten(groups: &[TargetGroup]) -> Vec<RepositoryTarget> {
    groups.iter().flat_map(TargetGroup::targets).collect()
}

async fn organization_groups(
    client: &GitHubClient,
    scope: &OrganizationScope,
) -> Result<Vec<TargetGroup>> {
    let logins = match scope {
        OrganizationScope::None => return Ok(Vec::new()),
        OrganizationScope::All => client.active_organization_logins().await?,
        OrganizationScope::Single(name) => vec![name.clone()],
    };

    if logins.is_empty() {
        tracing::info!("viewer is not an active member of any organization");
    }

    let mut groups = Vec::with_capacity(logins.len());
    for login in logins {
        let repositories = client
            .organization_repositories(&login)
            .await?
            .into_iter()
            .map(|repo| repo.name)
            .collect();
        groups.push(TargetGroup {
            owner: login,
            repositories,
        });
    }

    Ok(groups)
}

async fn personal_repositories(
    client: &GitHubClient,
    scope: &RepositoryScope,
    viewer: &Viewer,
) -> Result<Vec<String>> {
    match scope {
        RepositoryScope::Single(name) => {
            let repo = client.repository(&viewer.login, name).await?;
            Ok(vec![repo.name])
        }
        RepositoryScope::All => {
            let (owned, foreign): (Vec<_>, Vec<_>) = client
                .viewer_repositories()
                .await?
                .into_iter()
                .partition(|repo| repo.is_owned_by(&viewer.login));
            if !foreign.is_empty() {
                tracing::debug!(
                    skipped = foreign.len(),
                    "skipping collaborator repositories owned by other accounts"
                );
            }
            Ok(owned.into_iter().map(|repo| repo.name).collect())
        }
    }
}
