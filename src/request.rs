//! The immutable description of one digest run, built once from CLI input.

use std::fmt;
use std::str::FromStr;

use crate::error::{DigestError, Result};

pub const ALL: &str = "all";

/// Pull request state filter passed to the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StateFilter::Open => "open",
            StateFilter::Closed => "closed",
            StateFilter::All => "all",
        }
    }
}

impl FromStr for StateFilter {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(StateFilter::Open),
            "closed" => Ok(StateFilter::Closed),
            "all" => Ok(StateFilter::All),
            other => Err(DigestError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryScope {
    All,
    Single(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationScope {
    None,
    All,
    Single(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub state: StateFilter,
    pub repository: RepositoryScope,
    pub organization: OrganizationScope,
    pub token_env_var: String,
}

impl RequestDescriptor {
    /// Validate the raw flag combination and build the descriptor.
    ///
    /// `--org` requires `--with-orgs`; `--with-orgs` alone selects every
    /// organization the viewer belongs to.
    pub fn from_args(
        repo: &str,
        state: StateFilter,
        with_orgs: bool,
        org: Option<&str>,
        token_env_var: &str,
    ) -> Result<Self> {
        let org = org.map(str::trim).filter(|o| !o.is_empty());

        let organization = match (with_orgs, org) {
            (false, Some(_)) => return Err(DigestError::OrgWithoutWithOrgs),
            (false, None) => OrganizationScope::None,
            (true, None) => {
                tracing::info!(
                    "You didn't specify an organization, fetching pull requests from all organizations"
                );
                OrganizationScope::All
            }
            (true, Some(ALL)) => OrganizationScope::All,
            (true, Some(name)) => OrganizationScope::Single(name.to_string()),
        };

        let repository = match repo.trim() {
            ALL | "" => RepositoryScope::All,
            name => RepositoryScope::Single(name.to_string()),
        };

        Ok(Self {
            state,
            repository,
            organization,
            token_env_var: token_env_var.to_string(),
        })
    }
}
