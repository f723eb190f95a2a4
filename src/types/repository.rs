use std::fmt;

use serde::Deserialize;

use super::Account;

#[derive(Deserialize, Debug)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub owner: Account,
}

impl Repository {
    pub fn is_owned_by(&self, login: &str) -> bool {
        self.owner.login() == Some(login)
    }
}

/// One (owner, name) pair to list pull requests from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub owner: String,
    pub name: String,
}

impl RepositoryTarget {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
