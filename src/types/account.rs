use serde::Deserialize;

/// A user or organization reference as embedded in GitHub payloads.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Account {
    #[serde(default)]
    pub login: Option<String>,
}

impl Account {
    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }
}

/// Entry of `GET /user/memberships/orgs`.
#[derive(Deserialize, Debug)]
pub struct OrgMembership {
    #[serde(default)]
    pub state: Option<String>,
    pub organization: Account,
}

/// Response of `GET /user`.
#[derive(Deserialize, Debug)]
pub struct User {
    pub login: String,
}
