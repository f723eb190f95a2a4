use serde::Deserialize;

/// Combined commit status (`GET /repos/{owner}/{repo}/commits/{sha}/status`).
#[derive(Deserialize, Debug)]
pub struct CombinedStatus {
    #[serde(default)]
    pub state: Option<String>,
}
