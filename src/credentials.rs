use crate::error::{DigestError, Result};

pub const DEFAULT_TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Read the access token from the named environment variable.
pub fn resolve_token(env_var: &str) -> Result<String> {
    token_from(env_var, std::env::var(env_var).ok())
}

fn token_from(env_var: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(DigestError::TokenNotSet(env_var.to_string())),
    }
}
