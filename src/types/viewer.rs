/// Rate limit headers observed on the identity call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSnapshot {
    pub limit: u64,
    pub remaining: u64,
}

/// The identity owning the token, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub login: String,
    pub rate: Option<RateSnapshot>,
}
