mod account;
mod pull_request;
mod relationship;
mod repository;
mod status;
mod viewer;

pub use account::{Account, OrgMembership, User};
pub use pull_request::{DetailedPullRequest, RawPullRequest, StatusTarget};
pub use relationship::RelationshipClass;
pub use repository::{Repository, RepositoryTarget};
pub use status::CombinedStatus;
pub use viewer::{RateSnapshot, Viewer};
