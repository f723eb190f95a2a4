//! The pull request aggregation pipeline: quota guard, scope resolution,
//! fan-out listing, then classification and CI/CD enrichment.

pub mod classify;
pub mod listing;
pub mod scope;
pub mod viewer;
