#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod output;
pub mod select;
pub mod telemetry;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use github::{Milestone, MilestoneState};
pub use select::{next_milestone, utc_date};

/// Title substring marking a milestone as a release candidate.
pub const RC_TITLE_KEY: &str = "release candidate";
