//! Weekly launch voting services.
//!
//! - [`lifecycle::LaunchLifecycle`] owns which launch window is active.
//! - [`ledger::VoteLedger`] records one vote per (user, project, launch).
//! - [`rating::RatingAggregator`] keeps `projects.rating` equal to the live vote count.
//! - [`catalog::ProjectCatalog`] scopes project submission and listing to launches.
//! - [`scheduler`] rotates launches on a timer.

use scout_core::error::CoreError;

pub mod catalog;
pub mod ledger;
pub mod lifecycle;
pub mod rating;
pub mod scheduler;

pub use catalog::ProjectCatalog;
pub use ledger::{VoteChange, VoteLedger};
pub use lifecycle::LaunchLifecycle;
pub use rating::RatingAggregator;

/// Error type of every voting service operation.
#[derive(Debug, thiserror::Error)]
pub enum VotingError {
    /// A domain-level error from `scout_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence failure. Never retried here.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type VotingResult<T> = Result<T, VotingError>;
