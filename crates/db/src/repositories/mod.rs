//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that take part in multi-statement transactions accept any
//! [`sqlx::PgExecutor`] so callers can pass either the pool or `&mut *tx`;
//! the rest take `&PgPool` directly.

pub mod comment_repo;
pub mod launch_repo;
pub mod project_repo;
pub mod user_repo;
pub mod vote_repo;

pub use comment_repo::CommentRepo;
pub use launch_repo::LaunchRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
