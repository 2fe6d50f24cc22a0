pub mod auth;
pub mod comment;
pub mod launch;
pub mod profile;
pub mod project;
pub mod stats;
pub mod user;
pub mod vote;
