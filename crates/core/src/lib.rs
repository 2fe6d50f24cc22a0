//! Domain logic shared by the database, voting, and API crates.
//!
//! Nothing in here performs I/O. Time comes in through [`clock::Clock`] so the
//! weekly launch calendar can be driven from tests.

pub mod clock;
pub mod error;
pub mod identity;
pub mod launch_schedule;
pub mod telegram;
pub mod types;
pub mod validation;
