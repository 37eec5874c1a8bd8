//! relnote git - history access for changelog generation
//!
//! This crate provides the [`HistorySource`] trait the changelog pipeline
//! reads commits and tags through, and [`GitRepo`], its libgit2-backed
//! implementation.

mod commits;
mod repository;
mod source;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use source::HistorySource;
pub use types::{split_message, RawCommit};
