//! Command implementations for the devprep CLI

pub mod completions;
pub mod setup;
pub mod version;
