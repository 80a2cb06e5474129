//! Command implementations for Launchkit CLI

pub mod completions;
pub mod helpers;
pub mod plan;
pub mod run;
pub mod version;
