//! CLI subcommand implementations

pub mod feed;
pub mod index;
pub mod list;
pub mod search;
