pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod hide;
pub mod list;
pub mod reorder;
pub mod select;
