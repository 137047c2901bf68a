//! Application services

pub mod tree;

pub use tree::{sample_tree, SearchOutcome, TreeFormat, TreeService};
