//! famtree: genealogical tree store with normalized name search
//!
//! The core is the [`domain`] layer: an immutable [`domain::FamilyTree`],
//! the [`domain::NameNormalizer`] and the path resolver. The remaining
//! layers load trees from data files, carry configuration and drive the CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{resolve_path, FamilyTree, PathResult, Person};
