//! Domain layer: the family tree, name normalization and path resolution
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod dates;
pub mod error;
pub mod node;
pub mod normalize;
pub mod person;
pub mod resolver;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use node::FamilyNode;
pub use normalize::{normalize_name, EquivalenceRule, NameNormalizer};
pub use person::{Language, Person};
pub use resolver::{locate_with, resolve_path, resolve_path_with, Located, PathResult};
pub use tree::{FamilyTree, PreOrderIter};
