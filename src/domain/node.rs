//! Read-only node abstraction used by tree walks

use crate::domain::person::Person;

/// A named node with ordered children.
///
/// The resolver and the tree statistics only need these two accessors,
/// so any owned nested structure can be searched.
pub trait FamilyNode: Sized {
    fn name(&self) -> &str;
    fn children(&self) -> &[Self];
}

impl FamilyNode for Person {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
