//! Immutable family tree store

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::FamilyNode;
use crate::domain::person::Person;

/// Canonical, read-only family tree.
///
/// Built once and validated at construction; nothing mutates it afterwards,
/// so shared references can be handed to any number of readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTree {
    root: Person,
}

impl FamilyTree {
    /// Validate and wrap a root person.
    ///
    /// Fails with [`DomainError::BlankName`] on the first node (pre-order)
    /// whose name is empty or whitespace.
    #[instrument(level = "debug", skip(root), fields(root = %root.name))]
    pub fn new(root: Person) -> DomainResult<Self> {
        let mut path = Vec::new();
        validate(&root, 0, &mut path)?;
        let tree = Self { root };
        debug!("tree validated: {} persons, depth {}", tree.len(), tree.depth());
        Ok(tree)
    }

    pub fn root(&self) -> &Person {
        &self.root
    }

    /// Pre-order, left-to-right walk yielding `(depth, person)`; root has depth 0.
    pub fn iter(&self) -> PreOrderIter<'_, Person> {
        PreOrderIter::new(&self.root)
    }

    /// Number of persons in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of generations (a lone root has depth 1).
    pub fn depth(&self) -> usize {
        depth_of(&self.root)
    }

    /// Names of all persons without children, in display order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, p)| p.is_leaf())
            .map(|(_, p)| p.name.as_str())
            .collect()
    }
}

fn validate(person: &Person, index: usize, path: &mut Vec<String>) -> DomainResult<()> {
    if person.name.trim().is_empty() {
        path.push(format!("#{index}"));
        return Err(DomainError::BlankName {
            path: path.join(" > "),
        });
    }
    path.push(person.name.clone());
    for (i, child) in person.children.iter().enumerate() {
        validate(child, i, path)?;
    }
    path.pop();
    Ok(())
}

fn depth_of<N: FamilyNode>(node: &N) -> usize {
    1 + node.children().iter().map(depth_of).max().unwrap_or(0)
}

/// Stack-based pre-order iterator over any [`FamilyNode`].
pub struct PreOrderIter<'a, N> {
    stack: Vec<(usize, &'a N)>,
}

impl<'a, N: FamilyNode> PreOrderIter<'a, N> {
    pub fn new(root: &'a N) -> Self {
        Self {
            stack: vec![(0, root)],
        }
    }
}

impl<'a, N: FamilyNode> Iterator for PreOrderIter<'a, N> {
    type Item = (usize, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      root
    //      /  \
    // child1 child2
    //    |
    // grandchild1
    fn small() -> Person {
        Person::with_children(
            "root",
            vec![
                Person::with_children("child1", vec![Person::leaf("grandchild1")]),
                Person::leaf("child2"),
            ],
        )
    }

    #[test]
    fn given_small_tree_when_iterating_then_preorder_with_depths() {
        let tree = FamilyTree::new(small()).unwrap();
        let visited: Vec<(usize, &str)> = tree.iter().map(|(d, p)| (d, p.name.as_str())).collect();
        assert_eq!(
            visited,
            vec![(0, "root"), (1, "child1"), (2, "grandchild1"), (1, "child2")]
        );
    }

    #[test]
    fn given_small_tree_when_measuring_then_reports_len_depth_and_leaves() {
        let tree = FamilyTree::new(small()).unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_names(), vec!["grandchild1", "child2"]);
        assert_eq!(tree.root().name, "root");
    }

    #[test]
    fn given_single_person_when_measuring_then_depth_one() {
        let tree = FamilyTree::new(Person::leaf("alone")).unwrap();
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.leaf_names(), vec!["alone"]);
    }

    #[test]
    fn given_blank_child_name_when_new_then_reports_path() {
        let root = Person::with_children(
            "root",
            vec![
                Person::leaf("a"),
                Person::with_children("b", vec![Person::leaf("x"), Person::leaf("   ")]),
            ],
        );
        let err = FamilyTree::new(root).unwrap_err();
        assert_eq!(
            err,
            DomainError::BlankName {
                path: "root > b > #1".to_string()
            }
        );
    }

    #[test]
    fn given_tree_when_read_repeatedly_then_same_reference() {
        let tree = FamilyTree::new(small()).unwrap();
        assert!(std::ptr::eq(tree.root(), tree.root()));
    }

    #[test]
    fn given_shared_tree_when_read_from_threads_then_results_agree() {
        let tree = std::sync::Arc::new(FamilyTree::new(small()).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tree = std::sync::Arc::clone(&tree);
                std::thread::spawn(move || tree.resolve_path("grandchild1"))
            })
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap().path().map(<[String]>::len),
                Some(3)
            );
        }
    }
}
