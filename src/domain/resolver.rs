//! Root-to-person path resolution by normalized name

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{debug, instrument};

use crate::domain::node::FamilyNode;
use crate::domain::normalize::NameNormalizer;
use crate::domain::person::Person;
use crate::domain::tree::FamilyTree;

/// Outcome of a name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResult {
    /// Display names from the root through the match, inclusive.
    Found { path: Vec<String> },
    NotFound,
}

impl PathResult {
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found { .. })
    }

    pub fn path(&self) -> Option<&[String]> {
        match self {
            PathResult::Found { path } => Some(path),
            PathResult::NotFound => None,
        }
    }

    /// Display name of the matched person.
    pub fn target(&self) -> Option<&str> {
        self.path().and_then(|p| p.last()).map(String::as_str)
    }
}

// `{"found": true, "path": [...]}` or `{"found": false}`
impl Serialize for PathResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathResult::Found { path } => {
                let mut s = serializer.serialize_struct("PathResult", 2)?;
                s.serialize_field("found", &true)?;
                s.serialize_field("path", path)?;
                s.end()
            }
            PathResult::NotFound => {
                let mut s = serializer.serialize_struct("PathResult", 1)?;
                s.serialize_field("found", &false)?;
                s.end()
            }
        }
    }
}

/// A matched person together with its ancestors, root first.
#[derive(Debug)]
pub struct Located<'a, N> {
    pub ancestors: Vec<&'a N>,
    pub node: &'a N,
}

impl<'a, N: FamilyNode> Located<'a, N> {
    /// Number of edges between the root and the match.
    pub fn level(&self) -> usize {
        self.ancestors.len()
    }

    /// Ancestors followed by the match itself.
    pub fn chain(&self) -> impl Iterator<Item = &'a N> + '_ {
        self.ancestors.iter().copied().chain(std::iter::once(self.node))
    }

    pub fn path(&self) -> Vec<String> {
        self.chain().map(|n| n.name().to_owned()).collect()
    }
}

/// Resolve `query` with the built-in normalization rules.
pub fn resolve_path<N: FamilyNode>(root: &N, query: &str) -> PathResult {
    resolve_path_with(NameNormalizer::builtin(), root, query)
}

/// Depth-first, pre-order search for the first person whose normalized
/// name equals the normalized query.
///
/// Blank queries return [`PathResult::NotFound`] without visiting any node.
pub fn resolve_path_with<N: FamilyNode>(
    normalizer: &NameNormalizer,
    root: &N,
    query: &str,
) -> PathResult {
    match locate_with(normalizer, root, query) {
        Some(located) => PathResult::Found {
            path: located.path(),
        },
        None => PathResult::NotFound,
    }
}

/// Like [`resolve_path_with`], but hands back the matched nodes.
#[instrument(level = "debug", skip(normalizer, root))]
pub fn locate_with<'a, N: FamilyNode>(
    normalizer: &NameNormalizer,
    root: &'a N,
    query: &str,
) -> Option<Located<'a, N>> {
    let query = query.trim();
    if query.is_empty() {
        debug!("blank query, skipping traversal");
        return None;
    }
    let key = normalizer.normalize(query);

    let mut ancestors = Vec::new();
    let node = find(normalizer, root, &key, &mut ancestors)?;
    Some(Located { ancestors, node })
}

fn find<'a, N: FamilyNode>(
    normalizer: &NameNormalizer,
    node: &'a N,
    key: &str,
    ancestors: &mut Vec<&'a N>,
) -> Option<&'a N> {
    if normalizer.normalize(node.name()) == key {
        return Some(node);
    }
    ancestors.push(node);
    for child in node.children() {
        if let Some(found) = find(normalizer, child, key, ancestors) {
            return Some(found);
        }
    }
    ancestors.pop();
    None
}

impl FamilyTree {
    pub fn resolve_path(&self, query: &str) -> PathResult {
        resolve_path(self.root(), query)
    }

    pub fn resolve_path_with(&self, normalizer: &NameNormalizer, query: &str) -> PathResult {
        resolve_path_with(normalizer, self.root(), query)
    }

    pub fn locate_with(&self, normalizer: &NameNormalizer, query: &str) -> Option<Located<'_, Person>> {
        locate_with(normalizer, self.root(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts every name lookup made during a walk.
    struct Probe<'c> {
        name: String,
        children: Vec<Probe<'c>>,
        reads: &'c Cell<usize>,
    }

    impl<'c> Probe<'c> {
        fn new(name: &str, reads: &'c Cell<usize>, children: Vec<Probe<'c>>) -> Self {
            Self {
                name: name.to_string(),
                children,
                reads,
            }
        }
    }

    impl FamilyNode for Probe<'_> {
        fn name(&self) -> &str {
            self.reads.set(self.reads.get() + 1);
            &self.name
        }

        fn children(&self) -> &[Self] {
            &self.children
        }
    }

    #[test]
    fn given_blank_query_when_resolving_then_no_node_visited() {
        let reads = Cell::new(0);
        let root = Probe::new("Kaduji Bhatt", &reads, vec![Probe::new("Mit", &reads, vec![])]);

        assert_eq!(resolve_path(&root, ""), PathResult::NotFound);
        assert_eq!(resolve_path(&root, "   "), PathResult::NotFound);
        assert_eq!(resolve_path(&root, "\t\n"), PathResult::NotFound);
        assert_eq!(reads.get(), 0);

        assert!(resolve_path(&root, "Mit").is_found());
        assert!(reads.get() > 0);
    }

    #[test]
    fn given_duplicate_names_when_resolving_then_first_in_preorder_wins() {
        let root = Person::with_children(
            "root",
            vec![
                Person::with_children("left", vec![Person::with_children("deep", vec![Person::leaf("twin")])]),
                Person::leaf("twin"),
            ],
        );
        let result = resolve_path(&root, "twin");
        assert_eq!(
            result.path().unwrap(),
            &["root", "left", "deep", "twin"].map(String::from)
        );
    }

    #[test]
    fn given_equivalent_spelling_when_resolving_then_returns_display_names() {
        let root = Person::with_children("root", vec![Person::leaf("Hemangini")]);
        let result = resolve_path(&root, "hemi");
        assert_eq!(result.target(), Some("Hemangini"));
    }

    #[test]
    fn given_match_when_locating_then_returns_node_and_ancestors() {
        let root = Person::with_children(
            "root",
            vec![Person::with_children("parent", vec![Person::leaf("Mit").born("05 Oct 2018")])],
        );
        let located = locate_with(NameNormalizer::builtin(), &root, "meet").unwrap();
        assert_eq!(located.node.birth_date.as_deref(), Some("05 Oct 2018"));
        assert_eq!(located.level(), 2);
        assert_eq!(located.path(), vec!["root", "parent", "Mit"]);
    }

    #[test]
    fn given_padded_query_when_resolving_then_trims() {
        let root = Person::leaf("Kaduji Bhatt");
        assert!(resolve_path(&root, "  kaduji bhatt ").is_found());
    }

    #[test]
    fn given_partial_name_when_resolving_then_not_found() {
        let root = Person::leaf("Kaduji Bhatt");
        assert_eq!(resolve_path(&root, "Kaduji"), PathResult::NotFound);
    }

    #[test]
    fn given_results_when_serializing_then_found_flag_shape() {
        let found = PathResult::Found {
            path: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            serde_json::to_string(&found).unwrap(),
            r#"{"found":true,"path":["a","b"]}"#
        );
        assert_eq!(
            serde_json::to_string(&PathResult::NotFound).unwrap(),
            r#"{"found":false}"#
        );
    }
}
