//! Search-driven view state handed to renderers
//!
//! The renderer owns nothing: it asks a `ViewState` per node whether to
//! expand, highlight or mark it as part of the active path.

use serde::Serialize;

use crate::domain::PathResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    /// Names to expand, indexed by tree level
    pub expand_path: Vec<String>,
    /// The matched person
    pub highlight_name: Option<String>,
    /// Names drawn as the root-to-match trail
    pub active_path: Vec<String>,
}

impl ViewState {
    pub fn from_result(result: &PathResult) -> Self {
        match result.path() {
            Some(path) => Self {
                expand_path: path.to_vec(),
                highlight_name: path.last().cloned(),
                active_path: path.to_vec(),
            },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expand_path.is_empty() && self.highlight_name.is_none() && self.active_path.is_empty()
    }

    /// Expansion override for the node at `level` named `name`.
    ///
    /// `Some(true)` when the node lies on the expand path, `Some(false)` when
    /// a search is active but the node is off the path, `None` when no search
    /// is active and the user's own toggling applies.
    pub fn expansion(&self, level: usize, name: &str) -> Option<bool> {
        if self.expand_path.get(level).is_some_and(|n| n == name) {
            Some(true)
        } else if !self.expand_path.is_empty() {
            Some(false)
        } else {
            None
        }
    }

    pub fn should_expand(&self, level: usize, name: &str) -> bool {
        self.expansion(level, name).unwrap_or(false)
    }

    pub fn is_highlighted(&self, name: &str) -> bool {
        self.highlight_name.as_deref() == Some(name)
    }

    /// Membership is by name, so a namesake elsewhere in the tree also matches.
    pub fn is_on_active_path(&self, name: &str) -> bool {
        self.active_path.iter().any(|n| n == name)
    }
}
