//! Family tree loading and search service
//!
//! Loads a validated `FamilyTree` from a data file (or the bundled sample)
//! and answers name searches with both the raw path result and the view
//! state a renderer needs.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, ViewState};
use crate::config::Settings;
use crate::domain::{FamilyTree, NameNormalizer, PathResult, Person};
use crate::infrastructure::traits::FileSystem;

const SAMPLE_TREE: &str = include_str!("../../../data/family.json");

/// Supported data file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Json,
    Toml,
}

impl TreeFormat {
    pub fn from_path(path: &Path) -> ApplicationResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(TreeFormat::Json),
            Some("toml") => Ok(TreeFormat::Toml),
            _ => Err(ApplicationError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse and validate tree data; `path` only labels errors.
    pub fn parse(self, content: &str, path: &Path) -> ApplicationResult<FamilyTree> {
        let root: Person = match self {
            TreeFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            TreeFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
        .map_err(|message| ApplicationError::TreeData {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(FamilyTree::new(root)?)
    }
}

/// The bundled sample family.
pub fn sample_tree() -> ApplicationResult<FamilyTree> {
    TreeFormat::Json.parse(SAMPLE_TREE, Path::new("<bundled>/family.json"))
}

/// Result of a search: the resolver outcome plus derived view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub result: PathResult,
    pub view: ViewState,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.result.is_found()
    }
}

/// Service for loading and searching family trees.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    normalizer: NameNormalizer,
}

impl TreeService {
    /// Create a tree service using the built-in name rules.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_normalizer(fs, NameNormalizer::default())
    }

    pub fn with_normalizer(fs: Arc<dyn FileSystem>, normalizer: NameNormalizer) -> Self {
        Self { fs, normalizer }
    }

    /// Create a tree service with built-in rules plus configured aliases.
    pub fn from_settings(fs: Arc<dyn FileSystem>, settings: &Settings) -> ApplicationResult<Self> {
        let normalizer = NameNormalizer::with_extra_rules(&settings.alias_rules())?;
        Ok(Self::with_normalizer(fs, normalizer))
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    /// Load a tree from a `.json` or `.toml` data file.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<FamilyTree> {
        let format = TreeFormat::from_path(path)?;
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("tree data not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree data", path)?;
        let tree = format.parse(&content, path)?;
        info!(
            "loaded {} persons from {} (root: {})",
            tree.len(),
            path.display(),
            tree.root().name
        );
        Ok(tree)
    }

    /// Load `settings.data_file`, or the bundled sample when none is set.
    pub fn load_configured(&self, settings: &Settings) -> ApplicationResult<FamilyTree> {
        match &settings.data_file {
            Some(path) => self.load(path),
            None => {
                debug!("no data_file configured, using bundled sample");
                sample_tree()
            }
        }
    }

    /// Resolve `query` and derive the matching view state.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn search(&self, tree: &FamilyTree, query: &str) -> SearchOutcome {
        let result = tree.resolve_path_with(&self.normalizer, query);
        match result.target() {
            Some(target) => debug!("'{}' matched '{}'", query, target),
            None => warn!("'{}' not found in tree", query),
        }
        let view = ViewState::from_result(&result);
        SearchOutcome {
            query: query.to_string(),
            result,
            view,
        }
    }
}
