//! Name normalization for fuzzy name equality
//!
//! A name is lowercased, then every equivalence rule rewrites all
//! occurrences of its variant spellings to the canonical spelling.
//! Rewrites are plain substring replacements: `amitbhai` becomes
//! `ameetbhai`. Callers relying on whole-word matching must not use this.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Variant spellings that all rewrite to one canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceRule {
    pub canonical: String,
    pub variants: Vec<String>,
}

impl EquivalenceRule {
    pub fn new<S: Into<String>>(canonical: impl Into<String>, variants: impl IntoIterator<Item = S>) -> Self {
        Self {
            canonical: canonical.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// The ordered built-in rules.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new("meet", ["mit", "meet"]),
            Self::new("hemangini", ["hemi", "hemangini"]),
        ]
    }

    fn compile(&self) -> DomainResult<CompiledRule> {
        let variants: Vec<String> = self.variants.iter().map(|v| v.to_lowercase()).collect();
        if variants.is_empty() || variants.iter().any(|v| v.is_empty()) {
            return Err(DomainError::InvalidRule {
                pattern: self.variants.join("|"),
                message: "variants must be non-empty".to_string(),
            });
        }
        if self.canonical.trim().is_empty() {
            return Err(DomainError::InvalidRule {
                pattern: variants.join("|"),
                message: "canonical spelling must be non-empty".to_string(),
            });
        }
        // Alternation is leftmost-first, so variant order matters for overlaps
        let pattern = variants.iter().map(|v| regex::escape(v)).join("|");
        let regex = Regex::new(&pattern).map_err(|e| DomainError::InvalidRule {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        Ok(CompiledRule {
            regex,
            canonical: self.canonical.to_lowercase(),
        })
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    canonical: String,
}

/// Maps raw names to comparison keys.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    rules: Vec<EquivalenceRule>,
    compiled: Vec<CompiledRule>,
}

static BUILTIN: LazyLock<NameNormalizer> = LazyLock::new(|| {
    // escaped literal patterns always compile
    NameNormalizer::new(EquivalenceRule::builtin()).unwrap()
});

impl NameNormalizer {
    pub fn new(rules: Vec<EquivalenceRule>) -> DomainResult<Self> {
        let compiled = rules
            .iter()
            .map(EquivalenceRule::compile)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { rules, compiled })
    }

    /// Normalizer with only the built-in rules.
    pub fn builtin() -> &'static NameNormalizer {
        &BUILTIN
    }

    /// Built-in rules followed by `extra`, applied in that order.
    pub fn with_extra_rules(extra: &[EquivalenceRule]) -> DomainResult<Self> {
        let mut rules = EquivalenceRule::builtin();
        rules.extend(extra.iter().cloned());
        Self::new(rules)
    }

    pub fn rules(&self) -> &[EquivalenceRule] {
        &self.rules
    }

    #[instrument(level = "trace", skip(self))]
    pub fn normalize(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        self.compiled
            .iter()
            .fold(name.to_lowercase(), |acc, rule| {
                rule.regex.replace_all(&acc, NoExpand(&rule.canonical)).into_owned()
            })
    }

    /// True when both names share a comparison key.
    pub fn equivalent(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Normalize with the built-in rules.
pub fn normalize_name(name: &str) -> String {
    NameNormalizer::builtin().normalize(name)
}
