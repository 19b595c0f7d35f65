//! Declared mutability metadata of a resource.
//!
//! Metadata maps a category name (`"ReadOnly"`, `"CreateOnly"`) to the path
//! patterns declared for it. It is built once at setup time and is read-only
//! afterwards.

use crate::operation::MutabilityCategory;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from mutability category name to declared path patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutabilityMetadata {
    paths: HashMap<String, Vec<String>>,
}

/// A raw per-category declaration, as found on a resource definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Category name, e.g. `ReadOnly`
    pub name: String,
    pub paths: Vec<String>,
}

impl FieldDeclaration {
    pub fn new<I, S>(name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl MutabilityMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add paths to a category, builder style.
    pub fn with_paths<I, S>(mut self, category: MutabilityCategory, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(category, paths);
        self
    }

    /// Add paths to a category. Paths already declared are kept.
    pub fn insert<I, S>(&mut self, category: MutabilityCategory, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths
            .entry(category.metadata_name().to_string())
            .or_default()
            .extend(paths.into_iter().map(Into::into));
    }

    /// Build metadata from raw declarations.
    ///
    /// Declarations naming an unknown category carry no mutability semantics
    /// and are skipped.
    pub fn from_declarations<I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = FieldDeclaration>,
    {
        let mut metadata = Self::new();
        for declaration in declarations {
            match MutabilityCategory::from_metadata_name(&declaration.name) {
                Some(category) => metadata.insert(category, declaration.paths),
                None => warn!(
                    "Ignoring unknown mutability category '{}' ({} paths)",
                    declaration.name,
                    declaration.paths.len()
                ),
            }
        }
        metadata
    }

    /// Paths declared for a category, empty when none are.
    pub fn paths(&self, category: MutabilityCategory) -> &[String] {
        self.paths
            .get(category.metadata_name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over recognized categories and their declared paths.
    pub fn iter(&self) -> impl Iterator<Item = (MutabilityCategory, &[String])> {
        MutabilityCategory::ALL
            .into_iter()
            .map(|category| (category, self.paths(category)))
            .filter(|(_, paths)| !paths.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.paths.values().all(Vec::is_empty)
    }
}
