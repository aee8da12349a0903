//! Store - the collection registry.
//!
//! The Store maps collection names to [`Collection`] handles. It is an
//! explicit value rather than a process-wide singleton, so independent stores
//! can coexist and each test can own its own.

use crate::{error::Result, Collection, CollectionName, Error, Options};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// The registry of named collections.
#[derive(Debug, Default)]
pub struct Store {
    options: Options,
    collections: RwLock<HashMap<CollectionName, Collection>>,
}

impl Store {
    /// Create an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose collections use `options`.
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            collections: RwLock::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Register a new, empty collection.
    ///
    /// Creation is not idempotent: an existing name fails with
    /// `DuplicateCollection` and leaves the existing collection untouched.
    pub fn create_collection(&self, name: &str) -> Result<Collection> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(Error::DuplicateCollection(name.to_string()));
        }

        let collection = Collection::new(name, self.options);
        collections.insert(name.to_string(), collection.clone());
        debug!(collection = name, total = collections.len(), "created collection");
        Ok(collection)
    }

    /// Get a handle to an existing collection.
    pub fn collection(&self, name: &str) -> Result<Collection> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))
    }

    /// Remove a collection and all of its documents.
    ///
    /// Handles obtained earlier are detached: any further use of them fails
    /// with `CollectionNotFound`.
    pub fn delete_collection(&self, name: &str) -> Result<()> {
        let removed = self
            .collections
            .write()
            .remove(name)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))?;
        removed.drop_documents();
        debug!(collection = name, "deleted collection");
        Ok(())
    }

    /// Whether a collection named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.collections.read().contains_key(name)
    }

    /// Names of all collections, sorted.
    pub fn collection_names(&self) -> Vec<CollectionName> {
        let mut names: Vec<_> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
