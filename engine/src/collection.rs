//! Collections of documents.
//!
//! A [`Collection`] is a handle: cloning it is cheap and every clone sees the
//! same document list. Reads take a shared lock, mutations an exclusive one,
//! each held only for the duration of a single call.

use crate::query::Filter;
use crate::update::Update;
use crate::{error::Result, CollectionName, Document, Error, Options, Value};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct State {
    documents: Vec<Document>,
    /// Set once the collection has been deleted from its store.
    dropped: bool,
}

#[derive(Debug)]
struct Inner {
    name: CollectionName,
    options: Options,
    state: RwLock<State>,
}

/// A named, ordered list of documents.
#[derive(Debug, Clone)]
pub struct Collection {
    inner: Arc<Inner>,
}

impl Collection {
    pub(crate) fn new(name: impl Into<CollectionName>, options: Options) -> Self {
        Self {
            inner: Arc::new(Inner {
                name: name.into(),
                options,
                state: RwLock::new(State::default()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of stored documents.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.documents.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Append a document. Fails with `InvalidDocument` unless it is an object.
    pub fn insert(&self, document: impl Into<Value>) -> Result<()> {
        let document = document.into();
        if !document.is_object() {
            return Err(Error::InvalidDocument(format!(
                "document must be an object, got {}",
                document.kind()
            )));
        }

        let mut state = self.write()?;
        state.documents.push(document);
        trace!(
            collection = %self.inner.name,
            count = state.documents.len(),
            "inserted document"
        );
        Ok(())
    }

    /// Return every document matching `query`, in insertion order.
    ///
    /// `{}` matches everything. The query is validated before the scan, so an
    /// invalid query fails even when the collection is empty.
    pub fn find(&self, query: impl Into<Value>) -> Result<Vec<Document>> {
        let filter = self.compile(&query.into())?;
        let state = self.read()?;
        let found: Vec<Document> = state
            .documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect();
        trace!(
            collection = %self.inner.name,
            scanned = state.documents.len(),
            matched = found.len(),
            "find"
        );
        Ok(found)
    }

    /// Count documents matching `query` without cloning them.
    pub fn count(&self, query: impl Into<Value>) -> Result<usize> {
        let filter = self.compile(&query.into())?;
        let state = self.read()?;
        Ok(state.documents.iter().filter(|doc| filter.matches(doc)).count())
    }

    /// Apply `update` to every document matching `query`.
    ///
    /// Both query and update are compiled before the collection is locked;
    /// once locked the update cannot fail, so either every matching document
    /// is updated or none is. Returns the number of documents updated.
    pub fn find_and_update(&self, query: impl Into<Value>, update: impl Into<Value>) -> Result<u64> {
        let filter = self.compile(&query.into())?;
        let update = Update::compile(&update.into())?;

        let mut state = self.write()?;
        let mut updated = 0u64;
        for document in state.documents.iter_mut() {
            if filter.matches(document) {
                update.apply(document);
                updated += 1;
            }
        }
        debug!(collection = %self.inner.name, updated, "find_and_update");
        Ok(updated)
    }

    /// Remove and return every document matching `query`, in insertion order.
    /// The remaining documents keep their relative order.
    pub fn find_and_delete(&self, query: impl Into<Value>) -> Result<Vec<Document>> {
        let filter = self.compile(&query.into())?;

        let mut state = self.write()?;
        let (removed, kept): (Vec<Document>, Vec<Document>) = std::mem::take(&mut state.documents)
            .into_iter()
            .partition(|doc| filter.matches(doc));
        state.documents = kept;
        debug!(
            collection = %self.inner.name,
            removed = removed.len(),
            remaining = state.documents.len(),
            "find_and_delete"
        );
        Ok(removed)
    }

    /// Detach this collection from its store, releasing its documents.
    pub(crate) fn drop_documents(&self) {
        let mut state = self.inner.state.write();
        state.dropped = true;
        state.documents = Vec::new();
    }

    fn compile(&self, query: &Value) -> Result<Filter> {
        Filter::compile_with_depth(query, self.inner.options.max_query_depth)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        let state = self.inner.state.read();
        if state.dropped {
            return Err(Error::CollectionNotFound(self.inner.name.clone()));
        }
        Ok(state)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        let state = self.inner.state.write();
        if state.dropped {
            return Err(Error::CollectionNotFound(self.inner.name.clone()));
        }
        Ok(state)
    }
}
