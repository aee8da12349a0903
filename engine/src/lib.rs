//! # memquery
//!
//! An embeddable, in-memory document store with declarative filter queries.
//!
//! Callers create named collections, insert JSON-like documents, and retrieve
//! them with filter objects in the familiar `{"field": value}` /
//! `{"$or": [...]}` style. Everything lives in process memory; scans are
//! linear and there is no persistence.
//!
//! ## Design Principles
//!
//! - **No globals**: a [`Store`] is an explicit value; independent stores coexist
//! - **No IO**: the engine knows nothing about files, network, or platform
//! - **Fail whole**: a bad query or update fails before touching any document
//! - **Portable**: the [`ffi`] module exposes the same API as JSON over a C ABI
//!
//! ## Core Concepts
//!
//! ### Values
//!
//! A [`Value`] is a JSON-like tagged union. Objects preserve insertion order.
//! Values of different kinds never compare equal; numbers follow IEEE-754, so
//! `NaN` matches nothing.
//!
//! ### Collections
//!
//! A [`Collection`] is an ordered list of documents (object values). Handles
//! are cheap clones sharing one list. Deleting a collection from its store
//! detaches every handle.
//!
//! ### Queries
//!
//! A query is an object. Each plain key is a top-level field that must match;
//! the value is either compared for equality or is an object of comparison
//! operators. See [`Operator`] for the full set:
//! - `$and`, `$or` combine sub-queries
//! - `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`, `$in`, `$nin` test a field
//! - a document missing the field never matches
//!
//! ## Quick Start
//!
//! ```rust
//! use memquery::{doc, query, Error, Store};
//!
//! let store = Store::new();
//! let people = store.create_collection("people").unwrap();
//!
//! people.insert(doc!({"name": "Ram", "age": 30})).unwrap();
//! people.insert(doc!({"name": "Shyam", "age": 35})).unwrap();
//! people.insert(doc!({"name": "Ghanshyam", "age": 40})).unwrap();
//!
//! let found = people.find(query!({"$or": [{"name": "Ram"}, {"age": 40}]})).unwrap();
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0]["name"], "Ram");
//!
//! let err = people.find(query!({"age": {"$regex": "4."}})).unwrap_err();
//! assert_eq!(err, Error::UnsupportedOperator("$regex".into()));
//! ```
//!
//! ## Concurrency
//!
//! [`Store`] and [`Collection`] are `Send + Sync`. The registry and every
//! collection sit behind their own reader-writer lock: reads run
//! concurrently, each mutation is exclusive for the length of one call.

pub mod collection;
pub mod error;
pub mod ffi;
mod macros;
pub mod operator;
pub mod options;
pub mod query;
pub mod store;
pub mod update;
pub mod value;

// Re-export main types at crate root
pub use collection::Collection;
pub use error::{Error, Result};
pub use operator::{Operator, OperatorKind, OPERATOR_PREFIX};
pub use options::Options;
pub use query::{Filter, Predicate};
pub use store::Store;
pub use update::{Change, Update};
pub use value::{Kind, Map, Value};

/// Type aliases for clarity
pub type CollectionName = String;
/// A stored document; always a [`Value::Object`].
pub type Document = Value;
/// A filter expression; always a [`Value::Object`].
pub type Query = Value;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
