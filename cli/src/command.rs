//! Command protocol and dispatch.
//!
//! Every input line is one JSON object tagged by `op`; field names use
//! camelCase. Every reply is `{"ok": <payload>}` or `{"error": "<message>"}`.

use memquery::{CollectionName, Document, Query, Store, Value};
use serde::{Deserialize, Serialize};

/// Commands read from input.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    /// Create an empty collection.
    CreateCollection { name: CollectionName },

    /// Describe an existing collection.
    GetCollection { name: CollectionName },

    /// Delete a collection and its documents.
    DeleteCollection { name: CollectionName },

    /// List collection names.
    ListCollections,

    /// Append a document.
    Insert {
        collection: CollectionName,
        document: Document,
    },

    /// Return matching documents in insertion order.
    Find {
        collection: CollectionName,
        #[serde(default = "Value::object")]
        query: Query,
    },

    /// Count matching documents.
    Count {
        collection: CollectionName,
        #[serde(default = "Value::object")]
        query: Query,
    },

    /// Apply an update to matching documents.
    FindAndUpdate {
        collection: CollectionName,
        query: Query,
        update: Value,
    },

    /// Remove and return matching documents.
    FindAndDelete {
        collection: CollectionName,
        query: Query,
    },
}

/// Summary returned by `getCollection`.
#[derive(Debug, Serialize)]
pub struct CollectionInfo {
    pub name: CollectionName,
    pub documents: usize,
}

/// Reply written for each command.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Ok { ok: serde_json::Value },
    Error { error: String },
}

impl Reply {
    fn ok<T: Serialize>(value: T) -> Self {
        match serde_json::to_value(value) {
            Ok(ok) => Reply::Ok { ok },
            Err(e) => Reply::error(format!("serialization failed: {}", e)),
        }
    }

    /// Create an error reply.
    pub fn error(message: impl Into<String>) -> Self {
        Reply::Error {
            error: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Ok { .. })
    }

    fn from_result<T: Serialize>(result: memquery::Result<T>) -> Self {
        match result {
            Ok(value) => Reply::ok(value),
            Err(e) => {
                if e.is_query_error() {
                    tracing::debug!("Rejected query: {}", e);
                } else {
                    tracing::info!("Command failed: {}", e);
                }
                Reply::error(e.to_string())
            }
        }
    }
}

/// Execute a command against the store.
pub fn execute(store: &Store, command: Command) -> Reply {
    match command {
        Command::CreateCollection { name } => {
            Reply::from_result(store.create_collection(&name).map(|_| ()))
        }
        Command::GetCollection { name } => Reply::from_result(
            store
                .collection(&name)
                .and_then(|coll| coll.len())
                .map(|documents| CollectionInfo { name, documents }),
        ),
        Command::DeleteCollection { name } => Reply::from_result(store.delete_collection(&name)),
        Command::ListCollections => Reply::ok(store.collection_names()),
        Command::Insert {
            collection,
            document,
        } => Reply::from_result(
            store
                .collection(&collection)
                .and_then(|coll| coll.insert(document)),
        ),
        Command::Find { collection, query } => Reply::from_result(
            store
                .collection(&collection)
                .and_then(|coll| coll.find(query)),
        ),
        Command::Count { collection, query } => Reply::from_result(
            store
                .collection(&collection)
                .and_then(|coll| coll.count(query)),
        ),
        Command::FindAndUpdate {
            collection,
            query,
            update,
        } => Reply::from_result(
            store
                .collection(&collection)
                .and_then(|coll| coll.find_and_update(query, update)),
        ),
        Command::FindAndDelete { collection, query } => Reply::from_result(
            store
                .collection(&collection)
                .and_then(|coll| coll.find_and_delete(query)),
        ),
    }
}

/// Parse and execute one input line.
///
/// Returns `None` for blank lines.
pub fn execute_line(store: &Store, line: &str) -> Option<Reply> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let reply = match serde_json::from_str::<Command>(line) {
        Ok(command) => execute(store, command),
        Err(e) => {
            tracing::warn!("Rejected input line: {}", e);
            Reply::error(format!("Invalid command format: {}", e))
        }
    };
    Some(reply)
}
