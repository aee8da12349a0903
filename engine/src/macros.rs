//! JSON-literal constructors for documents, queries and updates.
//!
//! All three accept the same syntax as `serde_json::json!` and produce a
//! [`Value`](crate::Value). They differ only in intent, which keeps call
//! sites readable:
//!
//! ```
//! use memquery::{doc, query, update, Store};
//!
//! let store = Store::new();
//! let people = store.create_collection("people").unwrap();
//! people.insert(doc!({ "name": "Tom", "age": 25 })).unwrap();
//!
//! let found = people.find(query!({ "age": { "$gte": 21 } })).unwrap();
//! assert_eq!(found.len(), 1);
//!
//! let changed = people
//!     .find_and_update(query!({ "name": "Tom" }), update!({ "$set": { "age": 26 } }))
//!     .unwrap();
//! assert_eq!(changed, 1);
//! ```

/// Build a document [`Value`](crate::Value) from a JSON literal.
#[macro_export]
macro_rules! doc {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
    };
}

/// Build a query [`Value`](crate::Value) from a JSON literal.
#[macro_export]
macro_rules! query {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
    };
}

/// Build an update [`Value`](crate::Value) from a JSON literal.
#[macro_export]
macro_rules! update {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
    };
}
