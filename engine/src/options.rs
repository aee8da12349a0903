//! Engine tunables.

use serde::{Deserialize, Serialize};

/// Default limit on query nesting.
pub const DEFAULT_MAX_QUERY_DEPTH: usize = 64;

/// Options applied to every collection of a [`Store`](crate::Store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Maximum nesting of `$and`/`$or` levels accepted in a query.
    /// Deeper queries are rejected as malformed before any document is read.
    pub max_query_depth: usize,
}

impl Options {
    pub fn with_max_query_depth(mut self, depth: usize) -> Self {
        self.max_query_depth = depth;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_query_depth: DEFAULT_MAX_QUERY_DEPTH,
        }
    }
}
