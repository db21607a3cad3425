//! Chainable accessor over dynamic JSON-like trees.
//!
//! Decoded documents (JSON, YAML, anything that deserializes into
//! [`serde_json::Value`]) are dynamically shaped: the caller often knows the
//! path to a value and the type it wants, but not what the decoder actually
//! produced. [`Node`] lets a caller walk such a tree by key or position and
//! coerce the result into a concrete primitive, best-effort and without ever
//! failing mid-chain.
//!
//! Two traversal modes:
//!
//! - **safe**: structural failures (missing key, index out of range, wrong
//!   shape) are accumulated on a slot shared with the root, and traversal
//!   continues over an absent placeholder. Inspect [`Node::error`] once at
//!   the end.
//! - **non-safe**: the same failures yield a silent placeholder whose
//!   coercions all return zero values.
//!
//! Scalar coercion is total in both modes: unparsable or mismatched input
//! degrades to a zero value rather than erroring. Callers who want
//! visibility into those degradations can attach a
//! [coercion hook](Node::with_coercion_hook).
//!
//! # Example
//!
//! ```
//! use data_chain::Node;
//! use serde_json::json;
//!
//! let doc = json!({
//!     "service": {
//!         "enabled": "yes",
//!         "replicas": "3",
//!         "weights": [0.5, 1.56],
//!     }
//! });
//!
//! let root = Node::new(&doc, true);
//! let service = root.field("service");
//!
//! assert!(service.field("enabled").as_bool());
//! assert_eq!(service.field("replicas").as_i64(), 3);
//! assert_eq!(service.field("weights").index(1).as_i64(), 1); // truncates
//! assert_eq!(service.field("weights").count(), 2);
//! assert_eq!(root.error(), None);
//! ```

pub mod coerce;
pub mod error;
pub mod node;

pub use coerce::{CoercionHook, Lossy};
pub use error::{Diagnostics, NavError};
pub use node::Node;
