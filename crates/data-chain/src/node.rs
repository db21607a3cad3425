//! The chainable [`Node`] accessor.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::coerce::{self, CoercionHook, Lossy};
use crate::error::{Diagnostics, NavError};

/// Accessor over one value in a dynamic tree.
///
/// A `Node` borrows its value from the decoded document; navigation returns
/// fresh child nodes and never mutates the tree. Cloning a node is cheap (a
/// borrowed pointer plus two `Rc` handles).
///
/// # Example
///
/// ```
/// use data_chain::Node;
/// use serde_json::json;
///
/// let doc = json!({"server": {"port": "8080", "hosts": ["a", "b"]}});
/// let root = Node::new(&doc, true);
///
/// assert_eq!(root.field("server").field("port").as_i64(), 8080);
/// assert_eq!(root.field("server").field("hosts").index(1).as_string(), "b");
/// assert_eq!(root.error(), None);
///
/// // A bad path does not abort the chain; the error is on the root.
/// let missing = root.field("server").field("prot").as_i64();
/// assert_eq!(missing, 0);
/// assert_eq!(root.error().unwrap(), "key `prot` does not exist");
/// ```
#[derive(Clone)]
pub struct Node<'a> {
    value: Option<&'a Value>,
    diag: Option<Rc<Diagnostics>>,
    hook: Option<Rc<CoercionHook>>,
}

impl<'a> Node<'a> {
    /// Creates a root node over a decoded value.
    ///
    /// With `safe` set, the root carries a [`Diagnostics`] slot shared by
    /// every node derived from it: failed navigation records an error there
    /// and returns an absent placeholder, so a chain runs to completion and
    /// the caller inspects [`error`](Self::error) once at the end. Without
    /// `safe`, failed navigation returns a silent absent placeholder.
    pub fn new(value: &'a Value, safe: bool) -> Self {
        Node {
            value: Some(value),
            diag: safe.then(|| Rc::new(Diagnostics::default())),
            hook: None,
        }
    }

    /// Attaches an observer for lossy coercions, inherited by every node
    /// derived from this one. Observational only: results are unchanged.
    ///
    /// ```
    /// use data_chain::Node;
    /// use serde_json::json;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let doc = json!({"n": "not-a-number"});
    /// let seen = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&seen);
    /// let root = Node::new(&doc, false)
    ///     .with_coercion_hook(move |lossy| sink.borrow_mut().push(lossy));
    ///
    /// assert_eq!(root.field("n").as_i64(), 0);
    /// assert_eq!(seen.borrow()[0].source, "not-a-number");
    /// ```
    pub fn with_coercion_hook(mut self, hook: impl Fn(Lossy) + 'static) -> Self {
        self.hook = Some(Rc::new(hook));
        self
    }

    fn child(&self, value: Option<&'a Value>) -> Node<'a> {
        Node {
            value,
            diag: self.diag.clone(),
            hook: self.hook.clone(),
        }
    }

    fn record(&self, err: NavError) {
        if let Some(diag) = &self.diag {
            diag.record(err);
        }
    }

    /// Navigates into a mapping by key.
    ///
    /// Returns an absent placeholder when this node is not a mapping, or the
    /// key is missing, or the key maps to null. In safe mode the failure is
    /// recorded on the shared slot; the chain never aborts either way.
    pub fn field(&self, key: &str) -> Node<'a> {
        match self.value {
            Some(Value::Object(map)) => match map.get(key) {
                Some(entry) if !entry.is_null() => self.child(Some(entry)),
                _ => {
                    self.record(NavError::MissingKey(key.to_string()));
                    self.child(None)
                }
            },
            _ => {
                self.record(NavError::NotAMap(key.to_string()));
                self.child(None)
            }
        }
    }

    /// Navigates into a sequence by position.
    ///
    /// Out-of-range positions and non-sequence values both yield an absent
    /// placeholder (recorded in safe mode).
    pub fn index(&self, i: usize) -> Node<'a> {
        match self.value {
            Some(Value::Array(seq)) => match seq.get(i) {
                Some(element) => self.child(Some(element)),
                None => {
                    self.record(NavError::IndexOutOfRange(i));
                    self.child(None)
                }
            },
            _ => {
                self.record(NavError::NotAnArray(self.kind()));
                self.child(None)
            }
        }
    }

    /// Number of elements if this node wraps a sequence, otherwise 0 (and a
    /// recorded error in safe mode).
    pub fn count(&self) -> usize {
        match self.value {
            Some(Value::Array(seq)) => seq.len(),
            _ => {
                self.record(NavError::CountOnNonArray);
                0
            }
        }
    }

    /// Materializes a sequence as one node per element.
    ///
    /// The returned nodes are independent leaves: they carry no error slot
    /// and no coercion hook. Empty if this node is not a sequence.
    pub fn items(&self) -> Vec<Node<'a>> {
        match self.value {
            Some(Value::Array(seq)) => seq.iter().map(Node::leaf).collect(),
            _ => Vec::new(),
        }
    }

    /// Materializes a mapping as one node per entry, keyed by entry name.
    ///
    /// The returned nodes are independent leaves, as with
    /// [`items`](Self::items). Empty if this node is not a mapping.
    pub fn entries(&self) -> HashMap<String, Node<'a>> {
        match self.value {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| (k.clone(), Node::leaf(v)))
                .collect(),
            _ => HashMap::new(),
        }
    }

    fn leaf(value: &'a Value) -> Node<'a> {
        Node {
            value: Some(value),
            diag: None,
            hook: None,
        }
    }

    /// Kind name of the wrapped value: `"null"`, `"boolean"`, `"number"`,
    /// `"string"`, `"array"`, `"object"`, or `"undefined"` for the absent
    /// placeholder.
    pub fn kind(&self) -> &'static str {
        coerce::kind(self.value)
    }

    /// The raw wrapped value, or `None` for the absent placeholder.
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    /// False for the absent placeholder returned by failed navigation.
    pub fn exists(&self) -> bool {
        self.value.is_some()
    }

    /// The accumulated error text, or `None` when nothing failed or the node
    /// was created without safe mode.
    pub fn error(&self) -> Option<String> {
        self.diag.as_ref().and_then(|d| d.message())
    }

    /// The recorded errors as typed values, in order. Empty without safe
    /// mode.
    pub fn errors(&self) -> Vec<NavError> {
        self.diag.as_ref().map(|d| d.errors()).unwrap_or_default()
    }

    /// Empties the shared error slot so the chain can be reused.
    pub fn reset(&self) {
        if let Some(diag) = &self.diag {
            diag.reset();
        }
    }

    /// The value as text. Total; see [`coerce::to_string`].
    pub fn as_string(&self) -> String {
        coerce::to_string(self.value)
    }

    /// The value as a boolean. Total; see [`coerce::to_bool`].
    ///
    /// ```
    /// use data_chain::Node;
    /// use serde_json::json;
    ///
    /// let doc = json!({"a": "yes", "b": "FAIL", "c": 2});
    /// let root = Node::new(&doc, false);
    /// assert!(root.field("a").as_bool());
    /// assert!(!root.field("b").as_bool());
    /// assert!(root.field("c").as_bool());
    /// ```
    pub fn as_bool(&self) -> bool {
        coerce::to_bool(self.value, self.hook.as_deref())
    }

    /// The value as an `i64`. Total; see [`coerce::to_i64`].
    pub fn as_i64(&self) -> i64 {
        coerce::to_i64(self.value, self.hook.as_deref())
    }

    /// The value as an `i32`, wrapping to the target width.
    pub fn as_i32(&self) -> i32 {
        coerce::to_i32(self.value, self.hook.as_deref())
    }

    /// The value as an `i8`, wrapping to the target width.
    pub fn as_i8(&self) -> i8 {
        coerce::to_i8(self.value, self.hook.as_deref())
    }

    /// The value as an `f64`. Total; see [`coerce::to_f64`].
    pub fn as_f64(&self) -> f64 {
        coerce::to_f64(self.value, self.hook.as_deref())
    }

    /// The value as an `f32`.
    pub fn as_f32(&self) -> f32 {
        coerce::to_f32(self.value, self.hook.as_deref())
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_is_inert() {
        let doc = json!({"a": 1});
        let root = Node::new(&doc, false);
        let missing = root.field("b");

        assert!(!missing.exists());
        assert_eq!(missing.kind(), "undefined");
        assert_eq!(missing.count(), 0);
        assert_eq!(missing.as_i64(), 0);
        assert_eq!(missing.as_f64(), 0.0);
        assert!(!missing.as_bool());
        assert_eq!(missing.as_string(), "null");
        assert!(missing.items().is_empty());
        assert!(missing.entries().is_empty());

        // Further navigation off the placeholder stays inert.
        assert!(!missing.field("c").index(2).exists());
    }

    #[test]
    fn test_null_entry_counts_as_missing() {
        let doc = json!({"a": null});
        let root = Node::new(&doc, true);
        assert!(!root.field("a").exists());
        assert_eq!(root.error().unwrap(), "key `a` does not exist");
    }

    #[test]
    fn test_out_of_range_returns_placeholder_without_safe_mode() {
        // Even without an error slot, out-of-range access yields a fresh
        // placeholder, never the sequence node itself.
        let doc = json!([1, 2, 3]);
        let root = Node::new(&doc, false);
        let past_end = root.index(3);
        assert!(!past_end.exists());
        assert_eq!(past_end.count(), 0);
        assert_eq!(root.count(), 3);
    }

    #[test]
    fn test_shared_slot_visible_on_root() {
        let doc = json!({"list": [1]});
        let root = Node::new(&doc, true);

        let child = root.field("list");
        child.index(5);
        child.field("x");

        assert_eq!(
            root.error().unwrap(),
            "index out of range: `5`; map with key `x` does not exist"
        );
        assert_eq!(root.errors().len(), 2);
    }

    #[test]
    fn test_debug_names_kind() {
        let doc = json!({"a": 1});
        let root = Node::new(&doc, false);
        let rendered = format!("{:?}", root.field("a"));
        assert!(rendered.contains("number"));
    }
}
