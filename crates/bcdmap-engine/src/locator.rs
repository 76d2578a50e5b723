//! Locator: finds support records anywhere in a document.
//!
//! Compat data hangs off `__compat.support` at arbitrary depth:
//!
//! ```text
//! .html.elements.<element>.__compat.support.<browser>
//! .http.<feature>.__compat.support.<browser>
//! .javascript.classes.__compat.support.<browser>
//! ```
//!
//! The walk is a pre-order, depth-first visit over [`Node`] in document order.

use serde_json::{Map, Value};
use std::fmt;

/// Parent key of a support record
pub const COMPAT_KEY: &str = "__compat";
/// Key of a support record
pub const SUPPORT_KEY: &str = "support";

/// Closed view over a JSON node
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Node::Object(map),
            Value::Array(items) => Node::Array(items),
            scalar => Node::Scalar(scalar),
        }
    }
}

/// One step in a path from the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Position of a node inside a document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    segments: Vec<Segment>,
}

impl Location {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// RFC 6901 pointer, usable with `Value::pointer_mut`
    pub fn to_pointer(&self) -> String {
        let mut pointer = String::new();
        for segment in &self.segments {
            pointer.push('/');
            match segment {
                Segment::Key(key) => pointer.push_str(&key.replace('~', "~0").replace('/', "~1")),
                Segment::Index(index) => pointer.push_str(&index.to_string()),
            }
        }
        pointer
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Collect every object member for which `predicate(parent_key, key)` holds.
///
/// `parent_key` is the key under which the enclosing object sits, `None` for
/// the root and for objects inside arrays.
pub fn locate<F>(document: &Value, predicate: F) -> Vec<Location>
where
    F: Fn(Option<&str>, &str) -> bool,
{
    let mut found = Vec::new();
    let mut path = Vec::new();
    visit(Node::from(document), None, &mut path, &predicate, &mut found);
    found
}

/// All `__compat.support` records of a document
pub fn locate_support_records(document: &Value) -> Vec<Location> {
    locate(document, |parent, key| {
        parent == Some(COMPAT_KEY) && key == SUPPORT_KEY
    })
}

fn visit<F>(
    node: Node<'_>,
    own_key: Option<&str>,
    path: &mut Vec<Segment>,
    predicate: &F,
    found: &mut Vec<Location>,
) where
    F: Fn(Option<&str>, &str) -> bool,
{
    match node {
        Node::Object(map) => {
            for (key, child) in map {
                path.push(Segment::Key(key.clone()));
                if predicate(own_key, key.as_str()) {
                    found.push(Location {
                        segments: path.clone(),
                    });
                }
                visit(Node::from(child), Some(key.as_str()), path, predicate, found);
                path.pop();
            }
        }
        Node::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(Segment::Index(index));
                visit(Node::from(child), None, path, predicate, found);
                path.pop();
            }
        }
        Node::Scalar(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finds_nested_records_in_document_order() {
        let doc = json!({
            "api": {
                "Clipboard": {
                    "__compat": { "support": { "chrome": { "version_added": "66" } } },
                    "read": {
                        "__compat": { "support": { "chrome": { "version_added": "76" } } }
                    }
                },
                "Blob": {
                    "__compat": { "support": {} }
                }
            }
        });

        let found: Vec<String> = locate_support_records(&doc)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            found,
            vec![
                "api.Clipboard.__compat.support",
                "api.Clipboard.read.__compat.support",
                "api.Blob.__compat.support",
            ]
        );
    }

    #[test]
    fn test_empty_when_no_records() {
        let doc = json!({ "browsers": { "chrome": { "name": "Chrome" } } });
        assert!(locate_support_records(&doc).is_empty());
    }

    #[test]
    fn test_support_outside_compat_is_ignored() {
        let doc = json!({
            "support": {},
            "feature": { "support": { "chrome": {} } },
            "__compat": { "description": "x" }
        });
        assert!(locate_support_records(&doc).is_empty());
    }

    #[test]
    fn test_arrays_are_traversed() {
        let doc = json!({
            "list": [
                { "__compat": { "support": {} } },
                [{ "support": {} }]
            ]
        });
        let found = locate_support_records(&doc);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].segments(),
            &[
                Segment::Key("list".to_string()),
                Segment::Index(0),
                Segment::Key("__compat".to_string()),
                Segment::Key("support".to_string()),
            ]
        );
        assert_eq!(found[0].to_string(), "list[0].__compat.support");
    }

    #[test]
    fn test_pointer_escaping() {
        let doc = json!({
            "a/b": { "x~y": { "__compat": { "support": {} } } }
        });
        let found = locate_support_records(&doc);
        let pointer = found[0].to_pointer();
        assert_eq!(pointer, "/a~1b/x~0y/__compat/support");
        assert!(doc.pointer(&pointer).is_some());
    }

    #[test]
    fn test_custom_predicate() {
        let doc = json!({ "a": { "b": 1, "c": { "b": 2 } } });
        let found = locate(&doc, |_, key| key == "b");
        assert_eq!(found.len(), 2);
    }
}
