//! Value codec
//!
//! Converts any `Serialize` value into tree nodes by way of
//! `serde_json::Value`. Objects become containers in field order, arrays
//! become repeated slots under the field's name, and scalars become
//! `<name>value</name>` children.

use crate::dom::{Node, Scalar, XmlNode};
use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Slot name for the elements of a top-level array
pub const ARRAY_ITEM: &str = "item";

/// Convert `value` into a node
///
/// A top-level scalar becomes a leaf. A top-level array becomes a container
/// with one [`ARRAY_ITEM`] slot per element.
pub fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    Ok(match serde_json::to_value(value)? {
        Value::Object(map) => Node::Element(object_to_element(map)),
        Value::Array(items) => {
            let mut element = XmlNode::new();
            for item in items {
                put_field(&mut element, ARRAY_ITEM, item);
            }
            Node::Element(element)
        }
        scalar => Node::Leaf(to_scalar(scalar)),
    })
}

impl XmlNode {
    /// Convert `value` and append it under `name`; arrays append one slot per element
    pub fn put_value<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<&mut Self> {
        put_field(self, name, serde_json::to_value(value)?);
        Ok(self)
    }
}

fn object_to_element(map: Map<String, Value>) -> XmlNode {
    let mut element = XmlNode::new();
    for (name, value) in map {
        put_field(&mut element, &name, value);
    }
    element
}

fn put_field(node: &mut XmlNode, name: &str, value: Value) {
    match value {
        Value::Object(map) => {
            node.set(name, Node::Element(object_to_element(map)));
        }
        Value::Array(items) => {
            for item in items {
                put_field(node, name, item);
            }
        }
        Value::Null => {
            node.put_null(name);
        }
        scalar => {
            node.put(name, to_scalar(scalar));
        }
    }
}

fn to_scalar(value: Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(b),
        Value::Number(n) => number_to_scalar(&n),
        Value::String(s) => Scalar::Text(s),
        // Containers are handled by the callers
        other => Scalar::Text(other.to_string()),
    }
}

fn number_to_scalar(n: &Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::UInt(u)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Reading {
        station: &'static str,
        celsius: f64,
        samples: u64,
        tags: Vec<&'static str>,
        note: Option<String>,
    }

    #[test]
    fn test_struct_to_container() {
        let reading = Reading {
            station: "Oslo",
            celsius: -3.5,
            samples: u64::MAX,
            tags: vec!["a", "b"],
            note: None,
        };
        let node = to_node(&reading).unwrap();
        let element = node.as_element().unwrap();

        assert_eq!(
            element.field_names().collect::<Vec<_>>(),
            vec!["station", "celsius", "samples", "tags", "tags", "note"]
        );
        assert_eq!(element["celsius"].value(), Some(&Scalar::Float(-3.5)));
        assert_eq!(element["samples"].value(), Some(&Scalar::UInt(u64::MAX)));
        assert!(element["note"].is_null());
    }

    #[test]
    fn test_top_level_scalar_and_array() {
        assert_eq!(to_node(&42).unwrap(), Node::Leaf(Scalar::Int(42)));

        let node = to_node(&[1, 2]).unwrap();
        let element = node.as_element().unwrap();
        assert_eq!(element.get_all(ARRAY_ITEM).count(), 2);
    }

    #[test]
    fn test_put_value() {
        let mut root = XmlNode::new();
        root.put_value("point", &serde_json::json!({"x": 1, "y": 2}))
            .unwrap()
            .put_value("flag", &true)
            .unwrap();

        assert_eq!(
            root.to_xml("r").unwrap(),
            "<r><point><x>1</x><y>2</y></point><flag>true</flag></r>"
        );
    }
}
