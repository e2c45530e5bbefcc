//! Elixir Term Conversion Utilities
//!
//! Converts documents to nested `{:element, name, attrs, children}` tuples.
//! Names are qualified the same way the serializer qualifies them.

use crate::dom::{Document, Node, Scalar, XmlNode};
use crate::ser::{qualified_attribute_name, qualified_child_name};
use rustler::{Encoder, Env, NewBinary, Term};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    element,
    cdata,
}

/// Convert a document to `{:element, root_name, attrs, children}`
pub fn document_to_term<'a>(env: Env<'a>, doc: &Document) -> Term<'a> {
    element_to_term(env, doc.root_name(), doc.root())
}

/// Convert an element to `{:element, name, attrs, children}`
///
/// Namespace declarations come first in `attrs`, as `{"xmlns:p", uri}`.
pub fn element_to_term<'a>(env: Env<'a>, name: &str, node: &XmlNode) -> Term<'a> {
    // Build lists in reverse so prepending keeps document order
    let mut attrs = Term::list_new_empty(env);
    for (local, value) in node.attributes().iter().rev() {
        let attr_name = qualified_attribute_name(node, local);
        let pair = (
            str_to_binary(env, &attr_name),
            str_to_binary(env, &value.to_lexical()),
        );
        attrs = attrs.list_prepend(pair.encode(env));
    }
    let bindings: Vec<_> = node.namespace_uris().collect();
    for (prefix, uri) in bindings.into_iter().rev() {
        let attr_name = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{prefix}")
        };
        let pair = (str_to_binary(env, &attr_name), str_to_binary(env, uri));
        attrs = attrs.list_prepend(pair.encode(env));
    }

    let mut children = Term::list_new_empty(env);
    for entry in node.entries().rev() {
        let child = match entry.node() {
            Node::Missing => continue,
            Node::Leaf(value) if entry.is_text() => scalar_to_term(env, value),
            Node::Leaf(value) => {
                let name = qualified_child_name(node, entry);
                let content = match value {
                    Scalar::Null => Term::list_new_empty(env),
                    other => {
                        Term::list_new_empty(env).list_prepend(scalar_to_term(env, other))
                    }
                };
                let no_attrs = Term::list_new_empty(env);
                (element(), str_to_binary(env, &name), no_attrs, content).encode(env)
            }
            Node::Element(child) => {
                element_to_term(env, &qualified_child_name(node, entry), child)
            }
        };
        children = children.list_prepend(child);
    }

    (element(), str_to_binary(env, name), attrs, children).encode(env)
}

/// Text is a binary, CDATA is `{:cdata, binary}`
fn scalar_to_term<'a>(env: Env<'a>, value: &Scalar) -> Term<'a> {
    match value {
        Scalar::CData(text) => (cdata(), str_to_binary(env, text)).encode(env),
        other => str_to_binary(env, &other.to_lexical()),
    }
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
