//! BEAM bindings, exported as `Elixir.XmlNode.Native`

use crate::resource::{DocumentRef, DocumentResource};
use crate::term::{document_to_term, str_to_binary};
use rustler::types::atom;
use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn poisoned(reason: &'static str) -> rustler::Error {
    rustler::Error::Term(Box::new(reason))
}

/// Parse XML into a document handle: `{:ok, ref}` or `{:error, reason}`
#[rustler::nif(schedule = "DirtyCpu")]
fn parse<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    match crate::parse_bytes(input.as_slice().to_vec()) {
        Ok(doc) => {
            let handle = ResourceArc::new(DocumentResource::new(doc));
            Ok((atom::ok(), handle).encode(env))
        }
        Err(e) => Ok((atom::error(), e.to_string()).encode(env)),
    }
}

/// Serialize a document handle: `{:ok, binary}` or `{:error, reason}`
#[rustler::nif]
fn to_xml<'a>(env: Env<'a>, doc_ref: DocumentRef) -> NifResult<Term<'a>> {
    let result = doc_ref.with_document(|doc| doc.to_xml()).map_err(poisoned)?;
    match result {
        Ok(xml) => Ok((atom::ok(), str_to_binary(env, &xml)).encode(env)),
        Err(e) => Ok((atom::error(), e.to_string()).encode(env)),
    }
}

/// Convert a document handle to `{:element, name, attrs, children}`
#[rustler::nif]
fn to_term<'a>(env: Env<'a>, doc_ref: DocumentRef) -> NifResult<Term<'a>> {
    doc_ref
        .with_document(|doc| document_to_term(env, doc))
        .map_err(poisoned)
}

rustler::init!("Elixir.XmlNode.Native");
