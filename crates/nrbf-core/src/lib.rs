//! Decoder for the Microsoft .NET Remoting Binary Format (NRBF, the
//! "Binary Formatter" wire format) into an in-memory tagged tree.
//!
//! The tree faithfully preserves every record, object, member name,
//! primitive value, and cross-reference present in the input, for
//! inspection, diagnostics, and downstream re-serialization (e.g. to XML).
//! This crate only reads NRBF; it never re-materializes live objects,
//! resolves assembly/library names, or detects cycles across
//! `MemberReference` edges — those remain a scalar target id in the tree.

mod binary_type;
mod byte_source;
mod context;
mod error;
mod metadata;
mod node;
mod primitive;
mod record;

pub use binary_type::{BinaryType, BinaryTypeDescriptor, ExtraTypeInfo};
pub use byte_source::ByteSource;
pub use error::{NrbfError, Result};
pub use metadata::ClassLayout;
pub use node::Node;
pub use primitive::PrimitiveType;
pub use record::MessageFlags;

/// Decode a complete NRBF byte stream into a [`Node::Aggregate`] named
/// `Root`, whose children are the records in wire order.
///
/// Returns [`NrbfError::Corrupt`] if the stream violates the wire format,
/// or [`NrbfError::NotImplemented`] if it exercises a record or binary
/// type this decoder does not yet handle. On either error nothing is
/// returned; callers that want the partial tree for diagnostics should
/// call [`deserialize_lossy`] instead.
pub fn deserialize(bytes: &[u8]) -> Result<Node> {
    let mut ctx = context::Context::new(ByteSource::new(bytes));
    let mut children = Vec::new();
    while !ctx.src.eof() {
        children.push(record::read_record(&mut ctx)?);
    }
    Ok(Node::aggregate_with("Root", children))
}

/// As [`deserialize`], but on failure returns the partial tree decoded so
/// far alongside the error, for diagnostic dumps.
pub fn deserialize_lossy(bytes: &[u8]) -> (Node, Option<NrbfError>) {
    let mut ctx = context::Context::new(ByteSource::new(bytes));
    let mut children = Vec::new();
    loop {
        if ctx.src.eof() {
            return (Node::aggregate_with("Root", children), None);
        }
        match record::read_record(&mut ctx) {
            Ok(node) => children.push(node),
            Err(err) => {
                log::warn!("decode stopped after {} record(s): {err}", children.len());
                return (Node::aggregate_with("Root", children), Some(err));
            }
        }
    }
}
