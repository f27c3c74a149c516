//! `BinaryLibrary` (12): not a standalone record but a prefix — the
//! decoder must immediately read and decode the class or array record that
//! follows, composing both into one aggregate.

use crate::context::Context;
use crate::error::{NrbfError, Result};
use crate::node::Node;
use crate::primitive::read_raw_string;
use crate::record::{is_class_or_array, read_record, RecordType};

pub fn decode(ctx: &mut Context<'_>) -> Result<Node> {
    let library_id = ctx.src.read::<i32>()?;
    let library_name = read_raw_string(&mut ctx.src)?;

    let library = Node::aggregate_with(
        "BinaryLibrary",
        vec![Node::leaf("LibraryId", library_id.to_string()), Node::leaf("LibraryName", library_name)],
    );

    let offset = ctx.src.position();
    let tag = ctx.src.read::<u8>()?;
    let record_type = RecordType::from_u8(tag)?;
    if !is_class_or_array(record_type) {
        return Err(NrbfError::corrupt("binary library not followed by class or array"));
    }
    log::trace!("decoding {record_type:?} at offset {offset} (BinaryLibrary payload)");
    let payload = super::decode_record(ctx, record_type)?;

    Ok(Node::aggregate_with("Class", vec![library, payload]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::ByteSource;

    #[test]
    fn library_followed_by_class_with_id_composes_aggregate() {
        let layout = crate::metadata::ClassLayout {
            count: 0,
            names: vec![],
            binary_types: vec![],
            primitive_types: vec![],
        };
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes()); // LibraryId
        bytes.push(4);
        bytes.extend_from_slice(b"Test"); // LibraryName
        bytes.push(1); // RecordType::ClassWithId tag
        bytes.extend_from_slice(&9i32.to_le_bytes()); // ObjectId
        bytes.extend_from_slice(&7i32.to_le_bytes()); // MetadataId

        let mut ctx = Context::new(ByteSource::new(&bytes));
        ctx.metadata.put(7, layout);
        let node = decode(&mut ctx).unwrap();
        assert_eq!(node.name(), "Class");
    }

    #[test]
    fn library_not_followed_by_class_or_array_is_corrupt() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.push(0); // empty LibraryName
        bytes.push(11); // RecordType::MessageEnd tag
        let mut ctx = Context::new(ByteSource::new(&bytes));
        assert!(matches!(decode(&mut ctx), Err(NrbfError::Corrupt(_))));
    }
}
