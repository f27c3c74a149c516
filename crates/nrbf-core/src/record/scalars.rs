//! The small, payload-light records: typed/reference members, nulls, and
//! the message terminator.

use crate::context::Context;
use crate::error::Result;
use crate::node::Node;
use crate::primitive::read_primitive;

/// `MemberPrimitiveTyped` (8): a type tag followed by one primitive value.
pub fn decode_member_primitive_typed(ctx: &mut Context<'_>) -> Result<Node> {
    read_primitive(&mut ctx.src, "MemberPrimitiveTyped")
}

/// `MemberReference` (9): the target id, unresolved.
pub fn decode_member_reference(ctx: &mut Context<'_>) -> Result<Node> {
    let id_ref = ctx.src.read::<i32>()?;
    Ok(Node::leaf("MemberReference", id_ref.to_string()))
}

/// `ObjectNull` (10): no payload.
pub fn decode_object_null(_ctx: &mut Context<'_>) -> Result<Node> {
    Ok(Node::empty_leaf("NullObject"))
}

/// `MessageEnd` (11): no payload.
pub fn decode_message_end(_ctx: &mut Context<'_>) -> Result<Node> {
    Ok(Node::empty_leaf("MessageEnd"))
}

/// `ObjectNullMultiple256` (13): `count: u8` consecutive nulls, represented
/// as a single Leaf carrying the count — the wire consumption (one byte)
/// is fixed regardless of how the nulls are surfaced in the tree.
pub fn decode_object_null_multiple_256(ctx: &mut Context<'_>) -> Result<Node> {
    let count = ctx.src.read::<u8>()?;
    Ok(Node::leaf("NullObjectMultiple256", count.to_string()))
}

/// `ObjectNullMultiple` (14): as (13) with a 32-bit count.
pub fn decode_object_null_multiple(ctx: &mut Context<'_>) -> Result<Node> {
    let count = ctx.src.read::<i32>()?;
    Ok(Node::leaf("NullObjectMultiple", count.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::ByteSource;

    #[test]
    fn member_reference_is_unresolved_leaf() {
        let bytes = 5i32.to_le_bytes();
        let mut ctx = Context::new(ByteSource::new(&bytes));
        assert_eq!(decode_member_reference(&mut ctx).unwrap(), Node::leaf("MemberReference", "5"));
    }

    #[test]
    fn object_null_is_empty_leaf() {
        let mut ctx = Context::new(ByteSource::new(&[]));
        assert_eq!(decode_object_null(&mut ctx).unwrap(), Node::empty_leaf("NullObject"));
    }

    #[test]
    fn message_end_is_empty_leaf() {
        let mut ctx = Context::new(ByteSource::new(&[]));
        assert_eq!(decode_message_end(&mut ctx).unwrap(), Node::empty_leaf("MessageEnd"));
    }

    #[test]
    fn null_multiple_256_reads_one_byte_count() {
        let mut ctx = Context::new(ByteSource::new(&[3]));
        assert_eq!(
            decode_object_null_multiple_256(&mut ctx).unwrap(),
            Node::leaf("NullObjectMultiple256", "3")
        );
    }

    #[test]
    fn null_multiple_reads_four_byte_count() {
        let bytes = 300i32.to_le_bytes();
        let mut ctx = Context::new(ByteSource::new(&bytes));
        assert_eq!(decode_object_null_multiple(&mut ctx).unwrap(), Node::leaf("NullObjectMultiple", "300"));
    }
}
