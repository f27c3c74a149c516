//! `MethodCall` (21) and `MethodReturn` (22): remoting call records whose
//! shape is governed by a `Flags` bitmask rather than a fixed layout.

use bitflags::bitflags;

use crate::context::Context;
use crate::error::{NrbfError, Result};
use crate::node::Node;
use crate::primitive::{read_primitive_typed, read_raw_string, PrimitiveType};

bitflags! {
    /// The `Flags` bitmask governing which optional fields a `MethodCall`
    /// or `MethodReturn` record carries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MessageFlags: u32 {
        const NO_ARGS = 0x0001;
        const ARGS_INLINE = 0x0002;
        const ARGS_IS_ARRAY = 0x0004;
        const ARGS_IN_ARRAY = 0x0008;
        const NO_CONTEXT = 0x0010;
        const CONTEXT_INLINE = 0x0020;
        const CONTEXT_IN_ARRAY = 0x0040;
        const METHOD_SIGNATURE_IN_ARRAY = 0x0080;
        const PROPERTIES_IN_ARRAY = 0x0100;
        const NO_RETURN_VALUE = 0x0200;
        const RETURN_VALUE_VOID = 0x0400;
        const RETURN_VALUE_INLINE = 0x0800;
        const RETURN_VALUE_IN_ARRAY = 0x1000;
        const EXCEPTION_IN_ARRAY = 0x2000;
        const GENERIC_METHOD = 0x8000;
    }
}

/// An "array of value with code": a length-prefixed sequence of
/// `(PrimitiveType, value)` pairs, used for `ArgsInline`.
fn read_inline_value_array(ctx: &mut Context<'_>, name: &str) -> Result<Node> {
    let count = ctx.src.read::<i32>()?;
    if count < 0 {
        return Err(NrbfError::corrupt(format!("negative inline value count: {count}")));
    }
    let mut values = Vec::with_capacity(count as usize);
    for i in 0..count {
        let primitive_type = PrimitiveType::from_u8(ctx.src.read::<u8>()?)?;
        values.push(read_primitive_typed(&mut ctx.src, &i.to_string(), primitive_type)?);
    }
    Ok(Node::aggregate_with(name, values))
}

/// `MethodCall` (21).
pub fn decode_method_call(ctx: &mut Context<'_>) -> Result<Node> {
    let flags = MessageFlags::from_bits_truncate(ctx.src.read::<u32>()?);
    let method_name = read_raw_string(&mut ctx.src)?;
    let type_name = read_raw_string(&mut ctx.src)?;

    let mut children = vec![
        Node::leaf("MessageEnum", flags.bits().to_string()),
        Node::leaf("MethodName", method_name),
        Node::leaf("TypeName", type_name),
    ];

    if flags.contains(MessageFlags::CONTEXT_INLINE) {
        children.push(read_primitive_typed(&mut ctx.src, "CallContext", PrimitiveType::String)?);
    } else {
        children.push(Node::empty_leaf("CallContext"));
    }

    if flags.contains(MessageFlags::ARGS_INLINE) {
        children.push(read_inline_value_array(ctx, "Args")?);
    } else if !flags.contains(MessageFlags::NO_ARGS) {
        children.push(super::read_record(ctx)?.renamed("Args"));
    } else {
        children.push(Node::empty_leaf("Args"));
    }

    Ok(Node::aggregate_with("MethodCall", children))
}

/// `MethodReturn` (22): structurally parallel to `MethodCall`, with
/// return-value flags instead of arg flags. No corpus record of this one
/// has been observed; stubbed per the format's own allowance.
pub fn decode_method_return(_ctx: &mut Context<'_>) -> Result<Node> {
    Err(NrbfError::not_implemented("MethodReturn"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::ByteSource;

    fn string_bytes(s: &str) -> Vec<u8> {
        let mut v = vec![s.len() as u8];
        v.extend_from_slice(s.as_bytes());
        v
    }

    #[test]
    fn no_args_no_context_call_has_placeholders() {
        let mut bytes = Vec::new();
        let flags = MessageFlags::NO_ARGS.bits() | MessageFlags::NO_CONTEXT.bits();
        bytes.extend_from_slice(&flags.to_le_bytes());
        bytes.extend_from_slice(&string_bytes("Foo"));
        bytes.extend_from_slice(&string_bytes("Bar"));

        let mut ctx = Context::new(ByteSource::new(&bytes));
        let node = decode_method_call(&mut ctx).unwrap();
        assert_eq!(
            node,
            Node::aggregate_with(
                "MethodCall",
                vec![
                    Node::leaf("MessageEnum", flags.to_string()),
                    Node::leaf("MethodName", "Foo"),
                    Node::leaf("TypeName", "Bar"),
                    Node::empty_leaf("CallContext"),
                    Node::empty_leaf("Args"),
                ]
            )
        );
    }

    #[test]
    fn inline_context_reads_a_string_primitive() {
        let mut bytes = Vec::new();
        let flags = MessageFlags::NO_ARGS.bits() | MessageFlags::CONTEXT_INLINE.bits();
        bytes.extend_from_slice(&flags.to_le_bytes());
        bytes.extend_from_slice(&string_bytes("Foo"));
        bytes.extend_from_slice(&string_bytes("Bar"));
        bytes.extend_from_slice(&string_bytes("ctx"));

        let mut ctx = Context::new(ByteSource::new(&bytes));
        let node = decode_method_call(&mut ctx).unwrap();
        match node {
            Node::Aggregate { children, .. } => {
                assert_eq!(children[0], Node::leaf("MessageEnum", flags.to_string()));
                assert_eq!(children[3], Node::leaf("CallContext", "ctx"));
            }
            _ => panic!("expected aggregate"),
        }
    }

    #[test]
    fn method_return_is_not_implemented() {
        let mut ctx = Context::new(ByteSource::new(&[]));
        assert!(matches!(decode_method_return(&mut ctx), Err(NrbfError::NotImplemented(_))));
    }
}
