//! `BinaryObjectString` (record type 6): an `ObjectId` plus a length-prefixed
//! string value — the only record that carries a string directly, rather
//! than through a `PrimitiveType` tag.

use crate::context::Context;
use crate::error::Result;
use crate::node::Node;
use crate::primitive::read_raw_string;

pub fn decode_binary_object_string(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let value = read_raw_string(&mut ctx.src)?;

    Ok(Node::aggregate_with(
        "BinaryObjectString",
        vec![Node::leaf("ObjectId", object_id.to_string()), Node::leaf("Value", value)],
    ))
}
