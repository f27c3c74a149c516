//! `SerializedStreamHeader` (record type 0): four little-endian `i32`s,
//! no side effects on the decoder session state.

use crate::context::Context;
use crate::error::Result;
use crate::node::Node;

pub fn decode(ctx: &mut Context<'_>) -> Result<Node> {
    let root_id = ctx.src.read::<i32>()?;
    let header_id = ctx.src.read::<i32>()?;
    let major_version = ctx.src.read::<i32>()?;
    let minor_version = ctx.src.read::<i32>()?;

    Ok(Node::aggregate_with(
        "SerializedStreamHeader",
        vec![
            Node::leaf("RootId", root_id.to_string()),
            Node::leaf("HeaderId", header_id.to_string()),
            Node::leaf("MajorVersion", major_version.to_string()),
            Node::leaf("MinorVersion", minor_version.to_string()),
        ],
    ))
}
