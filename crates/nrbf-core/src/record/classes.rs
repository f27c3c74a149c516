//! Class records: the metadata block shared by `SystemClassWithMembersAndTypes`
//! and `ClassWithMembersAndTypes`, the polymorphic per-member decode rule,
//! and `ClassWithId`'s replay of a previously captured layout.

use crate::binary_type::BinaryType;
use crate::context::Context;
use crate::error::{NrbfError, Result};
use crate::metadata::ClassLayout;
use crate::node::Node;
use crate::primitive::{read_primitive_typed, read_raw_string, PrimitiveType};

/// The raw metadata block read by §4.6's "Class metadata block" rule:
/// `count` names, then `count` binary-type tags, then each tag's
/// conditional extra bytes (a class name is read and discarded here — it
/// identifies the member's declared type on the wire but carries no
/// further information this decoder needs once the member value itself is
/// decoded recursively).
pub struct ClassMetadataBlock {
    pub names: Vec<String>,
    pub binary_types: Vec<BinaryType>,
    pub primitive_types: Vec<Option<PrimitiveType>>,
}

impl ClassMetadataBlock {
    fn into_layout(self) -> ClassLayout {
        ClassLayout {
            count: self.names.len(),
            names: self.names,
            binary_types: self.binary_types,
            primitive_types: self.primitive_types,
        }
    }
}

/// Read one class metadata block: `count: i32` (must be `>= 0`), then
/// `count` member names, then `count` binary-type tags, then each tag's
/// conditional extra bytes.
pub fn read_class_metadata_block(ctx: &mut Context<'_>) -> Result<ClassMetadataBlock> {
    let count = ctx.src.read::<i32>()?;
    if count < 0 {
        return Err(NrbfError::corrupt(format!("negative member count: {count}")));
    }
    let count = count as usize;

    let mut names = Vec::with_capacity(count);
    for _ in 0..count {
        names.push(read_raw_string(&mut ctx.src)?);
    }

    let mut binary_types = Vec::with_capacity(count);
    for _ in 0..count {
        binary_types.push(BinaryType::from_u8(ctx.src.read::<u8>()?)?);
    }

    let mut primitive_types = Vec::with_capacity(count);
    for &binary_type in &binary_types {
        let primitive_type = match binary_type {
            BinaryType::Primitive | BinaryType::PrimitiveArray => {
                Some(PrimitiveType::from_u8(ctx.src.read::<u8>()?)?)
            }
            BinaryType::SystemClass => {
                let _class_name = read_raw_string(&mut ctx.src)?;
                None
            }
            BinaryType::Class => {
                let _class_name = read_raw_string(&mut ctx.src)?;
                let _library_id = ctx.src.read::<i32>()?;
                None
            }
            BinaryType::String | BinaryType::Object | BinaryType::ObjectArray | BinaryType::StringArray => {
                None
            }
        };
        primitive_types.push(primitive_type);
    }

    Ok(ClassMetadataBlock { names, binary_types, primitive_types })
}

/// Decode one member's value given its binary type and (if primitive) its
/// primitive type, per §4.6's member-decoding rule.
pub fn read_member(
    ctx: &mut Context<'_>,
    name: &str,
    binary_type: BinaryType,
    primitive_type: Option<PrimitiveType>,
) -> Result<Node> {
    match binary_type {
        BinaryType::Primitive => {
            let primitive_type = primitive_type
                .ok_or_else(|| NrbfError::corrupt("primitive member is missing its primitive type"))?;
            read_primitive_typed(&mut ctx.src, name, primitive_type)
        }
        BinaryType::String
        | BinaryType::Object
        | BinaryType::SystemClass
        | BinaryType::Class
        | BinaryType::PrimitiveArray => {
            let node = super::read_record(ctx)?;
            Ok(node.renamed(name))
        }
        BinaryType::ObjectArray | BinaryType::StringArray => Err(NrbfError::not_implemented(
            format!("member binary type {binary_type:?}"),
        )),
    }
}

fn read_members(ctx: &mut Context<'_>, layout: &ClassLayout) -> Result<Node> {
    let mut members = Vec::with_capacity(layout.count);
    for i in 0..layout.count {
        members.push(read_member(ctx, &layout.names[i], layout.binary_types[i], layout.primitive_types[i])?);
    }
    Ok(Node::aggregate_with("Members", members))
}

/// `SystemClassWithMembersAndTypes` (record type 4).
pub fn decode_system_class_with_members_and_types(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let object_name = read_raw_string(&mut ctx.src)?;
    let layout = read_class_metadata_block(ctx)?.into_layout();

    log::debug!("recording class metadata for ObjectID {object_id} ({} members)", layout.count);
    ctx.metadata.put(object_id, layout.clone());

    let members = read_members(ctx, &layout)?;
    Ok(Node::aggregate_with(
        "SystemClassWithMembersAndTypes",
        vec![
            Node::leaf("ObjectId", object_id.to_string()),
            Node::leaf("ObjectName", object_name),
            members,
        ],
    ))
}

/// `ClassWithMembersAndTypes` (record type 5): as `SystemClassWithMembersAndTypes`,
/// plus a `LibraryId` read between the metadata block and the member values.
pub fn decode_class_with_members_and_types(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let object_name = read_raw_string(&mut ctx.src)?;
    let layout = read_class_metadata_block(ctx)?.into_layout();
    let library_id = ctx.src.read::<i32>()?;

    log::debug!("recording class metadata for ObjectID {object_id} ({} members)", layout.count);
    ctx.metadata.put(object_id, layout.clone());

    let members = read_members(ctx, &layout)?;
    Ok(Node::aggregate_with(
        "ClassWithMembersAndTypes",
        vec![
            Node::leaf("ObjectId", object_id.to_string()),
            Node::leaf("ObjectName", object_name),
            Node::leaf("LibraryId", library_id.to_string()),
            members,
        ],
    ))
}

/// `ClassWithId` (record type 1): replays the layout captured earlier
/// under `MetadataId`, then aliases `ObjectId` to that same layout.
pub fn decode_class_with_id(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let metadata_id = ctx.src.read::<i32>()?;
    let layout = ctx.metadata.get(metadata_id)?;

    let members = read_members(ctx, &layout)?;
    log::debug!("aliasing ObjectID {object_id} to metadata {metadata_id}");
    ctx.metadata.alias(object_id, metadata_id)?;

    Ok(Node::aggregate_with(
        "ClassWithId",
        vec![
            Node::leaf("ObjectId", object_id.to_string()),
            Node::leaf("MetadataId", metadata_id.to_string()),
            members,
        ],
    ))
}
