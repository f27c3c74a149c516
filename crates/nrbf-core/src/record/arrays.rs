//! Array records: the general `BinaryArray` (rank/bounds/offsets plus a
//! shared element-type descriptor) and the three `ArraySingle*` shortcuts
//! for a 1-D, zero-based array of one fixed element kind.

use crate::binary_type::{read_binary_type_descriptor, BinaryType, ExtraTypeInfo};
use crate::context::Context;
use crate::error::{NrbfError, Result};
use crate::node::Node;
use crate::primitive::read_primitive_typed;
use crate::record::{read_member, read_record};

/// `BinaryArrayType` (0..=5): the array's shape, independent of its
/// element type. The three `*Offset` variants additionally carry
/// `LowerBounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryArrayType {
    Single,
    Jagged,
    Rectangular,
    SingleOffset,
    JaggedOffset,
    RectangularOffset,
}

impl BinaryArrayType {
    fn from_u8(tag: u8) -> Result<Self> {
        Ok(match tag {
            0 => BinaryArrayType::Single,
            1 => BinaryArrayType::Jagged,
            2 => BinaryArrayType::Rectangular,
            3 => BinaryArrayType::SingleOffset,
            4 => BinaryArrayType::JaggedOffset,
            5 => BinaryArrayType::RectangularOffset,
            other => {
                return Err(NrbfError::not_implemented(format!("unknown binary array type: {other}")))
            }
        })
    }

    fn has_lower_bounds(self) -> bool {
        matches!(
            self,
            BinaryArrayType::SingleOffset
                | BinaryArrayType::JaggedOffset
                | BinaryArrayType::RectangularOffset
        )
    }

    fn name(self) -> &'static str {
        match self {
            BinaryArrayType::Single => "Single",
            BinaryArrayType::Jagged => "Jagged",
            BinaryArrayType::Rectangular => "Rectangular",
            BinaryArrayType::SingleOffset => "SingleOffset",
            BinaryArrayType::JaggedOffset => "JaggedOffset",
            BinaryArrayType::RectangularOffset => "RectangularOffset",
        }
    }
}

/// Decode the element descriptor's shape (`BinaryType` plus extras) into
/// the `(binary_type, primitive_type)` pair `read_member` expects.
fn element_descriptor(ctx: &mut Context<'_>) -> Result<(BinaryType, Option<crate::primitive::PrimitiveType>)> {
    let descriptor = read_binary_type_descriptor(ctx)?;
    let primitive_type = match descriptor.extra {
        ExtraTypeInfo::Primitive(p) => Some(p),
        _ => None,
    };
    Ok((descriptor.binary_type, primitive_type))
}

/// `BinaryArray` (7).
pub fn decode_binary_array(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let array_type = BinaryArrayType::from_u8(ctx.src.read::<u8>()?)?;

    let rank = ctx.src.read::<i32>()?;
    if rank < 0 {
        return Err(NrbfError::corrupt(format!("negative array rank: {rank}")));
    }
    let rank = rank as usize;

    let mut dimensions = Vec::with_capacity(rank);
    for _ in 0..rank {
        let dim = ctx.src.read::<i32>()?;
        if dim < 0 {
            return Err(NrbfError::corrupt(format!("negative array dimension: {dim}")));
        }
        dimensions.push(dim as usize);
    }

    let lower_bounds = if array_type.has_lower_bounds() {
        let mut bounds = Vec::with_capacity(rank);
        for _ in 0..rank {
            bounds.push(ctx.src.read::<i32>()?);
        }
        Some(bounds)
    } else {
        None
    };

    let element_count = dimensions.iter().try_fold(1usize, |acc, &d| {
        acc.checked_mul(d)
            .filter(|&n| n <= ctx.src.remaining())
            .ok_or_else(|| NrbfError::corrupt("array element count exceeds remaining bytes"))
    })?;

    let (binary_type, primitive_type) = element_descriptor(ctx)?;

    let mut elements = Vec::with_capacity(element_count);
    for i in 0..element_count {
        elements.push(read_member(ctx, &i.to_string(), binary_type, primitive_type)?);
    }

    let mut children = vec![
        Node::leaf("ObjectId", object_id.to_string()),
        Node::leaf("BinaryArrayType", array_type.name()),
        Node::leaf("Rank", rank.to_string()),
        Node::aggregate_with(
            "Dimensions",
            dimensions.iter().map(|d| Node::leaf("Length", d.to_string())).collect(),
        ),
    ];
    if let Some(bounds) = lower_bounds {
        children.push(Node::aggregate_with(
            "LowerBounds",
            bounds.iter().map(|b| Node::leaf("LowerBound", b.to_string())).collect(),
        ));
    }
    children.push(Node::aggregate_with("Elements", elements));

    Ok(Node::aggregate_with("BinaryArray", children))
}

/// `ArraySinglePrimitive` (15): a 1-D array of one primitive type.
pub fn decode_array_single_primitive(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let length = read_array_length(ctx)?;
    let primitive_type = crate::primitive::PrimitiveType::from_u8(ctx.src.read::<u8>()?)?;

    let mut elements = Vec::with_capacity(length);
    for i in 0..length {
        elements.push(read_primitive_typed(&mut ctx.src, &i.to_string(), primitive_type)?);
    }

    Ok(Node::aggregate_with(
        "ArraySinglePrimitive",
        vec![
            Node::leaf("ObjectId", object_id.to_string()),
            Node::leaf("Length", length.to_string()),
            Node::aggregate_with("Elements", elements),
        ],
    ))
}

/// `ArraySingleObject` (16): a 1-D array of nested records.
pub fn decode_array_single_object(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let length = read_array_length(ctx)?;

    let mut elements = Vec::with_capacity(length);
    for i in 0..length {
        elements.push(read_record(ctx)?.renamed(i.to_string()));
    }

    Ok(Node::aggregate_with(
        "ArraySingleObject",
        vec![
            Node::leaf("ObjectId", object_id.to_string()),
            Node::leaf("Length", length.to_string()),
            Node::aggregate_with("Elements", elements),
        ],
    ))
}

/// `ArraySingleString` (17): a 1-D array whose elements are each a
/// `BinaryObjectString`, a `MemberReference`, or an `ObjectNull*` variant.
pub fn decode_array_single_string(ctx: &mut Context<'_>) -> Result<Node> {
    let object_id = ctx.src.read::<i32>()?;
    let length = read_array_length(ctx)?;

    let mut elements = Vec::with_capacity(length);
    for i in 0..length {
        elements.push(read_record(ctx)?.renamed(i.to_string()));
    }

    Ok(Node::aggregate_with(
        "ArraySingleString",
        vec![
            Node::leaf("ObjectId", object_id.to_string()),
            Node::leaf("Length", length.to_string()),
            Node::aggregate_with("Elements", elements),
        ],
    ))
}

fn read_array_length(ctx: &mut Context<'_>) -> Result<usize> {
    let length = ctx.src.read::<i32>()?;
    if length < 0 {
        return Err(NrbfError::corrupt(format!("negative array length: {length}")));
    }
    let length = length as usize;
    if length > ctx.src.remaining() {
        return Err(NrbfError::corrupt("array length exceeds remaining bytes"));
    }
    Ok(length)
}
