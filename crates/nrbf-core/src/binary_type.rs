//! `BinaryType` governs how a class member's value (or an array's element)
//! is encoded on the wire, plus whatever extra type information that shape
//! conditionally carries.

use crate::context::Context;
use crate::error::{NrbfError, Result};
use crate::primitive::{read_raw_string, PrimitiveType};

/// The 8 member/element shapes NRBF distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryType {
    Primitive = 0,
    String = 1,
    Object = 2,
    SystemClass = 3,
    Class = 4,
    ObjectArray = 5,
    StringArray = 6,
    PrimitiveArray = 7,
}

impl BinaryType {
    /// Decode the tag byte, failing for anything outside `0..=7`.
    pub fn from_u8(tag: u8) -> Result<Self> {
        Ok(match tag {
            0 => BinaryType::Primitive,
            1 => BinaryType::String,
            2 => BinaryType::Object,
            3 => BinaryType::SystemClass,
            4 => BinaryType::Class,
            5 => BinaryType::ObjectArray,
            6 => BinaryType::StringArray,
            7 => BinaryType::PrimitiveArray,
            other => {
                return Err(NrbfError::not_implemented(format!("unknown binary type: {other}")))
            }
        })
    }
}

/// The extra information a [`BinaryType`] conditionally carries: a
/// primitive tag for `Primitive`/`PrimitiveArray`, a class name for
/// `SystemClass`, or a class name plus library id for `Class`. The other
/// binary types need no extra information at the descriptor site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraTypeInfo {
    None,
    Primitive(PrimitiveType),
    SystemClass { class_name: String },
    Class { class_name: String, library_id: i32 },
}

/// A member's full descriptor: its shape plus any conditional extra info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTypeDescriptor {
    pub binary_type: BinaryType,
    pub extra: ExtraTypeInfo,
}

/// Read one [`BinaryType`] tag byte and its conditional extra bytes, per
/// the class-member descriptor rules (spec.md §3 "Binary type descriptor").
pub fn read_binary_type_descriptor(ctx: &mut Context<'_>) -> Result<BinaryTypeDescriptor> {
    let binary_type = BinaryType::from_u8(ctx.src.read::<u8>()?)?;
    let extra = match binary_type {
        BinaryType::Primitive | BinaryType::PrimitiveArray => {
            ExtraTypeInfo::Primitive(PrimitiveType::from_u8(ctx.src.read::<u8>()?)?)
        }
        BinaryType::SystemClass => {
            ExtraTypeInfo::SystemClass { class_name: read_raw_string(&mut ctx.src)? }
        }
        BinaryType::Class => {
            let class_name = read_raw_string(&mut ctx.src)?;
            let library_id = ctx.src.read::<i32>()?;

            ExtraTypeInfo::Class { class_name, library_id }
        }
        BinaryType::String
        | BinaryType::Object
        | BinaryType::ObjectArray
        | BinaryType::StringArray => ExtraTypeInfo::None,
    };
    Ok(BinaryTypeDescriptor { binary_type, extra })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::ByteSource;

    #[test]
    fn primitive_descriptor_reads_type_tag() {
        let mut ctx = Context::new(ByteSource::new(&[0, 8])); // Primitive, Int32
        let d = read_binary_type_descriptor(&mut ctx).unwrap();
        assert_eq!(d.binary_type, BinaryType::Primitive);
        assert_eq!(d.extra, ExtraTypeInfo::Primitive(PrimitiveType::Int32));
    }

    #[test]
    fn string_descriptor_has_no_extra() {
        let mut ctx = Context::new(ByteSource::new(&[1]));
        let d = read_binary_type_descriptor(&mut ctx).unwrap();
        assert_eq!(d.extra, ExtraTypeInfo::None);
    }

    #[test]
    fn unknown_tag_is_not_implemented() {
        let mut ctx = Context::new(ByteSource::new(&[9]));
        assert!(matches!(
            read_binary_type_descriptor(&mut ctx),
            Err(NrbfError::NotImplemented(_))
        ));
    }
}
