//! The 17 NRBF primitive kinds, decoded through one generic reader and a
//! single match on [`PrimitiveType`] — no per-type overloads.

use crate::byte_source::ByteSource;
use crate::error::{NrbfError, Result};
use crate::node::Node;

/// The scalar kinds NRBF can tag a member or array element with.
///
/// Tag 4 (`Object` in some descriptions) is unused in the primitive space;
/// the numbering below is the wire numbering from [MS-NRBF], not a dense
/// 1..=17 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PrimitiveType {
    Boolean = 1,
    Byte = 2,
    Char = 3,
    Decimal = 5,
    Double = 6,
    Int16 = 7,
    Int32 = 8,
    Int64 = 9,
    SByte = 10,
    Single = 11,
    TimeSpan = 12,
    DateTime = 13,
    UInt16 = 14,
    UInt32 = 15,
    UInt64 = 16,
    Null = 17,
    String = 18,
}

impl PrimitiveType {
    /// Decode the tag byte into a [`PrimitiveType`], failing for reserved
    /// or unknown values (4, 0, and anything above 18).
    pub fn from_u8(tag: u8) -> Result<Self> {
        Ok(match tag {
            1 => PrimitiveType::Boolean,
            2 => PrimitiveType::Byte,
            3 => PrimitiveType::Char,
            5 => PrimitiveType::Decimal,
            6 => PrimitiveType::Double,
            7 => PrimitiveType::Int16,
            8 => PrimitiveType::Int32,
            9 => PrimitiveType::Int64,
            10 => PrimitiveType::SByte,
            11 => PrimitiveType::Single,
            12 => PrimitiveType::TimeSpan,
            13 => PrimitiveType::DateTime,
            14 => PrimitiveType::UInt16,
            15 => PrimitiveType::UInt32,
            16 => PrimitiveType::UInt64,
            17 => PrimitiveType::Null,
            18 => PrimitiveType::String,
            other => {
                return Err(NrbfError::not_implemented(format!(
                    "unknown primitive type: {other}"
                )))
            }
        })
    }
}

/// Read one byte as a [`PrimitiveType`] tag, then decode the value it
/// introduces into a [`Node::Leaf`] named `name`.
pub fn read_primitive(src: &mut ByteSource<'_>, name: &str) -> Result<Node> {
    let tag = src.read::<u8>()?;
    let primitive_type = PrimitiveType::from_u8(tag)?;
    read_primitive_typed(src, name, primitive_type)
}

/// Decode a value of the given, already-known [`PrimitiveType`] into a
/// [`Node::Leaf`] named `name`. Used when the surrounding record has
/// already consumed the type tag (e.g. array element types).
pub fn read_primitive_typed(
    src: &mut ByteSource<'_>,
    name: &str,
    primitive_type: PrimitiveType,
) -> Result<Node> {
    use PrimitiveType as P;
    let value = match primitive_type {
        P::Boolean => (src.read::<u8>()? != 0).to_string(),
        P::Byte => src.read::<u8>()?.to_string(),
        P::SByte => src.read::<i8>()?.to_string(),
        P::Char => read_char(src)?,
        P::Decimal => read_decimal_string(src)?,
        P::Double => src.read::<f64>()?.to_string(),
        P::Single => src.read::<f32>()?.to_string(),
        P::Int16 => src.read::<i16>()?.to_string(),
        P::UInt16 => src.read::<u16>()?.to_string(),
        P::Int32 => src.read::<i32>()?.to_string(),
        P::UInt32 => src.read::<u32>()?.to_string(),
        P::Int64 => src.read::<i64>()?.to_string(),
        P::UInt64 => src.read::<u64>()?.to_string(),
        // NRBF stores TimeSpan/DateTime as raw 64-bit tick counts; this
        // decoder does not interpret the calendar, it just preserves the
        // number for inspection/round-trip purposes.
        P::TimeSpan | P::DateTime => src.read::<i64>()?.to_string(),
        P::Null => return Ok(Node::empty_leaf(name)),
        P::String => read_length_prefixed_string(src)?,
    };
    Ok(Node::leaf(name, value))
}

/// Decode the 7-bit, little-endian base-128 (LEB128) length prefix that
/// precedes every NRBF string payload: up to 5 bytes, each contributing
/// its low 7 bits, terminated by a byte whose high bit is clear.
///
/// The accumulator must NOT be shifted between bytes — each byte's 7 bits
/// land at a fixed position (`7 * i`), which is what makes this
/// little-endian base-128 rather than big-endian.
pub fn read_varint_length(src: &mut ByteSource<'_>) -> Result<usize> {
    let mut value: u32 = 0;
    for i in 0..5 {
        let byte = src.read::<u8>()?;
        value |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value as usize);
        }
    }
    Err(NrbfError::corrupt("string length varint did not terminate within 5 bytes"))
}

fn read_length_prefixed_string(src: &mut ByteSource<'_>) -> Result<String> {
    let length = read_varint_length(src)?;
    if length > src.remaining() {
        return Err(NrbfError::corrupt("string length exceeds remaining bytes"));
    }
    let bytes = src.read_bytes(length)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| NrbfError::corrupt("string payload is not valid UTF-8"))
}

/// Read a raw NRBF string (used directly by record decoders whose field is
/// declared as `String`, without going through the `PrimitiveType` tag).
pub fn read_raw_string(src: &mut ByteSource<'_>) -> Result<String> {
    read_length_prefixed_string(src)
}

fn read_char(src: &mut ByteSource<'_>) -> Result<String> {
    let lead = src.read::<u8>()?;
    let extra = if lead & 0x80 == 0 {
        0
    } else if lead & 0xE0 == 0xC0 {
        1
    } else if lead & 0xF0 == 0xE0 {
        2
    } else if lead & 0xF8 == 0xF0 {
        3
    } else {
        return Err(NrbfError::corrupt("invalid UTF-8 lead byte for Char"));
    };
    let mut buf = vec![lead];
    if extra > 0 {
        buf.extend_from_slice(src.read_bytes(extra)?);
    }
    String::from_utf8(buf).map_err(|_| NrbfError::corrupt("invalid UTF-8 Char"))
}

/// NRBF's canonical Decimal wire form is a length-prefixed ASCII string
/// (the same shape as `String`). This decoder keeps it opaque rather than
/// parsing it into a float, to avoid silently losing precision.
fn read_decimal_string(src: &mut ByteSource<'_>) -> Result<String> {
    read_length_prefixed_string(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_decodes() {
        let mut src = ByteSource::new(&[1]);
        let n = read_primitive_typed(&mut src, "v", PrimitiveType::Boolean).unwrap();
        assert_eq!(n, Node::leaf("v", "true"));
    }

    #[test]
    fn int32_little_endian() {
        let mut src = ByteSource::new(&1i32.to_le_bytes());
        let n = read_primitive_typed(&mut src, "v", PrimitiveType::Int32).unwrap();
        assert_eq!(n, Node::leaf("v", "1"));
    }

    #[test]
    fn short_string_roundtrips() {
        let mut bytes = vec![5u8];
        bytes.extend_from_slice(b"Hello");
        let mut src = ByteSource::new(&bytes);
        let n = read_primitive_typed(&mut src, "v", PrimitiveType::String).unwrap();
        assert_eq!(n, Node::leaf("v", "Hello"));
    }

    #[test]
    fn long_string_uses_two_byte_varint() {
        let payload = vec![b'x'; 200];
        let mut bytes = vec![0xC8, 0x01]; // 200 as LEB128
        bytes.extend_from_slice(&payload);
        let mut src = ByteSource::new(&bytes);
        let len = read_varint_length(&mut ByteSource::new(&bytes[..2])).unwrap();
        assert_eq!(len, 200);
        let n = read_primitive_typed(&mut src, "v", PrimitiveType::String).unwrap();
        assert_eq!(n, Node::leaf("v", String::from_utf8(payload).unwrap()));
    }

    #[test]
    fn varint_rejects_five_bytes_all_continuation() {
        let mut src = ByteSource::new(&[0x80, 0x80, 0x80, 0x80, 0x80]);
        assert!(read_varint_length(&mut src).is_err());
    }

    #[test]
    fn null_primitive_is_empty_leaf() {
        let mut src = ByteSource::new(&[]);
        let n = read_primitive_typed(&mut src, "v", PrimitiveType::Null).unwrap();
        assert_eq!(n, Node::empty_leaf("v"));
    }

    #[test]
    fn unknown_primitive_tag_is_not_implemented() {
        let mut src = ByteSource::new(&[0]);
        assert!(matches!(
            read_primitive(&mut src, "v"),
            Err(NrbfError::NotImplemented(_))
        ));
    }

    proptest::proptest! {
        #[test]
        fn varint_roundtrips_for_all_u32(v in 0u32..=u32::MAX) {
            let mut bytes = Vec::new();
            let mut remaining = v;
            loop {
                let mut byte = (remaining & 0x7F) as u8;
                remaining >>= 7;
                if remaining != 0 {
                    byte |= 0x80;
                    bytes.push(byte);
                } else {
                    bytes.push(byte);
                    break;
                }
            }
            let mut src = ByteSource::new(&bytes);
            let decoded = read_varint_length(&mut src).unwrap();
            proptest::prop_assert_eq!(decoded as u64, v as u64);
        }
    }
}
