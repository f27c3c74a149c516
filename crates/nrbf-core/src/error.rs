//! Error taxonomy for the decoder: exactly two kinds, per the format's own
//! failure modes — the input is either malformed (`Corrupt`) or it is valid
//! NRBF that exercises a record/type this decoder does not yet handle
//! (`NotImplemented`). Neither is recoverable; both bubble straight up to
//! the caller of [`crate::deserialize`].

use thiserror::Error;

/// Errors produced while decoding an NRBF byte stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NrbfError {
    /// The input violates the wire format: premature EOF, an unresolvable
    /// `ClassWithId` reference, a malformed varint, a `BinaryLibrary` not
    /// followed by a class/array record, an impossible array dimension, ...
    #[error("corrupt NRBF stream: {0}")]
    Corrupt(String),

    /// The input is valid NRBF but uses a record type or binary type this
    /// decoder does not (yet) handle.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl NrbfError {
    /// Build a [`NrbfError::Corrupt`] from anything that prints a message.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        NrbfError::Corrupt(msg.into())
    }

    /// Build a [`NrbfError::NotImplemented`] from anything that prints a message.
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        NrbfError::NotImplemented(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, NrbfError>;
