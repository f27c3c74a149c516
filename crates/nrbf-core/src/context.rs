//! The per-`deserialize`-call session state: the byte source and the class
//! metadata cache, threaded explicitly through every decoder. No ambient
//! or global state — this is what makes decoding naturally reentrant and
//! each session fully isolated from any other.

use crate::byte_source::ByteSource;
use crate::metadata::ClassMetadataCache;

/// Owns everything one `deserialize` call needs: the cursor over the input
/// buffer and the class metadata recorded so far. Created at the start of
/// [`crate::deserialize`] and dropped at return.
pub struct Context<'a> {
    pub src: ByteSource<'a>,
    pub metadata: ClassMetadataCache,
}

impl<'a> Context<'a> {
    /// Start a fresh session over `src` with an empty metadata cache.
    pub fn new(src: ByteSource<'a>) -> Self {
        Self { src, metadata: ClassMetadataCache::new() }
    }
}
