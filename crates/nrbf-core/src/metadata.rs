//! Class layouts recorded once (by `SystemClassWithMembersAndTypes` /
//! `ClassWithMembersAndTypes`) and replayed later (by `ClassWithId`),
//! keyed by the 32-bit signed ObjectId the defining record was tagged with.

use std::collections::HashMap;
use std::rc::Rc;

use crate::binary_type::BinaryType;
use crate::error::{NrbfError, Result};
use crate::primitive::PrimitiveType;

/// A recorded member layout: names, their wire shapes, and — for
/// primitive-shaped members — which primitive they carry. `count` is
/// `names.len()` and is kept as a field mainly so call sites can assert it
/// against the wire `count` without recomputing a `Vec::len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLayout {
    pub count: usize,
    pub names: Vec<String>,
    pub binary_types: Vec<BinaryType>,
    pub primitive_types: Vec<Option<PrimitiveType>>,
}

/// Maps ObjectId → [`ClassLayout`], so a later `ClassWithId` can decode its
/// members against a layout captured earlier in the stream. No eviction:
/// layouts are small and bounded by the number of distinct classes used in
/// one message.
#[derive(Debug, Default)]
pub struct ClassMetadataCache {
    layouts: HashMap<i32, Rc<ClassLayout>>,
}

impl ClassMetadataCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { layouts: HashMap::new() }
    }

    /// Record a layout under `object_id`. The format never redefines an
    /// id within one message, but a repeated `put` is not treated as an
    /// error — it simply overwrites.
    pub fn put(&mut self, object_id: i32, layout: ClassLayout) {
        self.layouts.insert(object_id, Rc::new(layout));
    }

    /// Look up the layout recorded for `object_id`.
    pub fn get(&self, object_id: i32) -> Result<Rc<ClassLayout>> {
        self.layouts
            .get(&object_id)
            .cloned()
            .ok_or_else(|| NrbfError::corrupt(format!("bad reference to ObjectID {object_id}")))
    }

    /// Record `new_id` as referring to the same layout already recorded
    /// under `existing_id` (used once a `ClassWithId` record has bound
    /// itself to a prior metadata id).
    pub fn alias(&mut self, new_id: i32, existing_id: i32) -> Result<()> {
        let layout = self.get(existing_id)?;
        self.layouts.insert(new_id, layout);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(names: &[&str]) -> ClassLayout {
        ClassLayout {
            count: names.len(),
            names: names.iter().map(|s| s.to_string()).collect(),
            binary_types: vec![BinaryType::Primitive; names.len()],
            primitive_types: vec![Some(PrimitiveType::Int32); names.len()],
        }
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut cache = ClassMetadataCache::new();
        cache.put(7, layout(&["a", "b"]));
        let got = cache.get(7).unwrap();
        assert_eq!(got.names, vec!["a", "b"]);
    }

    #[test]
    fn get_missing_id_is_corrupt() {
        let cache = ClassMetadataCache::new();
        assert!(matches!(cache.get(42), Err(NrbfError::Corrupt(_))));
    }

    #[test]
    fn alias_shares_the_same_layout() {
        let mut cache = ClassMetadataCache::new();
        cache.put(1, layout(&["x"]));
        cache.alias(2, 1).unwrap();
        assert_eq!(cache.get(2).unwrap().names, cache.get(1).unwrap().names);
    }

    #[test]
    fn alias_of_missing_id_is_corrupt() {
        let mut cache = ClassMetadataCache::new();
        assert!(cache.alias(2, 1).is_err());
    }
}
