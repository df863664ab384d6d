//! Fixture data model
//!
//! The recursively-structured aggregate every codec comparison runs on.
//! Only features that parse well across all registered backends are used
//! here: maps are string-keyed by default (several target formats only
//! support string keys), floats are always finite, and the
//! composition-style embedded aggregate is a regular named field rather
//! than a flattened one, because flattening serializes through
//! unknown-length maps that the binary backends reject.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named string alias, verifying named-type round-trips
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapString(pub String);

/// A named integer alias
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapU64(pub u64);

/// A named sequence of named integers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapU64Vec(pub Vec<WrapU64>);

/// A named sequence of named strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapStringVec(pub Vec<WrapString>);

/// A named string-keyed mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WrapStrU64Map(pub HashMap<String, u64>);

/// A small string/integer pair used in sequences and mappings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringU64Pair {
    /// String half of the pair
    pub s: String,
    /// Integer half of the pair
    pub u: u64,
}

/// Minimal embedded aggregate held behind an owning reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlimFields {
    /// A plain string
    pub sa: String,
    /// An optional string, exercising absent-vs-present encoding
    pub pa: Option<String>,
}

/// Sub-aggregate embedded twice in [`CommonFields`]: once
/// composition-style (`anon`) and once as a named field (`not_anon`),
/// exercising flattened vs. nested field promotion across formats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonFields {
    /// Repeated base string
    pub a_str: String,
    /// Signed 64-bit value
    pub a_i64: i64,
    /// Signed 16-bit value
    pub a_i16: i16,
    /// Unsigned 64-bit value
    pub a_u64: u64,
    /// Strings including escapes and astral-plane characters
    pub a_str_vec: Vec<String>,
    /// Signed integers pinned at every width boundary
    pub a_i64_vec: Vec<i64>,
    /// Unsigned integers pinned at every width boundary
    pub a_u64_vec: Vec<u64>,
    /// Doubles requiring full-precision parsing; never NaN or infinite
    pub a_f64_vec: Vec<f64>,
    /// Single-precision floats requiring full-precision parsing
    pub a_f32_vec: Vec<f32>,
    /// String-to-string mapping
    pub a_str_map: HashMap<String, String>,
    /// String-to-integer mapping
    pub a_u64_map: HashMap<String, u64>,
    /// Fixed-size array field
    pub a_i64_arr8: [i64; 8],
    /// Zero-length array, exercising empty fixed-size encoding
    pub a_i64_arr0: [i64; 0],
    /// Zero-length sequence (present but empty)
    pub a_i64_vec0: Vec<i64>,
    /// Explicitly-absent sequence
    pub a_u64_vec_nil: Option<Vec<u64>>,
    /// Explicitly-absent mapping
    pub a_u64_map_nil: Option<HashMap<String, u64>>,
    /// Present-but-empty mapping, distinct from the absent one above
    pub a_u64_map_empty: HashMap<String, u64>,
}

/// Subset of [`CommonFields`], nested to exercise one level of named
/// sub-aggregate encoding with values parallel to the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleFields {
    /// Repeated canonical sentence
    pub s: String,
    /// Signed 64-bit value near the width boundary
    pub i64_val: i64,
    /// Signed 8-bit value near the width boundary
    pub i8_val: i8,
    /// Unsigned 64-bit value near the width boundary
    pub u64_val: u64,
    /// Unsigned 8-bit value near the width boundary
    pub u8_val: u8,
    /// Double-precision float
    pub f64_val: f64,
    /// Single-precision float
    pub f32_val: f32,
    /// Boolean flag
    pub flag: bool,
    /// Repeated strings
    pub str_vec: Vec<String>,
    /// Signed 32-bit sequence
    pub i32_vec: Vec<i32>,
    /// Unsigned 64-bit sequence
    pub u64_vec: Vec<u64>,
    /// Byte-width sequence
    pub u8_vec: Vec<u8>,
    /// Boolean sequence
    pub bool_vec: Vec<bool>,
    /// Sparse sequence of optional integers; left empty here
    pub opt_i64_vec: Vec<Option<i64>>,
    /// String-keyed integer mapping
    pub str_i64_map: HashMap<String, i64>,
}

/// The non-recursive bulk of the fixture: scalars at width boundaries,
/// sequences, mappings, embedded aggregates, and deliberate
/// empty/absent collection fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonFields {
    /// The canonical sentence repeated `repeat_factor` times
    pub s: String,

    /// Two-thirds of `i64::MAX`
    pub i64_val: i64,
    /// Two-thirds of `i32::MAX`
    pub i32_val: i32,
    /// Two-thirds of `i16::MAX`
    pub i16_val: i16,
    /// Two-thirds of `i8::MAX`
    pub i8_val: i8,

    /// Two-thirds of `i64::MIN`
    pub i64_neg: i64,
    /// Two-thirds of `i32::MIN`
    pub i32_neg: i32,
    /// Two-thirds of `i16::MIN`
    pub i16_neg: i16,
    /// Two-thirds of `i8::MIN`
    pub i8_neg: i8,

    /// Two-thirds of `u64::MAX`
    pub u64_val: u64,
    /// Two-thirds of `u32::MAX`
    pub u32_val: u32,
    /// Two-thirds of `u16::MAX`
    pub u16_val: u16,
    /// Two-thirds of `u8::MAX`
    pub u8_val: u8,

    /// Double-precision float with many significant digits
    pub f64_val: f64,
    /// Largest float32 representable without precision loss
    pub f32_val: f32,

    /// Boolean flag
    pub flag: bool,
    /// Single byte value
    pub byte_val: u8,

    /// Repeated strings
    pub str_vec: Vec<String>,
    /// Signed 64-bit sequence
    pub i64_vec: Vec<i64>,
    /// Signed 32-bit sequence
    pub i32_vec: Vec<i32>,
    /// Unsigned 64-bit sequence
    pub u64_vec: Vec<u64>,
    /// Byte-width sequence
    pub u8_vec: Vec<u8>,
    /// Boolean sequence
    pub bool_vec: Vec<bool>,
    /// Raw byte buffer
    pub byte_buf: Vec<u8>,
    /// Sequence of byte buffers
    pub bytes_vec: Vec<Vec<u8>>,
    /// Sparse sequence: some positions hold no value
    pub opt_i64_vec: Vec<Option<i64>>,

    /// String-keyed integer mapping
    pub str_i64_map: HashMap<String, i64>,
    /// String-keyed byte-buffer mapping
    pub str_bytes_map: HashMap<String, Vec<u8>>,
    /// Integer-keyed mapping, populated only when non-string keys are allowed
    pub u64_key_map: HashMap<u64, u64>,

    /// Nested named sub-aggregate with values parallel to the top level
    pub simple: SimpleFields,

    /// Pair sequence with `"i".repeat(i)`-style strings
    pub pairs: Vec<StringU64Pair>,
    /// The same pairs keyed by their string half
    pub pairs_map: HashMap<String, StringU64Pair>,

    /// Composition-style embedded aggregate
    pub anon: AnonFields,
    /// The same aggregate as an ordinary named field
    pub not_anon: AnonFields,
    /// Optional boxed slim aggregate; left absent by the generator
    pub slim: Option<Box<SlimFields>>,

    /// Never set, so decoders see an absent mapping
    pub nil_map: Option<HashMap<String, bool>>,
    /// Never set, so decoders see an absent sequence
    pub nil_vec: Option<Vec<u8>>,
    /// Never set, so decoders see an absent scalar
    pub nil_i64: Option<i64>,
}

/// The shared recursively-structured test value.
///
/// Self-referential fields hold the *same* aggregate type in four
/// shapes: a value mapping, a boxed mapping, a sequence of boxed
/// references, and a single optional reference. The generator populates
/// each up to the requested recursion depth; at depth 0 all four stay at
/// their zero/absent state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestStruc {
    /// The non-recursive bulk of the fixture
    pub common: CommonFields,

    /// Mapping from string to the same aggregate type, by value
    pub mts: HashMap<String, TestStruc>,
    /// Mapping from string to an owning reference to the same type
    pub mts_boxed: HashMap<String, Box<TestStruc>>,
    /// Sequence of owning references to the same type
    pub its: Vec<Box<TestStruc>>,
    /// Single optional self-reference
    pub nested: Option<Box<TestStruc>>,

    /// Boxed clones of the pair list, keyed by their string half
    pub pairs_boxed: HashMap<String, Box<StringU64Pair>>,

    /// Named sequence of named integers
    pub wrap_u64_vec: WrapU64Vec,
    /// Named sequence of named strings
    pub wrap_str_vec: WrapStringVec,
    /// Named string-keyed mapping
    pub wrap_map: WrapStrU64Map,
}

impl TestStruc {
    /// Number of nested self-reference levels below this instance.
    ///
    /// Follows the single optional self-reference, which the generator
    /// populates at every level above 0.
    pub fn nesting_levels(&self) -> usize {
        match &self.nested {
            Some(child) => 1 + child.nesting_levels(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_leaf_shaped() {
        let ts = TestStruc::default();
        assert!(ts.mts.is_empty());
        assert!(ts.mts_boxed.is_empty());
        assert!(ts.its.is_empty());
        assert!(ts.nested.is_none());
        assert_eq!(ts.nesting_levels(), 0);
    }

    #[test]
    fn test_absent_and_empty_are_distinct() {
        let anon = AnonFields::default();
        assert!(anon.a_u64_map_nil.is_none());
        assert!(anon.a_u64_map_empty.is_empty());
        // an absent map must not compare equal to a present empty one
        let present = AnonFields {
            a_u64_map_nil: Some(HashMap::new()),
            ..AnonFields::default()
        };
        assert_ne!(anon, present);
    }

    #[test]
    fn test_nesting_levels_counts_chain() {
        let leaf = TestStruc::default();
        let mut mid = TestStruc::default();
        mid.nested = Some(Box::new(leaf));
        let mut top = TestStruc::default();
        top.nested = Some(Box::new(mid));
        assert_eq!(top.nesting_levels(), 2);
    }
}
