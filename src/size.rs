//! Approximate in-memory size estimation
//!
//! A recursive structural walk over the runtime shape of a value,
//! dispatched through the [`ApproxSize`] capability trait: scalars charge
//! their fixed width, containers charge their own header plus their
//! contents, and struct-like aggregates are exactly the sum of their
//! fields with no separate header. The estimate is advisory: it is used
//! only to pre-size encode buffers and need not match any backend's wire
//! size.

use crate::fixture::types::{
    AnonFields, CommonFields, SimpleFields, SlimFields, StringU64Pair, TestStruc,
    WrapStrU64Map, WrapString, WrapStringVec, WrapU64, WrapU64Vec,
};
use std::collections::HashMap;
use std::mem;

/// Capability for estimating a value's in-memory footprint.
///
/// Pure: implementations must not mutate or observe anything beyond the
/// value itself. Termination follows from the bounded recursion of the
/// fixture shapes this is implemented for.
pub trait ApproxSize {
    /// Approximate footprint of this value in bytes
    fn approx_size(&self) -> usize;
}

/// Estimate the in-memory footprint of `value` in bytes.
pub fn estimate_size<T: ApproxSize + ?Sized>(value: &T) -> usize {
    value.approx_size()
}

macro_rules! impl_approx_size_scalar {
    ($($t:ty)*) => {
        $(impl ApproxSize for $t {
            fn approx_size(&self) -> usize {
                mem::size_of::<$t>()
            }
        })*
    };
}

impl_approx_size_scalar!(bool u8 u16 u32 u64 usize i8 i16 i32 i64 isize f32 f64);

impl ApproxSize for String {
    fn approx_size(&self) -> usize {
        mem::size_of::<Self>() + self.len()
    }
}

impl<T: ApproxSize> ApproxSize for Vec<T> {
    fn approx_size(&self) -> usize {
        mem::size_of::<Self>() + self.iter().map(ApproxSize::approx_size).sum::<usize>()
    }
}

// fixed-size arrays store elements inline, so no header charge
impl<T: ApproxSize, const N: usize> ApproxSize for [T; N] {
    fn approx_size(&self) -> usize {
        self.iter().map(ApproxSize::approx_size).sum()
    }
}

impl<T: ApproxSize> ApproxSize for Option<T> {
    fn approx_size(&self) -> usize {
        mem::size_of::<Self>() + self.as_ref().map_or(0, ApproxSize::approx_size)
    }
}

impl<T: ApproxSize> ApproxSize for Box<T> {
    fn approx_size(&self) -> usize {
        mem::size_of::<Self>() + (**self).approx_size()
    }
}

impl<K: ApproxSize, V: ApproxSize, S> ApproxSize for HashMap<K, V, S> {
    fn approx_size(&self) -> usize {
        mem::size_of::<Self>()
            + self
                .iter()
                .map(|(k, v)| k.approx_size() + v.approx_size())
                .sum::<usize>()
    }
}

/// Aggregates-of-fields charge the sum of their fields and nothing else.
macro_rules! impl_approx_size_fields {
    ($ty:ty { $($field:tt),* $(,)? }) => {
        impl ApproxSize for $ty {
            fn approx_size(&self) -> usize {
                0 $(+ self.$field.approx_size())*
            }
        }
    };
}

impl_approx_size_fields!(WrapString { 0 });
impl_approx_size_fields!(WrapU64 { 0 });
impl_approx_size_fields!(WrapU64Vec { 0 });
impl_approx_size_fields!(WrapStringVec { 0 });
impl_approx_size_fields!(WrapStrU64Map { 0 });
impl_approx_size_fields!(StringU64Pair { s, u });
impl_approx_size_fields!(SlimFields { sa, pa });

impl_approx_size_fields!(AnonFields {
    a_str, a_i64, a_i16, a_u64,
    a_str_vec, a_i64_vec, a_u64_vec, a_f64_vec, a_f32_vec,
    a_str_map, a_u64_map,
    a_i64_arr8, a_i64_arr0, a_i64_vec0,
    a_u64_vec_nil, a_u64_map_nil, a_u64_map_empty,
});

impl_approx_size_fields!(SimpleFields {
    s, i64_val, i8_val, u64_val, u8_val, f64_val, f32_val, flag,
    str_vec, i32_vec, u64_vec, u8_vec, bool_vec, opt_i64_vec, str_i64_map,
});

impl_approx_size_fields!(CommonFields {
    s,
    i64_val, i32_val, i16_val, i8_val,
    i64_neg, i32_neg, i16_neg, i8_neg,
    u64_val, u32_val, u16_val, u8_val,
    f64_val, f32_val, flag, byte_val,
    str_vec, i64_vec, i32_vec, u64_vec, u8_vec, bool_vec,
    byte_buf, bytes_vec, opt_i64_vec,
    str_i64_map, str_bytes_map, u64_key_map,
    simple, pairs, pairs_map,
    anon, not_anon, slim,
    nil_map, nil_vec, nil_i64,
});

impl_approx_size_fields!(TestStruc {
    common,
    mts, mts_boxed, its, nested,
    pairs_boxed,
    wrap_u64_vec, wrap_str_vec, wrap_map,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::generate;
    use std::mem::size_of;

    #[test]
    fn test_scalar_widths() {
        assert_eq!(estimate_size(&0u8), 1);
        assert_eq!(estimate_size(&0i64), 8);
        assert_eq!(estimate_size(&0f32), 4);
        assert_eq!(estimate_size(&true), 1);
    }

    #[test]
    fn test_string_is_header_plus_bytes() {
        let s = "hello".to_string();
        assert_eq!(estimate_size(&s), size_of::<String>() + 5);
    }

    #[test]
    fn test_sequence_additivity() {
        let elem = 7u64;
        let seq = vec![elem; 11];
        assert_eq!(
            estimate_size(&seq),
            size_of::<Vec<u64>>() + 11 * estimate_size(&elem)
        );
    }

    #[test]
    fn test_owning_reference() {
        let absent: Option<Box<u64>> = None;
        let present: Option<Box<u64>> = Some(Box::new(1));
        assert_eq!(estimate_size(&absent), size_of::<Option<Box<u64>>>());
        assert_eq!(
            estimate_size(&present),
            size_of::<Option<Box<u64>>>() + size_of::<Box<u64>>() + 8
        );
    }

    #[test]
    fn test_mapping_charges_keys_and_values() {
        let mut map = HashMap::new();
        map.insert("ab".to_string(), 1u64);
        let expected = size_of::<HashMap<String, u64>>()
            + estimate_size(&"ab".to_string())
            + estimate_size(&1u64);
        assert_eq!(estimate_size(&map), expected);
    }

    #[test]
    fn test_aggregate_additivity() {
        let pair = StringU64Pair {
            s: "abc".to_string(),
            u: 9,
        };
        assert_eq!(
            estimate_size(&pair),
            estimate_size(&pair.s) + estimate_size(&pair.u)
        );

        let ts = generate(1, 2, true, true).unwrap();
        let field_sum = estimate_size(&ts.common)
            + estimate_size(&ts.mts)
            + estimate_size(&ts.mts_boxed)
            + estimate_size(&ts.its)
            + estimate_size(&ts.nested)
            + estimate_size(&ts.pairs_boxed)
            + estimate_size(&ts.wrap_u64_vec)
            + estimate_size(&ts.wrap_str_vec)
            + estimate_size(&ts.wrap_map);
        assert_eq!(estimate_size(&ts), field_sum);
    }

    #[test]
    fn test_deeper_fixture_estimates_larger() {
        let shallow = generate(0, 2, true, true).unwrap();
        let deep = generate(2, 2, true, true).unwrap();
        assert!(estimate_size(&deep) > estimate_size(&shallow));
    }
}
