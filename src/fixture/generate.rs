//! Fixture generator
//!
//! Builds the shared recursive test value. Output is deterministic for a
//! fixed parameter set: re-generating with the same parameters yields a
//! deep-equal value, which is what round-trip verification compares
//! against. Recursion strictly decreases depth, and the generator
//! enforces [`MAX_DEPTH`] so termination holds by construction.

use super::intern::intern_repeated;
use super::types::{
    AnonFields, CommonFields, SimpleFields, StringU64Pair, TestStruc, WrapStrU64Map,
    WrapString, WrapStringVec, WrapU64, WrapU64Vec,
};
use crate::error::{FixtureError, FixtureResult};
use crate::sweep::Profile;
use std::collections::HashMap;

/// The canonical sentence; the fixture's top-level string is this
/// repeated `repeat_factor` times.
pub const LONG_SENTENCE: &str =
    "some moderately long sentence with \"quoted words\" and numbers 0123456789 to pad things out ";

/// Number of string/integer pairs in the pair sequence and mappings.
pub const NUM_PAIRS: u64 = 32;

/// Hard cap on recursion depth, enforced by [`generate`].
///
/// Each level clones one nested instance into four self-referential
/// holders, so total value size grows quickly with depth; the cap keeps
/// generation bounded by construction rather than by convention.
pub const MAX_DEPTH: usize = 8;

/// Generation parameters threaded through the recursive population.
struct GenCtx {
    repeat: usize,
    optional_fields: bool,
    string_keyed_only: bool,
    intern: bool,
}

impl GenCtx {
    /// `base.repeat(self.repeat)`, via the process-wide cache when
    /// interning is enabled.
    fn rpt(&self, base: &str) -> String {
        if self.intern {
            intern_repeated(self.repeat, base).to_string()
        } else {
            base.repeat(self.repeat)
        }
    }
}

/// Build the shared test value.
///
/// * `depth`: number of nested self-reference levels; 0 means none.
/// * `repeat_factor`: how many times base strings are repeated.
/// * `want_optional_fields`: populate the sparse optional-integer
///   sequence (formats that cannot encode holes leave this off).
/// * `string_keyed_maps_only`: when false, an additional integer-keyed
///   mapping is populated for backends that allow non-string keys.
///
/// Errors with [`FixtureError::DepthExceeded`] when `depth > MAX_DEPTH`.
pub fn generate(
    depth: usize,
    repeat_factor: usize,
    want_optional_fields: bool,
    string_keyed_maps_only: bool,
) -> FixtureResult<TestStruc> {
    let ctx = GenCtx {
        repeat: repeat_factor,
        optional_fields: want_optional_fields,
        string_keyed_only: string_keyed_maps_only,
        intern: true,
    };
    generate_inner(depth, &ctx)
}

/// Build the fixture a configuration profile calls for.
///
/// Depth, repeat factor and interning come from the profile; optional
/// fields and string-keyed maps are always on, matching what every
/// shipped backend can round-trip.
pub fn generate_for(profile: &Profile) -> FixtureResult<TestStruc> {
    let ctx = GenCtx {
        repeat: profile.repeat_factor,
        optional_fields: true,
        string_keyed_only: true,
        intern: profile.intern_strings,
    };
    generate_inner(profile.recursion_depth, &ctx)
}

fn generate_inner(depth: usize, ctx: &GenCtx) -> FixtureResult<TestStruc> {
    if depth > MAX_DEPTH {
        return Err(FixtureError::DepthExceeded {
            requested: depth,
            max: MAX_DEPTH,
        });
    }
    Ok(new_populated(depth, ctx))
}

fn new_populated(depth: usize, ctx: &GenCtx) -> TestStruc {
    let mut ts = TestStruc::default();
    populate(&mut ts, depth, ctx);
    ts
}

fn populate(ts: &mut TestStruc, depth: usize, ctx: &GenCtx) {
    populate_common(&mut ts.common, ctx);
    if depth > 0 {
        populate_extra(ts, depth - 1, ctx);
    }
}

/// Self-referential and wrapped fields, only present above depth 0.
///
/// Exactly one nested instance is generated per level and cloned into
/// the four self-referential holders, keyed by the repeated `"0"`.
fn populate_extra(ts: &mut TestStruc, depth: usize, ctx: &GenCtx) {
    let child = new_populated(depth, ctx);
    let key = ctx.rpt("0");
    ts.mts_boxed.insert(key.clone(), Box::new(child.clone()));
    ts.its.push(Box::new(child.clone()));
    ts.nested = Some(Box::new(child.clone()));
    ts.mts.insert(key, child);

    ts.pairs_boxed = ts
        .common
        .pairs
        .iter()
        .map(|p| (p.s.clone(), Box::new(p.clone())))
        .collect();

    ts.wrap_u64_vec = WrapU64Vec(vec![WrapU64(4), WrapU64(16), WrapU64(64), WrapU64(256)]);
    ts.wrap_str_vec = WrapStringVec(vec![
        WrapString(ctx.rpt("4")),
        WrapString(ctx.rpt("16")),
        WrapString(ctx.rpt("64")),
        WrapString(ctx.rpt("256")),
    ]);
    ts.wrap_map = WrapStrU64Map(HashMap::from([
        ("4".to_string(), 4),
        ("16".to_string(), 16),
    ]));
}

fn populate_common(c: &mut CommonFields, ctx: &GenCtx) {
    c.s = ctx.rpt(LONG_SENTENCE);

    // pin the scalars close to the width limits without sitting exactly
    // on them, so formats that reject true min/max sentinels still parse
    c.i8_val = i8::MAX / 3 * 2;
    c.i8_neg = i8::MIN / 3 * 2;
    c.i16_val = i16::MAX / 3 * 2;
    c.i16_neg = i16::MIN / 3 * 2;
    c.i32_val = i32::MAX / 3 * 2;
    c.i32_neg = i32::MIN / 3 * 2;
    c.i64_val = i64::MAX / 3 * 2;
    c.i64_neg = i64::MIN / 3 * 2;

    c.u64_val = u64::MAX / 3 * 2;
    c.u32_val = u32::MAX / 3 * 2;
    c.u16_val = u16::MAX / 3 * 2;
    c.u8_val = u8::MAX / 3 * 2;

    c.f32_val = 3.402_823e38; // max representable without losing precision
    c.f64_val = 3.402_819_918_338_388_4e53;

    c.flag = true;
    c.byte_val = 5;

    c.str_vec = vec![ctx.rpt("one"), ctx.rpt("two"), ctx.rpt("three")];
    c.i64_vec = vec![1111, 2222, 3333];
    c.i32_vec = vec![44, 55, 66];
    c.u64_vec = vec![12_121_212, 34_343_434, 56_565_656];
    c.u8_vec = vec![210, 211, 212];
    c.bool_vec = vec![true, false, true, false];
    c.byte_buf = vec![13, 14, 15];
    c.bytes_vec = vec![
        ctx.rpt("one").into_bytes(),
        ctx.rpt("two").into_bytes(),
        ctx.rpt("\"three\"").into_bytes(),
    ];

    if ctx.optional_fields {
        c.opt_i64_vec = vec![
            None,
            Some(64),
            None,
            Some(6464),
            None,
            Some(646_464),
            None,
            Some(64_646_464),
            None,
        ];
    }

    c.str_i64_map = HashMap::from([
        (ctx.rpt("one"), 1),
        (ctx.rpt("two"), 2),
        (ctx.rpt("\"three\""), 3),
    ]);
    c.str_bytes_map = HashMap::from([
        (ctx.rpt("one"), ctx.rpt("one").into_bytes()),
        (ctx.rpt("two"), ctx.rpt("two").into_bytes()),
        (ctx.rpt("\"three\""), ctx.rpt("\"three\"").into_bytes()),
    ]);
    if !ctx.string_keyed_only {
        c.u64_key_map = HashMap::from([(1, 1), (2, 2), (3, 3)]);
    }

    c.simple = SimpleFields {
        s: ctx.rpt(LONG_SENTENCE),
        i64_val: i64::MAX / 3 * 2,
        i8_val: i8::MAX / 3 * 2,
        u64_val: u64::MAX / 3 * 2,
        u8_val: u8::MAX / 3 * 2,
        f64_val: 3.402_819_918_338_388_4e53,
        f32_val: 3.402_823e38,
        flag: true,
        str_vec: vec![ctx.rpt("one"), ctx.rpt("two"), ctx.rpt("three")],
        i32_vec: vec![44, 55, 66],
        u64_vec: vec![12_121_212, 34_343_434, 56_565_656],
        u8_vec: vec![210, 211, 212],
        bool_vec: vec![true, false, true, false],
        opt_i64_vec: Vec::new(),
        str_i64_map: HashMap::from([
            (ctx.rpt("one"), 1),
            (ctx.rpt("two"), 2),
            (ctx.rpt("\"three\""), 3),
        ]),
    };

    c.pairs = (0..NUM_PAIRS)
        .map(|i| StringU64Pair {
            s: i.to_string().repeat(i as usize),
            u: i,
        })
        .collect();
    c.pairs_map = c
        .pairs
        .iter()
        .map(|p| (p.s.clone(), p.clone()))
        .collect();

    let anon = anon_fields(ctx);
    c.anon = anon.clone();
    c.not_anon = anon;

    // slim, nil_map, nil_vec and nil_i64 stay absent on purpose
}

fn anon_fields(ctx: &GenCtx) -> AnonFields {
    AnonFields {
        a_str: ctx.rpt("A-String"),
        a_i64: -64_646_464,
        a_i16: 1616,
        a_u64: 64_646_464,
        // reverse solidus and an astral-plane G-clef exercise escape
        // handling in the text formats
        a_str_vec: vec![
            ctx.rpt("Aone"),
            ctx.rpt("Atwo"),
            ctx.rpt("Athree"),
            ctx.rpt("Afour.reverse_solidus.\u{5c}"),
            ctx.rpt("Afive.Gclef.\u{1d11e}\"quoted\"done."),
        ],
        a_i64_vec: vec![
            0,
            1,
            -1,
            -22,
            333,
            -4444,
            55555,
            -666_666,
            -48,
            -32,
            -24,
            -8,
            32,
            127,
            192,
            255,
            i8::MAX as i64,
            i8::MAX as i64 + 4,
            i8::MAX as i64 - 4,
            i16::MAX as i64,
            i16::MAX as i64 + 4,
            i16::MAX as i64 - 4,
            i32::MAX as i64,
            i32::MAX as i64 + 4,
            i32::MAX as i64 - 4,
            i64::MAX,
            i64::MAX - 4,
            i8::MIN as i64,
            i8::MIN as i64 + 4,
            i8::MIN as i64 - 4,
            i16::MIN as i64,
            i16::MIN as i64 + 4,
            i16::MIN as i64 - 4,
            i32::MIN as i64,
            i32::MIN as i64 + 4,
            i32::MIN as i64 - 4,
            i64::MIN,
            i64::MIN + 4,
        ],
        a_u64_vec: vec![
            0,
            1,
            22,
            333,
            4444,
            55555,
            666_666,
            u8::MAX as u64,
            u8::MAX as u64 + 4,
            u8::MAX as u64 - 4,
            u16::MAX as u64,
            u16::MAX as u64 + 4,
            u16::MAX as u64 - 4,
            u32::MAX as u64,
            u32::MAX as u64 + 4,
            u32::MAX as u64 - 4,
            u64::MAX,
            u64::MAX - 4,
        ],
        // values hairy enough to need full-precision parsing; never
        // NaN or infinity, which several comparison formats reject
        a_f64_vec: vec![
            11.11e-11,
            -11.11e+11,
            2.222e+12,
            -2.222e-12,
            -555.55e-5,
            555.55e+5,
            666.66e-6,
            -666.66e+6,
            7777.7777e-7,
            -7777.7777e-7,
            -8888.8888e+8,
            8888.8888e+8,
            -99999.9999e+9,
            99999.9999e+9,
            33.33e-33,
            -33.33e+33,
            44.44e+44,
            -44.44e-44,
            0.0,
            -1.0,
            1.0,
            std::f64::consts::PI,
            std::f64::consts::E,
            f64::MAX,
            f64::MIN_POSITIVE,
        ],
        a_f32_vec: vec![
            11.11e-1,
            -11.11e+1,
            2.222e+2,
            -2.222e-2,
            -55.55e-5,
            55.55e+5,
            66.66e-6,
            -66.66e+6,
            777.777e-7,
            -777.777e-7,
            -8.88e+8,
            8.88e-8,
            -99999.9999e+9,
            99999.9999e+9,
            33.33e-33,
            -33.33e+33,
            0.0,
            -1.0,
            1.0,
            f32::MAX,
            f32::MIN_POSITIVE,
        ],
        a_str_map: HashMap::from([
            (ctx.rpt("1"), ctx.rpt("1")),
            (ctx.rpt("22"), ctx.rpt("22")),
            (ctx.rpt("333"), ctx.rpt("333")),
            (ctx.rpt("4444"), ctx.rpt("4444")),
        ]),
        a_u64_map: HashMap::from([
            (ctx.rpt("1"), 1),
            (ctx.rpt("22"), 2),
            (ctx.rpt("333"), 3),
            (ctx.rpt("4444"), 4),
        ]),
        a_i64_arr8: [1, 8, 2, 7, 3, 6, 4, 5],
        a_i64_arr0: [],
        a_i64_vec0: Vec::new(),
        a_u64_vec_nil: None,
        a_u64_map_nil: None,
        a_u64_map_empty: HashMap::new(),
    }
}
