//! Fixture module: the shared recursive test value
//!
//! This module provides the deterministic fixture every codec comparison
//! runs on: the data model, the depth-parameterized generator, and the
//! string interning cache the generator leans on.

pub mod generate;
pub mod intern;
pub mod types;

// Re-export main types for convenience
pub use generate::{generate, generate_for, LONG_SENTENCE, MAX_DEPTH, NUM_PAIRS};
pub use intern::{intern_repeated, StringInterner};
pub use types::{
    AnonFields, CommonFields, SimpleFields, SlimFields, StringU64Pair, TestStruc,
    WrapStrU64Map, WrapString, WrapStringVec, WrapU64, WrapU64Vec,
};
