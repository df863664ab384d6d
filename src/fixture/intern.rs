//! String interning cache for fixture generation
//!
//! Fixture generation repeats a handful of base strings `repeat_factor`
//! times in many places. The cache guarantees that for a fixed
//! `(n, base)` pair only one backing string is ever materialized for the
//! process lifetime; every later request returns the same allocation.
//! This is pure memoization, not an LRU: entries are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Memoization cache mapping `n -> base -> base.repeat(n)`.
///
/// Thread-safe: a single lock spans the lookup-or-insert, so concurrent
/// callers for the same `(n, base)` still observe one allocation.
#[derive(Debug, Default)]
pub struct StringInterner {
    cache: Mutex<HashMap<usize, HashMap<String, Arc<str>>>>,
}

impl StringInterner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `base.repeat(n)`, computing it at most once per `(n, base)`.
    ///
    /// Total over its inputs: `n == 0` yields the (cached) empty string.
    pub fn repeated(&self, n: usize, base: &str) -> Arc<str> {
        let mut cache = self.cache.lock().expect("interner lock poisoned");
        let per_count = cache.entry(n).or_default();
        if let Some(existing) = per_count.get(base) {
            return Arc::clone(existing);
        }
        let computed: Arc<str> = Arc::from(base.repeat(n));
        per_count.insert(base.to_string(), Arc::clone(&computed));
        computed
    }

    /// Number of distinct `(n, base)` entries currently cached
    pub fn len(&self) -> usize {
        let cache = self.cache.lock().expect("interner lock poisoned");
        cache.values().map(HashMap::len).sum()
    }

    /// True if nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-wide interner shared by all fixture generations.
fn global() -> &'static StringInterner {
    static INTERNER: OnceLock<StringInterner> = OnceLock::new();
    INTERNER.get_or_init(StringInterner::new)
}

/// Intern `base.repeat(n)` in the process-wide cache.
pub fn intern_repeated(n: usize, base: &str) -> Arc<str> {
    global().repeated(n, base)
}
