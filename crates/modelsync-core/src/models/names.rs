//! Memoized node name derivation

use once_cell::unsync::OnceCell;

/// Lazily-filled cache for a record's two derived display strings
///
/// Each slot fills at most once; the owning record supplies the fill
/// closure, so the cache itself stays a pure memoization primitive. Fills
/// are single-threaded (`unsync`) per the crate's concurrency contract.
#[derive(Debug, Default)]
pub struct NameCache {
    full: OnceCell<String>,
    debug: OnceCell<String>,
}

impl NameCache {
    /// Return the cached full name, filling it on first access
    pub fn full_name(&self, fill: impl FnOnce() -> String) -> &str {
        self.full.get_or_init(fill)
    }

    /// Return the cached debug name, filling it on first access
    pub fn debug_name(&self, fill: impl FnOnce() -> String) -> &str {
        self.debug.get_or_init(fill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn fill_runs_exactly_once() {
        let cache = NameCache::default();
        let calls = Cell::new(0);
        for _ in 0..3 {
            let name = cache.full_name(|| {
                calls.set(calls.get() + 1);
                "ApplicationComponent:\"Billing\"".to_string()
            });
            assert_eq!(name, "ApplicationComponent:\"Billing\"");
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn slots_fill_independently() {
        let cache = NameCache::default();
        let full = cache.full_name(|| "Element:\"A\"".to_string()).to_string();
        let debug = cache.debug_name(|| format!("{full}(id-1)"));
        assert_eq!(debug, "Element:\"A\"(id-1)");
        assert_eq!(cache.full_name(|| unreachable!()), "Element:\"A\"");
    }
}
