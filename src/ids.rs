//! Element identifier defaulting.
//!
//! Records carry a prefixed identifier such as `pcb_plated_hole_1f0c…`. When
//! the author supplies one it is kept verbatim; when it is absent (or empty)
//! a new one is synthesised from an [`IdGenerator`].
//!
//! Generators are injected rather than global so that tests can use a
//! deterministic [`CounterIdGenerator`] and concurrent validation can share
//! one generator through an `Arc`.
//!
//! # Uniqueness
//!
//! - [`RandomIdGenerator`] uses UUID v4 suffixes. It holds no state, so IDs
//!   are unique across threads, generator instances and processes with a
//!   collision probability of roughly 2⁻¹²² per pair.
//! - [`CounterIdGenerator`] uses an atomic counter. IDs are unique for the
//!   lifetime of one generator instance; two instances started at the same
//!   value produce the same sequence.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use uuid::Uuid;

/// Source of unique identifier suffixes.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Returns a suffix that this generator has never returned before.
    fn next_suffix(&self) -> String;

    /// Builds a complete identifier of the form `<prefix>_<suffix>`.
    fn generate(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.next_suffix())
    }
}

/// Generates random UUID v4 suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    /// Creates a new random generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_suffix(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Generates sequential numeric suffixes from an atomic counter.
#[derive(Debug, Default)]
pub struct CounterIdGenerator {
    next: AtomicU64,
}

impl CounterIdGenerator {
    /// Creates a counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a counter whose first suffix is `start`.
    #[must_use]
    pub const fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for CounterIdGenerator {
    fn next_suffix(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Returns `explicit` if it is present and non-empty, otherwise a freshly
/// generated `<prefix>_<suffix>` identifier.
///
/// The explicit value is not checked against any format.
///
/// # Examples
///
/// ```
/// use pcb_schema::ids::{prefixed_id_with_default, CounterIdGenerator};
///
/// let ids = CounterIdGenerator::new();
/// assert_eq!(prefixed_id_with_default("pcb_plated_hole", Some("hole_a"), &ids), "hole_a");
/// assert_eq!(prefixed_id_with_default("pcb_plated_hole", None, &ids), "pcb_plated_hole_0");
/// ```
#[must_use]
pub fn prefixed_id_with_default(
    prefix: &str,
    explicit: Option<&str>,
    ids: &dyn IdGenerator,
) -> String {
    match explicit {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let id = ids.generate(prefix);
            debug!(id = %id, "Generated element identifier");
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn explicit_id_is_kept() {
        let ids = CounterIdGenerator::new();
        let id = prefixed_id_with_default("pcb_plated_hole", Some("PH-7"), &ids);
        assert_eq!(id, "PH-7");
        // Nothing consumed
        assert_eq!(ids.next_suffix(), "0");
    }

    #[test]
    fn empty_id_is_replaced() {
        let ids = CounterIdGenerator::starting_at(41);
        let id = prefixed_id_with_default("pcb_plated_hole", Some(""), &ids);
        assert_eq!(id, "pcb_plated_hole_41");
    }

    #[test]
    fn counter_is_sequential() {
        let ids = CounterIdGenerator::new();
        assert_eq!(ids.generate("x"), "x_0");
        assert_eq!(ids.generate("x"), "x_1");
        assert_eq!(ids.generate("y"), "y_2");
    }

    #[test]
    fn random_ids_have_prefix_and_differ() {
        let ids = RandomIdGenerator::new();
        let a = prefixed_id_with_default("pcb_plated_hole", None, &ids);
        let b = prefixed_id_with_default("pcb_plated_hole", None, &ids);
        assert!(a.starts_with("pcb_plated_hole_"));
        assert!(b.starts_with("pcb_plated_hole_"));
        assert_ne!(a, b);
        assert_eq!(a.len(), "pcb_plated_hole_".len() + 32);
    }

    #[test]
    fn counter_is_unique_across_threads() {
        let ids = CounterIdGenerator::new();
        let all: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| (0..250).map(|_| ids.next_suffix()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 2000);
        assert_eq!(unique.len(), 2000);
    }
}
