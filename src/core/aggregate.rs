//! Aggregation helpers
//!
//! Strategies reduce raw record scans into keyed running totals. The
//! accumulator defaults absent keys to zero on read without creating them,
//! which keeps row assembly free of presence checks and keeps membership
//! unaffected by lookups.

use std::collections::HashMap;
use std::hash::Hash;

/// Composite-key running-total map with zero-defaulting reads
///
/// Keys are typically ordered tuples of primitive values, e.g.
/// `(department_code, employee_type)`; equality is structural.
#[derive(Debug, Clone, Default)]
pub struct Accumulator<K>
where
    K: Eq + Hash,
{
    totals: HashMap<K, i64>,
}

impl<K> Accumulator<K>
where
    K: Eq + Hash,
{
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            totals: HashMap::new(),
        }
    }

    /// Add `amount` to the total for `key`, creating the key when absent
    pub fn add(&mut self, key: K, amount: i64) {
        *self.totals.entry(key).or_insert(0) += amount;
    }

    /// Total for `key`; zero when the key was never written.
    ///
    /// Reading never inserts, so iteration order and membership stay
    /// identical to never having looked the key up.
    pub fn get(&self, key: &K) -> i64 {
        self.totals.get(key).copied().unwrap_or(0)
    }

    /// Whether `key` has ever been written
    pub fn contains(&self, key: &K) -> bool {
        self.totals.contains_key(key)
    }

    /// Number of keys that have been written
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether nothing has been accumulated yet
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Iterate over written keys and their totals
    pub fn iter(&self) -> impl Iterator<Item = (&K, &i64)> {
        self.totals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_zero() {
        let acc: Accumulator<(String, String)> = Accumulator::new();
        assert_eq!(acc.get(&("10".into(), "Student".into())), 0);
    }

    #[test]
    fn test_read_has_no_membership_side_effect() {
        let mut acc = Accumulator::new();
        acc.add(("10".to_string(), "Student".to_string()), 500);

        let missing = ("20".to_string(), "Student".to_string());
        assert_eq!(acc.get(&missing), 0);
        assert_eq!(acc.len(), 1);
        assert!(!acc.contains(&missing));
    }

    #[test]
    fn test_add_accumulates() {
        let mut acc = Accumulator::new();
        let key = ("10".to_string(), "Contingent 1".to_string());
        acc.add(key.clone(), 120_000);
        acc.add(key.clone(), 30_000);
        assert_eq!(acc.get(&key), 150_000);
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_keys_compare_structurally() {
        let mut acc = Accumulator::new();
        acc.add(("10".to_string(), "Student".to_string()), 100);
        // A separately constructed but equal tuple hits the same bucket.
        assert_eq!(acc.get(&(String::from("10"), String::from("Student"))), 100);
    }

    #[test]
    fn test_negative_amounts_subtract() {
        let mut acc = Accumulator::new();
        acc.add("adjustments".to_string(), 1_000);
        acc.add("adjustments".to_string(), -250);
        assert_eq!(acc.get(&"adjustments".to_string()), 750);
    }
}
