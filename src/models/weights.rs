use std::collections::HashMap;

/// Multiplicity and scale for one data source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEntry {
    /// Times the source is repeated per epoch
    pub repeat: u64,
    /// Per-occurrence scale
    pub scale: f64,
}

impl WeightEntry {
    pub fn new(repeat: u64, scale: f64) -> Self {
        Self { repeat, scale }
    }

    /// Multiplier applied to every word occurrence from this source
    pub fn effective(&self) -> f64 {
        self.repeat as f64 * self.scale
    }

    /// Sources that contribute nothing are skipped entirely
    pub fn is_zero(&self) -> bool {
        self.effective() == 0.0
    }
}

/// Weight entries keyed by source name
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    entries: HashMap<String, WeightEntry>,
}

impl WeightTable {
    pub fn get(&self, name: &str) -> Option<WeightEntry> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `false` if `name` was already present (the old entry is kept)
    pub(crate) fn insert(&mut self, name: String, entry: WeightEntry) -> bool {
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_weight() {
        let entry = WeightEntry::new(5, 1.5);
        assert_eq!(entry.effective(), 7.5);
        assert!(!entry.is_zero());

        assert!(WeightEntry::new(0, 3.0).is_zero());
        assert!(WeightEntry::new(4, 0.0).is_zero());
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut table = WeightTable::default();
        assert!(table.insert("swbd".to_string(), WeightEntry::new(1, 1.0)));
        assert!(!table.insert("swbd".to_string(), WeightEntry::new(2, 2.0)));
        assert_eq!(table.get("swbd"), Some(WeightEntry::new(1, 1.0)));
        assert_eq!(table.len(), 1);
    }
}
