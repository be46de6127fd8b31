use std::collections::HashMap;

/// Ordered tuple of signature ids
pub type Pattern = Vec<String>;

/// Pattern -> count, iterated in first-seen order. Keys borrow the
/// signatures of the stream being counted.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable<'a> {
    index: HashMap<Vec<&'a str>, usize>,
    entries: Vec<(Vec<&'a str>, u64)>,
}

impl<'a> FrequencyTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits only touch the counter; a key is allocated on first sight
    pub fn increment(&mut self, pattern: &[&'a str]) {
        if let Some(&pos) = self.index.get(pattern) {
            self.entries[pos].1 += 1;
            return;
        }
        self.index.insert(pattern.to_vec(), self.entries.len());
        self.entries.push((pattern.to_vec(), 1));
    }

    #[cfg(test)]
    pub fn get(&self, pattern: &[&'a str]) -> u64 {
        self.index.get(pattern).map(|&pos| self.entries[pos].1).unwrap_or(0)
    }

    pub fn contains(&self, pattern: &[&'a str]) -> bool {
        self.index.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[&'a str], u64)> + '_ {
        self.entries.iter().map(|(p, c)| (p.as_slice(), *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let mut table = FrequencyTable::new();
        table.increment(&["B", "C"]);
        table.increment(&["A", "B"]);
        table.increment(&["B", "C"]);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&["B", "C"]), 2);
        assert_eq!(table.get(&["C", "B"]), 0);
        assert!(table.contains(&["A", "B"]));

        let order: Vec<u64> = table.iter().map(|(_, c)| c).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_keys_borrow_counted_signatures() {
        let owned: Vec<String> = vec!["A".into(), "B".into(), "A".into(), "B".into()];
        let sigs: Vec<&str> = owned.iter().map(|s| s.as_str()).collect();

        let mut table = FrequencyTable::new();
        for gram in sigs.windows(2) {
            table.increment(gram);
        }

        assert_eq!(table.get(&["A", "B"]), 2);
        assert_eq!(table.get(&["B", "A"]), 1);
        let (first, _) = table.iter().next().unwrap();
        assert!(std::ptr::eq(first[0], owned[0].as_str()));
    }
}
