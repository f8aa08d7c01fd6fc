//! Region identifiers and the comma-separated region list form.

use std::collections::HashSet;
use std::fmt;

/// Coarse-grained id of a world area, sampled from the player's location.
pub type RegionId = u16;

/// A set of region ids with a lenient comma-separated text form.
///
/// Iteration order is unspecified, and so is the order of ids in
/// [`serialize`](Self::serialize) output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSet {
    ids: HashSet<RegionId>,
}

/// Outcome of [`RegionSet::parse_with_report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// The ids that parsed.
    pub set: RegionSet,
    /// Non-blank tokens that were not a valid region id.
    pub dropped: usize,
}

impl RegionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list, silently dropping malformed tokens.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_with_report(text).set
    }

    /// Parse a comma-separated list and count the tokens that were dropped.
    ///
    /// Tokens are trimmed; blank tokens are skipped without being counted.
    /// Anything that is not a decimal in `0..=65535` is dropped.
    #[must_use]
    pub fn parse_with_report(text: &str) -> ParseReport {
        let mut report = ParseReport::default();
        for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<RegionId>() {
                Ok(id) => {
                    report.set.ids.insert(id);
                }
                Err(_) => report.dropped += 1,
            }
        }
        report
    }

    /// Comma-joined decimal ids, no spaces.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn contains(&self, id: RegionId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id`; returns `false` if it was already present.
    pub fn insert(&mut self, id: RegionId) -> bool {
        self.ids.insert(id)
    }

    /// Removes `id`; returns `false` if it was absent.
    pub fn remove(&mut self, id: RegionId) -> bool {
        self.ids.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.ids.iter().copied()
    }

    /// Ids in ascending order, for stable log output.
    #[must_use]
    pub fn sorted(&self) -> Vec<RegionId> {
        let mut ids: Vec<_> = self.iter().collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl FromIterator<RegionId> for RegionSet {
    fn from_iter<I: IntoIterator<Item = RegionId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_list() {
        let set = RegionSet::parse("12850,12851, 12342");
        assert_eq!(set, RegionSet::from_iter([12850, 12851, 12342]));
    }

    #[test]
    fn test_parse_drops_malformed_tokens() {
        let report = RegionSet::parse_with_report("1, abc, , 5");
        assert_eq!(report.set, RegionSet::from_iter([1, 5]));
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let report = RegionSet::parse_with_report("-3,70000,65535,4.5");
        assert_eq!(report.set, RegionSet::from_iter([65535]));
        assert_eq!(report.dropped, 3);
    }

    #[test]
    fn test_parse_empty_and_blank() {
        assert!(RegionSet::parse("").is_empty());
        let report = RegionSet::parse_with_report(" , ,");
        assert!(report.set.is_empty());
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn test_serialize_parses_back_to_same_set() {
        let set = RegionSet::from_iter([1, 2, 3]);
        assert_eq!(RegionSet::parse(&set.serialize()), set);
    }

    #[test]
    fn test_serialize_format() {
        assert_eq!(RegionSet::new().serialize(), "");
        assert_eq!(RegionSet::from_iter([42]).serialize(), "42");
        let csv = RegionSet::from_iter([7, 9]).serialize();
        assert!(csv == "7,9" || csv == "9,7");
    }

    #[test]
    fn test_insert_and_remove_report_change() {
        let mut set = RegionSet::new();
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert!(set.remove(5));
        assert!(!set.remove(5));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_sorted() {
        assert_eq!(RegionSet::from_iter([9, 1, 4]).sorted(), vec![1, 4, 9]);
    }
}
