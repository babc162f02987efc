use std::{cmp::Reverse, fmt};

use derive_more::Deref;
use indexmap::IndexMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::parse;

/// Number of lines that share a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub label: String,
    pub count: usize,
}

impl TagCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        TagCount {
            label: label.into(),
            count,
        }
    }
}

/// Tag histogram of a single file.
///
/// Rows are unique by label and ordered by descending count, tags with
/// equal counts stay in the order they were first seen in.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Deref,
)]
pub struct FrequencyTable(Vec<TagCount>);

impl FrequencyTable {
    /// Count the first column values of a file.
    ///
    /// Brace lines are skipped and everything else is reduced to its record
    /// marker before counting.
    pub fn from_tags<S: AsRef<str>>(
        tags: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for value in tags {
            let value = value.as_ref();
            if parse::is_brace(value) {
                continue;
            }
            *counts
                .entry(parse::normalize_tag(value).to_owned())
                .or_default() += 1;
        }

        FrequencyTable(
            counts
                .into_iter()
                .map(|(label, count)| TagCount { label, count })
                .sorted_by_key(|row| Reverse(row.count))
                .collect(),
        )
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|row| row.label.clone()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.0.iter().map(|row| row.count).collect()
    }

    /// Number of counted lines.
    pub fn total(&self) -> usize {
        self.0.iter().map(|row| row.count).sum()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.0.iter().find(|row| row.label == label).map(|row| row.count)
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for TagCount { label, count } in &self.0 {
            writeln!(f, "{label:32} {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tags() {
        let table = FrequencyTable::from_tags([
            "#KONTO 1930 Cash",
            "#KONTO 1940 Bank",
            "{",
            "#TRANS 1930 100",
            "}",
        ]);

        assert_eq!(
            &table[..],
            &[TagCount::new("#KONTO ", 2), TagCount::new("#TRANS ", 1)]
        );
        assert_eq!(table.labels(), vec!["#KONTO ", "#TRANS "]);
        assert_eq!(table.counts(), vec![2, 1]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let table = FrequencyTable::from_tags([
            "#VER A 1", "#RAR 0 2024", "#TRANS 1", "#RAR -1 2023", "#VER A 2",
            "other",
        ]);

        assert_eq!(
            table.labels(),
            vec!["#VER ", "#RAR ", "#TRANS ", "other"]
        );
        assert_eq!(table.counts(), vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_unmatched_values_are_kept_verbatim() {
        let table = FrequencyTable::from_tags(["#FLAGGA", "#FLAGGA", "1930"]);
        assert_eq!(table.get("#FLAGGA"), Some(2));
        assert_eq!(table.get("1930"), Some(1));
        assert_eq!(table.get("#FLAGGA "), None);
    }

    #[test]
    fn test_total_excludes_braces() {
        let lines = ["#VER A 1", "{", "#TRANS 1 x", "#TRANS 2 x", "}", "{"];
        let table = FrequencyTable::from_tags(lines);
        let braces = lines.iter().filter(|s| parse::is_brace(s)).count();
        assert_eq!(table.total(), lines.len() - braces);
    }

    #[test]
    fn test_only_braces() {
        let table = FrequencyTable::from_tags(["{", "}"]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn test_display() {
        let table = FrequencyTable::from_tags(["#KONTO 1 a", "#KONTO 2 b"]);
        assert_eq!(table.to_string(), format!("{:32} 2\n", "#KONTO "));
    }
}
