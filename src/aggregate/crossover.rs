//! Grouping and ordering of crossover points.

use crate::model::CrossoverRow;
use serde::Serialize;

/// Maximum crossover points shown per operation in text output.
pub const DISPLAY_CAP: usize = 10;

/// Crossover rows for one operation, ascending by crossover size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossoverGroup {
    pub operation: String,
    pub rows: Vec<CrossoverRow>,
}

impl CrossoverGroup {
    /// `(size, "a vs b")` pairs for annotation.
    #[must_use]
    pub fn labelled_sizes(&self) -> Vec<(u64, String)> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.size_at_crossover
                    .map(|size| (size, format!("{} vs {}", row.a, row.b)))
            })
            .collect()
    }
}

/// Group rows by operation (verbatim, first-insertion order), sort each group
/// by size and keep at most `cap` rows.
///
/// Rows without a parseable size are skipped. The sort is stable, so rows with
/// equal sizes keep their input order.
#[must_use]
pub fn summarize(rows: &[CrossoverRow], cap: usize) -> Vec<CrossoverGroup> {
    let mut groups: Vec<CrossoverGroup> = Vec::new();

    for row in rows.iter().filter(|row| row.size_at_crossover.is_some()) {
        match groups.iter_mut().find(|g| g.operation == row.operation) {
            Some(group) => group.rows.push(row.clone()),
            None => groups.push(CrossoverGroup {
                operation: row.operation.clone(),
                rows: vec![row.clone()],
            }),
        }
    }

    for group in &mut groups {
        group.rows.sort_by_key(|row| row.size_at_crossover);
        group.rows.truncate(cap);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(op: &str, a: &str, b: &str, size: Option<u64>) -> CrossoverRow {
        CrossoverRow {
            operation: op.to_string(),
            a: a.to_string(),
            b: b.to_string(),
            size_at_crossover: size,
        }
    }

    #[test]
    fn groups_sorted_in_first_insertion_order() {
        let rows = vec![
            row("search", "a", "b", Some(300)),
            row("insert", "a", "b", Some(50)),
            row("search", "c", "d", Some(100)),
        ];
        let groups = summarize(&rows, DISPLAY_CAP);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].operation, "search");
        assert_eq!(groups[0].rows[0].size_at_crossover, Some(100));
        assert_eq!(groups[0].rows[1].size_at_crossover, Some(300));
        assert_eq!(groups[1].operation, "insert");
    }

    #[test]
    fn cap_keeps_smallest_sizes() {
        let rows: Vec<_> = (0..15u64)
            .rev()
            .map(|i| row("insert", "a", "b", Some(i * 10)))
            .collect();
        let groups = summarize(&rows, DISPLAY_CAP);
        assert_eq!(groups[0].rows.len(), 10);
        assert_eq!(groups[0].rows[0].size_at_crossover, Some(0));
        assert_eq!(groups[0].rows[9].size_at_crossover, Some(90));
    }

    #[test]
    fn unparseable_sizes_are_skipped() {
        let rows = vec![row("insert", "a", "b", None), row("remove", "a", "a", Some(5))];
        let groups = summarize(&rows, DISPLAY_CAP);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].operation, "remove");
        assert_eq!(groups[0].labelled_sizes(), vec![(5, "a vs a".to_string())]);
    }

    #[test]
    fn operation_strings_are_not_normalized() {
        let rows = vec![row("Insert", "a", "b", Some(1)), row("insert", "a", "b", Some(2))];
        assert_eq!(summarize(&rows, DISPLAY_CAP).len(), 2);
    }

    #[test]
    fn uncapped_keeps_everything() {
        let rows: Vec<_> = (0..25u64).map(|i| row("x", "a", "b", Some(i))).collect();
        assert_eq!(summarize(&rows, usize::MAX)[0].rows.len(), 25);
    }
}
