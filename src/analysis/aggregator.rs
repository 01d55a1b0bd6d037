//! Count aggregation and ordering.
//!
//! This module turns a column of raw report values into either a total
//! record count or a ranked list of tallies. All functions are pure and
//! accept any input, including null, empty and whitespace-only values.

use crate::models::{Label, RawValue, Strategy, Tally};
use serde::Serialize;
use std::collections::HashMap;

/// Result of counting one summary's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum SummaryCounts {
    /// Only the number of records.
    Total { total: usize },
    /// Ranked tallies by bucket label.
    Itemized {
        total: usize,
        tallies: Vec<Tally>,
        has_missing_value: bool,
    },
}

/// Count the records.
pub fn compute_total(values: &[RawValue]) -> usize {
    values.len()
}

/// Count occurrences of each normalized label and rank them.
///
/// The missing tally, if any, is always last. The rest are ordered by
/// count descending, then by label ascending.
pub fn compute_itemized_tallies(values: &[RawValue]) -> Vec<Tally> {
    let mut counts: HashMap<Label, usize> = HashMap::new();

    for value in values {
        *counts.entry(Label::normalize(value.as_deref())).or_default() += 1;
    }

    let mut tallies: Vec<Tally> = counts
        .into_iter()
        .map(|(label, count)| Tally::new(label, count))
        .collect();

    sort_tallies(&mut tallies);
    tallies
}

/// Sort tallies into ranking order.
pub fn sort_tallies(tallies: &mut [Tally]) {
    tallies.sort_by(Tally::rank);
}

/// Returns true if any value is null, empty or whitespace-only.
pub fn has_missing_value(values: &[RawValue]) -> bool {
    values
        .iter()
        .any(|v| Label::normalize(v.as_deref()).is_missing())
}

/// Count values according to the given strategy.
///
/// For [`Strategy::Total`] the itemized path is never run.
pub fn summarize(values: &[RawValue], strategy: Strategy) -> SummaryCounts {
    match strategy {
        Strategy::Total => SummaryCounts::Total {
            total: compute_total(values),
        },
        Strategy::Itemized => SummaryCounts::Itemized {
            total: compute_total(values),
            tallies: compute_itemized_tallies(values),
            has_missing_value: has_missing_value(values),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strategy;
    use proptest::prelude::*;
    use proptest::strategy::Strategy as _;

    fn values(items: &[Option<&str>]) -> Vec<RawValue> {
        items.iter().map(|v| v.map(String::from)).collect()
    }

    fn repeat(value: Option<&str>, n: usize) -> Vec<RawValue> {
        std::iter::repeat(value.map(String::from)).take(n).collect()
    }

    fn pairs(tallies: &[Tally]) -> Vec<(String, usize)> {
        tallies
            .iter()
            .map(|t| (t.label.to_string(), t.count))
            .collect()
    }

    #[test]
    fn test_compute_total() {
        assert_eq!(compute_total(&[]), 0);
        assert_eq!(compute_total(&values(&[Some("a"), None, Some("")])), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_itemized_tallies(&[]).is_empty());
        assert!(!has_missing_value(&[]));
    }

    #[test]
    fn test_itemized_counts() {
        let data = values(&[
            Some("Patient follow-up"),
            Some("Patient withdrew consent"),
            Some("Patient follow-up"),
            Some("Patient follow-up"),
            Some("Patient withdrew consent"),
            Some("Perceived drug side effects"),
        ]);

        let tallies = compute_itemized_tallies(&data);

        assert_eq!(
            pairs(&tallies),
            vec![
                ("Patient follow-up".to_string(), 3),
                ("Patient withdrew consent".to_string(), 2),
                ("Perceived drug side effects".to_string(), 1),
            ]
        );
        assert!(!has_missing_value(&data));
    }

    #[test]
    fn test_missing_values_collapse_into_one_tally() {
        let data = values(&[
            Some("Patient follow-up"),
            Some("42"),
            Some("Patient withdrew consent"),
            Some(""),
            Some("Patient follow-up"),
            Some("42"),
            Some("Patient follow-up"),
            None,
            Some("Patient withdrew consent"),
            Some("42"),
            Some("42"),
            Some("Perceived drug side effects"),
            Some("       "),
        ]);

        let tallies = compute_itemized_tallies(&data);

        assert_eq!(tallies.len(), 5);
        assert!(has_missing_value(&data));
        assert_eq!(tallies[4], Tally::new(Label::Missing, 3));
        assert_eq!(tallies[0].label.as_str(), "42");
        assert_eq!(tallies[0].count, 4);
    }

    #[test]
    fn test_ordering() {
        let mut data = Vec::new();
        data.extend(repeat(Some("January"), 3));
        data.extend(repeat(Some("Afakemonth"), 2));
        data.extend(repeat(Some("February"), 10));
        data.extend(repeat(Some("August"), 2));
        data.extend(repeat(Some(""), 40));
        data.extend(repeat(None, 2));
        data.extend(repeat(Some("March"), 7));
        data.extend(repeat(Some("April"), 2));
        data.extend(repeat(Some("May"), 15));
        // Interleave so input order cannot leak into the result
        data.reverse();
        data.rotate_left(17);

        let tallies = compute_itemized_tallies(&data);

        assert_eq!(
            pairs(&tallies),
            vec![
                ("May".to_string(), 15),
                ("February".to_string(), 10),
                ("March".to_string(), 7),
                ("January".to_string(), 3),
                ("Afakemonth".to_string(), 2),
                ("April".to_string(), 2),
                ("August".to_string(), 2),
                (crate::models::MISSING.to_string(), 42),
            ]
        );
    }

    #[test]
    fn test_missing_last_even_when_smallest() {
        let data = values(&[Some("a"), Some("a"), Some("b"), None]);
        let tallies = compute_itemized_tallies(&data);

        assert_eq!(tallies.last().map(|t| t.label.clone()), Some(Label::Missing));
        assert_eq!(tallies.last().map(|t| t.count), Some(1));
    }

    #[test]
    fn test_values_are_trimmed_before_grouping() {
        let data = values(&[Some("Yes"), Some(" Yes"), Some("Yes  "), Some("yes")]);
        let tallies = compute_itemized_tallies(&data);

        assert_eq!(
            pairs(&tallies),
            vec![("Yes".to_string(), 3), ("yes".to_string(), 1)]
        );
    }

    #[test]
    fn test_summarize_total_skips_itemizing() {
        let data = values(&[Some("a"), None]);
        let counts = summarize(&data, Strategy::Total);

        assert_eq!(counts, SummaryCounts::Total { total: 2 });
    }

    #[test]
    fn test_summarize_itemized() {
        let data = values(&[Some("a"), None, Some("a")]);

        match summarize(&data, Strategy::Itemized) {
            SummaryCounts::Itemized {
                total,
                tallies,
                has_missing_value,
            } => {
                assert_eq!(total, 3);
                assert_eq!(tallies.len(), 2);
                assert!(has_missing_value);
            }
            other => panic!("expected itemized counts, got {:?}", other),
        }
    }

    fn raw_value_strategy() -> impl proptest::strategy::Strategy<Value = RawValue> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            Just(Some("   ".to_string())),
            "[a-e ]{0,4}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_input_length(data in prop::collection::vec(raw_value_strategy(), 0..200)) {
            let tallies = compute_itemized_tallies(&data);
            let sum: usize = tallies.iter().map(|t| t.count).sum();
            prop_assert_eq!(sum, data.len());
            prop_assert!(tallies.iter().all(|t| t.count >= 1));
        }

        #[test]
        fn prop_missing_is_last(data in prop::collection::vec(raw_value_strategy(), 0..200)) {
            let tallies = compute_itemized_tallies(&data);
            let missing: Vec<usize> = tallies
                .iter()
                .enumerate()
                .filter(|(_, t)| t.label.is_missing())
                .map(|(i, _)| i)
                .collect();

            prop_assert_eq!(has_missing_value(&data), !missing.is_empty());
            if let Some(&idx) = missing.first() {
                prop_assert_eq!(missing.len(), 1);
                prop_assert_eq!(idx, tallies.len() - 1);
            }
        }

        #[test]
        fn prop_ranked_by_count_then_label(data in prop::collection::vec(raw_value_strategy(), 0..200)) {
            let tallies = compute_itemized_tallies(&data);
            let present: Vec<&Tally> = tallies.iter().filter(|t| !t.label.is_missing()).collect();

            for pair in present.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.count >= b.count);
                if a.count == b.count {
                    prop_assert!(a.label.as_str() < b.label.as_str());
                }
            }
        }
    }
}
