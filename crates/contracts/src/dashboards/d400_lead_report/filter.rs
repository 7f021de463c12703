use super::dates::DateReader;
use super::record::{fields, LeadRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Value of the "no filter" option in every selector
pub const ALL_SENTINEL: &str = "All";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One filter dimension: either everything or a single value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Choice<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl Choice<u32> {
    /// Month selector value: "All" or a 0-based month index
    pub fn month_from_select(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(month) if month < 12 => Choice::Only(month),
            _ => Choice::All,
        }
    }

    pub fn admits_month(&self, month0: u32) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(selected) => *selected == month0,
        }
    }
}

impl Choice<String> {
    pub fn from_select(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Choice::All
        } else {
            Choice::Only(value.to_string())
        }
    }

    /// Exact, case-sensitive match; a missing field never matches a specific value
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(selected) => value == Some(selected.as_str()),
        }
    }
}

impl<T: ToString> Choice<T> {
    /// Value to put back into a `<select>`
    pub fn select_value(&self) -> String {
        match self {
            Choice::All => ALL_SENTINEL.to_string(),
            Choice::Only(value) => value.to_string(),
        }
    }
}

/// Current state of the four filter selectors
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    /// 0-based calendar month
    pub month: Choice<u32>,
    pub branch: Choice<String>,
    /// Owning employee (`execname`)
    pub employee: Choice<String>,
    pub sector: Choice<String>,
}

impl FilterSelection {
    /// Number of dimensions narrowed to a single value
    pub fn active_count(&self) -> usize {
        [
            !self.month.is_all(),
            !self.branch.is_all(),
            !self.employee.is_all(),
            !self.sector.is_all(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether a record with a valid date passes all four predicates
    pub fn admits(&self, record: &LeadRecord, dates: &DateReader) -> bool {
        let Some(month0) = dates.record_month0(record) else {
            return false;
        };

        self.month.admits_month(month0)
            && self.branch.admits(record.str_field(fields::BRANCH))
            && self.employee.admits(record.str_field(fields::EXEC_NAME))
            && self.sector.admits(record.str_field(fields::SECTOR))
    }
}

/// Active view with dates read in UTC
pub fn apply(records: &[LeadRecord], selection: &FilterSelection) -> Vec<LeadRecord> {
    apply_with(records, selection, &DateReader::default())
}

/// Records passing the selection, in input order.
///
/// Records without a parsable date are always dropped, even when every dimension is "All".
pub fn apply_with(
    records: &[LeadRecord],
    selection: &FilterSelection,
    dates: &DateReader,
) -> Vec<LeadRecord> {
    records
        .iter()
        .filter(|record| selection.admits(record, dates))
        .cloned()
        .collect()
}

/// Selector options gathered from the full dataset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub branches: Vec<String>,
    pub employees: Vec<String>,
    pub sectors: Vec<String>,
}

impl FilterOptions {
    /// Distinct non-blank values, sorted ascending
    pub fn from_records(records: &[LeadRecord]) -> Self {
        let distinct = |key: &str| -> Vec<String> {
            records
                .iter()
                .filter_map(|record| record.text(key))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Self {
            branches: distinct(fields::BRANCH),
            employees: distinct(fields::EXEC_NAME),
            sectors: distinct(fields::SECTOR),
        }
    }

    /// `(value, label)` pairs for the month selector, "All" first
    pub fn month_options() -> Vec<(String, String)> {
        std::iter::once((ALL_SENTINEL.to_string(), "All Months".to_string()))
            .chain(
                MONTH_NAMES
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (i.to_string(), name.to_string())),
            )
            .collect()
    }

    /// `(value, label)` pairs for a categorical selector, "All" first
    pub fn category_options(values: &[String], all_label: &str) -> Vec<(String, String)> {
        std::iter::once((ALL_SENTINEL.to_string(), all_label.to_string()))
            .chain(values.iter().map(|v| (v.clone(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_lead_report::record::test_support::records;
    use serde_json::json;

    fn sample() -> Vec<LeadRecord> {
        records(vec![
            json!({"branch": "A", "status": "Interested", "date": "2024-01-05", "execname": "Ravi", "sector": "Retail"}),
            json!({"branch": "A", "status": "Interested", "date": "2024-02-05", "execname": "Meena", "sector": "Retail"}),
            json!({"branch": "B", "status": "Not Interested", "date": "2024-01-09", "execname": "Ravi", "sector": "Pharma"}),
            json!({"branch": "B", "status": "Interested", "date": "garbage", "execname": "Ravi"}),
            json!({"branch": "C", "status": "Interested"}),
            json!({"status": "Follow-up Required", "visitdate": "2024-01-20", "date": "bad"}),
        ])
    }

    #[test]
    fn test_month_filter_example() {
        let selection = FilterSelection {
            month: Choice::Only(0),
            ..Default::default()
        };
        let view = apply(&sample(), &selection);
        let branches: Vec<_> = view.iter().map(|r| r.text("branch")).collect();
        assert_eq!(
            branches,
            vec![Some("A".to_string()), Some("B".to_string()), None]
        );
    }

    #[test]
    fn test_all_selection_drops_only_undated_records() {
        let data = sample();
        let view = apply(&data, &FilterSelection::default());
        assert_eq!(view.len(), 4);
        let dates = DateReader::default();
        assert!(view.iter().all(|r| dates.record_date(r).is_some()));
    }

    #[test]
    fn test_output_is_ordered_subsequence() {
        let data = sample();
        let selection = FilterSelection {
            employee: Choice::Only("Ravi".into()),
            ..Default::default()
        };
        let view = apply(&data, &selection);
        let mut cursor = data.iter();
        for rec in &view {
            assert!(cursor.any(|candidate| candidate == rec));
        }
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_missing_field_never_matches_specific_value() {
        let selection = FilterSelection {
            branch: Choice::Only("A".into()),
            ..Default::default()
        };
        let view = apply(&sample(), &selection);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.str_field("branch") == Some("A")));
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let selection = FilterSelection {
            month: Choice::Only(0),
            branch: Choice::Only("B".into()),
            employee: Choice::Only("Ravi".into()),
            sector: Choice::Only("Pharma".into()),
        };
        assert_eq!(selection.active_count(), 4);
        assert_eq!(apply(&sample(), &selection).len(), 1);

        let selection = FilterSelection {
            sector: Choice::Only("Retail".into()),
            month: Choice::Only(1),
            ..Default::default()
        };
        assert_eq!(apply(&sample(), &selection).len(), 1);
    }

    #[test]
    fn test_select_value_parsing() {
        assert_eq!(Choice::month_from_select("All"), Choice::All);
        assert_eq!(Choice::month_from_select("0"), Choice::Only(0));
        assert_eq!(Choice::month_from_select("11"), Choice::Only(11));
        assert_eq!(Choice::month_from_select("12"), Choice::All);
        assert_eq!(Choice::from_select("All"), Choice::<String>::All);
        assert_eq!(Choice::from_select("North"), Choice::Only("North".to_string()));
        assert_eq!(Choice::Only(3u32).select_value(), "3");
    }

    #[test]
    fn test_filter_options_are_distinct_and_sorted() {
        let options = FilterOptions::from_records(&sample());
        assert_eq!(options.branches, vec!["A", "B", "C"]);
        assert_eq!(options.employees, vec!["Meena", "Ravi"]);
        assert_eq!(options.sectors, vec!["Pharma", "Retail"]);

        let months = FilterOptions::month_options();
        assert_eq!(months.len(), 13);
        assert_eq!(months[1], ("0".to_string(), "January".to_string()));
    }
}
