use super::record::{fields, LeadRecord};
use super::schema::LeadSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const UNKNOWN_BRANCH: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// The three canonical status values tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    Interested,
    FollowUpRequired,
    NotInterested,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [
        LeadStatus::Interested,
        LeadStatus::FollowUpRequired,
        LeadStatus::NotInterested,
    ];

    /// Exact string stored in the status column
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::Interested => "Interested",
            LeadStatus::FollowUpRequired => "Follow-up Required",
            LeadStatus::NotInterested => "Not Interested",
        }
    }

    /// Pie slice colour
    pub fn color(&self) -> &'static str {
        match self {
            LeadStatus::Interested => "#34a853",
            LeadStatus::FollowUpRequired => "#fbbc05",
            LeadStatus::NotInterested => "#ea4335",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

/// KPI counters for a record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub interested: usize,
    pub follow_up_required: usize,
    pub not_interested: usize,
}

impl StatusCounts {
    pub fn get(&self, status: LeadStatus) -> usize {
        match status {
            LeadStatus::Interested => self.interested,
            LeadStatus::FollowUpRequired => self.follow_up_required,
            LeadStatus::NotInterested => self.not_interested,
        }
    }

    /// Records carrying one of the three named statuses
    pub fn named_sum(&self) -> usize {
        self.interested + self.follow_up_required + self.not_interested
    }
}

/// Count records per canonical status.
///
/// Status values outside the three labels count toward `total` only.
pub fn status_counts(records: &[LeadRecord], schema: &LeadSchema) -> StatusCounts {
    let mut counts = StatusCounts {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        match LeadStatus::from_label(&schema.status_of(record)) {
            Some(LeadStatus::Interested) => counts.interested += 1,
            Some(LeadStatus::FollowUpRequired) => counts.follow_up_required += 1,
            Some(LeadStatus::NotInterested) => counts.not_interested += 1,
            None => {}
        }
    }

    counts
}

/// Records sharing one grouping key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    /// Members in their original relative order
    pub records: Vec<LeadRecord>,
}

impl Group {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Groups in first-occurrence order of their key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSummary {
    groups: Vec<Group>,
}

impl GroupSummary {
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.key == key)
    }

    /// `(key, count)` pairs in summary order
    pub fn counts(&self) -> Vec<(String, usize)> {
        self.groups
            .iter()
            .map(|group| (group.key.clone(), group.count()))
            .collect()
    }
}

/// Single-pass grouping; keys keep the order in which they are first seen
pub fn group_by<F>(records: &[LeadRecord], key_fn: F) -> GroupSummary
where
    F: Fn(&LeadRecord) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let key = key_fn(record);
        match index.get(&key) {
            Some(&pos) => groups[pos].records.push(record.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    records: vec![record.clone()],
                });
            }
        }
    }

    GroupSummary { groups }
}

/// Group by a field's text, substituting `default` when it is absent
pub fn group_by_field(records: &[LeadRecord], field: &str, default: &str) -> GroupSummary {
    group_by(records, |record| {
        record.text(field).unwrap_or_else(|| default.to_string())
    })
}

/// Leads per branch for the bar chart, independent of status
pub fn branch_distribution(records: &[LeadRecord]) -> GroupSummary {
    group_by_field(records, fields::BRANCH, UNKNOWN_BRANCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_lead_report::filter::{apply, Choice, FilterSelection};
    use crate::dashboards::d400_lead_report::record::test_support::records;
    use serde_json::json;

    #[test]
    fn test_counts_and_distribution_example() {
        let data = records(vec![
            json!({"branch": "A", "status": "Interested", "date": "2024-01-05"}),
            json!({"branch": "A", "status": "Interested", "date": "2024-02-05"}),
            json!({"branch": "B", "status": "Not Interested", "date": "2024-01-09"}),
        ]);
        let schema = LeadSchema::detect(&data);
        let view = apply(
            &data,
            &FilterSelection {
                month: Choice::Only(0),
                ..Default::default()
            },
        );

        let counts = status_counts(&view, &schema);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.interested, 1);
        assert_eq!(counts.follow_up_required, 0);
        assert_eq!(counts.not_interested, 1);

        let branches = branch_distribution(&view);
        assert_eq!(
            branches.counts(),
            vec![("A".to_string(), 1), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_set() {
        let schema = LeadSchema::detect(&[]);
        assert_eq!(status_counts(&[], &schema), StatusCounts::default());
        assert!(branch_distribution(&[]).is_empty());
    }

    #[test]
    fn test_unmatched_status_only_counts_toward_total() {
        let data = records(vec![
            json!({"Status": " Interested"}),
            json!({"Status": "interested"}),
            json!({"Status": "Follow-up"}),
            json!({"Status": "Follow-up Required "}),
            json!({"branch": "X"}),
        ]);
        let counts = status_counts(&data, &LeadSchema::detect(&data));
        assert_eq!(counts.total, 5);
        assert_eq!(counts.interested, 1);
        assert_eq!(counts.follow_up_required, 1);
        assert_eq!(counts.not_interested, 0);
        assert!(counts.named_sum() <= counts.total);
    }

    #[test]
    fn test_group_by_keeps_first_seen_order() {
        let data = records(vec![
            json!({"branch": "South", "n": 1}),
            json!({"branch": "North", "n": 2}),
            json!({"n": 3}),
            json!({"branch": "South", "n": 4}),
            json!({"branch": "", "n": 5}),
        ]);
        let summary = branch_distribution(&data);
        assert_eq!(
            summary.counts(),
            vec![
                ("South".to_string(), 2),
                ("North".to_string(), 1),
                ("Unknown".to_string(), 2),
            ]
        );

        let south: Vec<_> = summary
            .get("South")
            .unwrap()
            .records
            .iter()
            .map(|r| r.text("n"))
            .collect();
        assert_eq!(south, vec![Some("1".to_string()), Some("4".to_string())]);
    }

    #[test]
    fn test_group_by_is_idempotent() {
        let data = records(vec![
            json!({"sector": "Retail"}),
            json!({"sector": "Pharma"}),
            json!({"sector": "Retail"}),
        ]);
        let first = group_by_field(&data, fields::SECTOR, NOT_AVAILABLE);
        let second = group_by_field(&data, fields::SECTOR, NOT_AVAILABLE);
        assert_eq!(first, second);

        let regrouped = group_by_field(
            &first.get("Retail").unwrap().records,
            fields::SECTOR,
            NOT_AVAILABLE,
        );
        assert_eq!(regrouped.counts(), vec![("Retail".to_string(), 2)]);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            LeadStatus::from_label("Follow-up Required"),
            Some(LeadStatus::FollowUpRequired)
        );
        assert_eq!(LeadStatus::from_label("Follow-up"), None);
        assert_eq!(LeadStatus::NotInterested.color(), "#ea4335");
    }
}
