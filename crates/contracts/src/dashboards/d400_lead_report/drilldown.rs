//! Modal drill-down: Status -> Sector -> Detail.
//!
//! ```text
//!            open_status(label)
//!   closed ──────────────────────▶ Status ◀──────────┐
//!                                    │ open_sector(id) │ back()
//!                                    ▼                 │
//!                                  Sector ─────────────┘
//!                                    │ open_detail(id)
//!                                    ▼
//!                                  Detail ──close()──▶ closed
//! ```
//!
//! Clickable rows carry a [`GroupId`]; the records behind it live in a registry owned by
//! [`DrillDown`]. The registry only holds the rows of the level currently shown and is
//! emptied on close, so it cannot grow across repeated openings. Ids are never reused,
//! which makes a click on a row of a replaced level fail instead of opening another group.

use super::aggregate::{group_by_field, GroupSummary, NOT_AVAILABLE};
use super::record::{fields, LeadRecord};
use super::schema::LeadSchema;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Pseudo-label meaning "every status"
pub const TOTAL_LABEL: &str = "Total";

/// Chart / tile labels that differ from the stored status value
pub const STATUS_LABEL_ALIASES: &[(&str, &str)] = &[("Follow-up", "Follow-up Required")];

pub const DETAIL_TITLE: &str = "Lead Owner Details";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrillDownError {
    #[error("No drill-down level is open")]
    NotOpen,

    #[error("Group {0} is not part of the current level")]
    UnknownGroup(GroupId),

    #[error("The current level has no parent to go back to")]
    NoParentLevel,
}

/// Opaque identifier of a clickable summary row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grp_{}", self.0)
    }
}

/// Which records the status level covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusScope {
    All,
    Label(String),
}

impl StatusScope {
    /// Translate a clicked label: aliases first, then the "Total" pseudo-label
    pub fn resolve(label: &str) -> Self {
        let label = STATUS_LABEL_ALIASES
            .iter()
            .find(|(alias, _)| *alias == label)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(label);

        if label == TOTAL_LABEL {
            StatusScope::All
        } else {
            StatusScope::Label(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusScope::All => TOTAL_LABEL,
            StatusScope::Label(label) => label,
        }
    }

    pub fn admits(&self, status: &str) -> bool {
        match self {
            StatusScope::All => true,
            StatusScope::Label(label) => label == status,
        }
    }
}

/// Clickable `key | count` row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub id: GroupId,
    pub key: String,
    pub count: usize,
}

/// One lead in the detail table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub business_category: String,
    pub owner_name: String,
    pub owner_contact: String,
}

impl DetailRow {
    pub fn from_record(record: &LeadRecord) -> Self {
        Self {
            business_category: record.text_or(&fields::CATEGORY_FALLBACK, NOT_AVAILABLE),
            owner_name: record.text_or(&fields::OWNER_NAME_FALLBACK, NOT_AVAILABLE),
            owner_contact: record.text_or(&fields::OWNER_CONTACT_FALLBACK, NOT_AVAILABLE),
        }
    }
}

/// The modal content currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillLevel {
    /// Branches within one status
    Status {
        scope: StatusScope,
        rows: Vec<SummaryRow>,
    },
    /// Sectors within one branch of a status
    Sector {
        scope: StatusScope,
        branch: String,
        rows: Vec<SummaryRow>,
    },
    /// Individual leads of one sector
    Detail { rows: Vec<DetailRow> },
}

impl DrillLevel {
    pub fn title(&self) -> String {
        match self {
            DrillLevel::Status { scope, .. } => format!("{} - Leads by Branch", scope.label()),
            DrillLevel::Sector { scope, branch, .. } => {
                format!("{} - Sector Distribution ({})", branch, scope.label())
            }
            DrillLevel::Detail { .. } => DETAIL_TITLE.to_string(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self, DrillLevel::Sector { .. })
    }

    pub fn summary_rows(&self) -> &[SummaryRow] {
        match self {
            DrillLevel::Status { rows, .. } | DrillLevel::Sector { rows, .. } => rows,
            DrillLevel::Detail { .. } => &[],
        }
    }
}

/// Parent payload kept while the status level or one of its children is open
#[derive(Debug, Clone)]
struct StatusContext {
    scope: StatusScope,
    /// Active view narrowed to `scope`
    records: Vec<LeadRecord>,
}

#[derive(Debug, Clone)]
struct RegisteredGroup {
    key: String,
    records: Vec<LeadRecord>,
}

/// Drill-down state machine with its group registry
#[derive(Debug, Default)]
pub struct DrillDown {
    level: Option<DrillLevel>,
    context: Option<StatusContext>,
    registry: HashMap<GroupId, RegisteredGroup>,
    next_id: u64,
}

impl DrillDown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Option<&DrillLevel> {
        self.level.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.level.is_some()
    }

    /// Number of groups currently resolvable by id
    pub fn registered_groups(&self) -> usize {
        self.registry.len()
    }

    /// Open the status level for a clicked label over the current active view.
    ///
    /// Replaces whatever level was open before.
    pub fn open_status(
        &mut self,
        active_view: &[LeadRecord],
        schema: &LeadSchema,
        label: &str,
    ) -> &DrillLevel {
        let scope = StatusScope::resolve(label);
        let records = active_view
            .iter()
            .filter(|record| scope.admits(&schema.status_of(record)))
            .cloned()
            .collect();
        self.context = Some(StatusContext { scope, records });
        self.enter_status()
    }

    /// Open the sector breakdown of a branch row shown on the status level
    pub fn open_sector(&mut self, id: GroupId) -> Result<&DrillLevel, DrillDownError> {
        let scope = match (&self.level, &self.context) {
            (Some(DrillLevel::Status { .. }), Some(context)) => context.scope.clone(),
            (None, _) => return Err(DrillDownError::NotOpen),
            _ => return Err(DrillDownError::UnknownGroup(id)),
        };
        let group = self.lookup_group(id)?;

        let rows = self.register(group_by_field(&group.records, fields::SECTOR, NOT_AVAILABLE));
        Ok(&*self.level.insert(DrillLevel::Sector {
            scope,
            branch: group.key,
            rows,
        }))
    }

    /// Open the lead list of a sector row shown on the sector level
    pub fn open_detail(&mut self, id: GroupId) -> Result<&DrillLevel, DrillDownError> {
        match &self.level {
            Some(DrillLevel::Sector { .. }) => {}
            None => return Err(DrillDownError::NotOpen),
            _ => return Err(DrillDownError::UnknownGroup(id)),
        }
        let group = self.lookup_group(id)?;
        self.registry.clear();

        let rows = group.records.iter().map(DetailRow::from_record).collect();
        Ok(&*self.level.insert(DrillLevel::Detail { rows }))
    }

    /// Sector -> Status: re-aggregate the same status-filtered records
    pub fn back(&mut self) -> Result<&DrillLevel, DrillDownError> {
        match &self.level {
            Some(DrillLevel::Sector { .. }) => Ok(self.enter_status()),
            Some(_) => Err(DrillDownError::NoParentLevel),
            None => Err(DrillDownError::NotOpen),
        }
    }

    /// Drop the level, its parent payload and every registered group
    pub fn close(&mut self) {
        self.level = None;
        self.context = None;
        self.registry.clear();
    }

    fn enter_status(&mut self) -> &DrillLevel {
        let (scope, summary) = match &self.context {
            Some(context) => (
                context.scope.clone(),
                group_by_field(&context.records, fields::BRANCH, NOT_AVAILABLE),
            ),
            None => (StatusScope::All, GroupSummary::default()),
        };
        let rows = self.register(summary);
        self.level.insert(DrillLevel::Status { scope, rows })
    }

    fn lookup_group(&self, id: GroupId) -> Result<RegisteredGroup, DrillDownError> {
        self.registry
            .get(&id)
            .cloned()
            .ok_or(DrillDownError::UnknownGroup(id))
    }

    /// Replace the registry with the groups of a new level
    fn register(&mut self, summary: GroupSummary) -> Vec<SummaryRow> {
        self.registry.clear();
        summary
            .into_groups()
            .into_iter()
            .map(|group| {
                let id = GroupId(self.next_id);
                self.next_id += 1;
                let row = SummaryRow {
                    id,
                    key: group.key.clone(),
                    count: group.count(),
                };
                self.registry.insert(
                    id,
                    RegisteredGroup {
                        key: group.key,
                        records: group.records,
                    },
                );
                row
            })
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
            json!({"branch": "North", "LeadStatus": "Interested", "sector": "Retail", "ownername": "Asha", "mobile": "900"}),
            json!({"branch": "South", "LeadStatus": "Interested", "sector": "Pharma", "name": "Bala", "contact": "901"}),
            json!({"branch": "North", "LeadStatus": "Interested", "sector": "Retail", "businesscategory": "Grocery"}),
            json!({"branch": "North", "LeadStatus": "Interested"}),
            json!({"branch": "North", "LeadStatus": "Follow-up Required", "sector": "Retail"}),
            json!({"LeadStatus": "Not Interested"}),
        ])
    }

    fn key_counts(level: &DrillLevel) -> Vec<(String, usize)> {
        level
            .summary_rows()
            .iter()
            .map(|row| (row.key.clone(), row.count))
            .collect()
    }

    #[test]
    fn test_scope_resolution() {
        assert_eq!(
            StatusScope::resolve("Follow-up"),
            StatusScope::Label("Follow-up Required".into())
        );
        assert_eq!(StatusScope::resolve("Total"), StatusScope::All);
        assert_eq!(
            StatusScope::resolve("Interested"),
            StatusScope::Label("Interested".into())
        );
        assert_eq!(
            StatusScope::resolve("Not Interested").label(),
            "Not Interested"
        );
    }

    #[test]
    fn test_status_level_groups_by_branch() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        let level = drill.open_status(&data, &schema, "Interested");
        assert_eq!(level.title(), "Interested - Leads by Branch");
        assert_eq!(
            key_counts(level),
            vec![("North".to_string(), 3), ("South".to_string(), 1)]
        );
        assert_eq!(drill.registered_groups(), 2);
    }

    #[test]
    fn test_follow_up_alias_and_total() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        let level = drill.open_status(&data, &schema, "Follow-up");
        assert_eq!(level.title(), "Follow-up Required - Leads by Branch");
        assert_eq!(key_counts(level), vec![("North".to_string(), 1)]);

        let level = drill.open_status(&data, &schema, "Total");
        assert_eq!(
            key_counts(level),
            vec![
                ("North".to_string(), 4),
                ("South".to_string(), 1),
                ("N/A".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_sector_and_detail_levels() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        let north = drill.open_status(&data, &schema, "Interested").summary_rows()[0].id;
        let level = drill.open_sector(north).unwrap();
        assert_eq!(level.title(), "North - Sector Distribution (Interested)");
        assert!(level.can_go_back());
        assert_eq!(
            key_counts(level),
            vec![("Retail".to_string(), 2), ("N/A".to_string(), 1)]
        );

        let retail = level.summary_rows()[0].id;
        let level = drill.open_detail(retail).unwrap();
        assert_eq!(level.title(), "Lead Owner Details");
        assert!(!level.can_go_back());
        match level {
            DrillLevel::Detail { rows } => {
                assert_eq!(
                    rows,
                    &vec![
                        DetailRow {
                            business_category: "Retail".into(),
                            owner_name: "Asha".into(),
                            owner_contact: "900".into(),
                        },
                        DetailRow {
                            business_category: "Grocery".into(),
                            owner_name: "N/A".into(),
                            owner_contact: "N/A".into(),
                        },
                    ]
                );
            }
            other => panic!("expected detail level, got {:?}", other),
        }
        assert_eq!(drill.registered_groups(), 0);
    }

    #[test]
    fn test_back_reproduces_status_summary() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        let original = drill.open_status(&data, &schema, "Interested").clone();
        let south = original.summary_rows()[1].id;
        drill.open_sector(south).unwrap();

        let restored = drill.back().unwrap().clone();
        assert_eq!(restored.title(), original.title());
        assert_eq!(key_counts(&restored), key_counts(&original));

        // a second round trip is identical as well
        let north = restored.summary_rows()[0].id;
        drill.open_sector(north).unwrap();
        assert_eq!(key_counts(drill.back().unwrap()), key_counts(&original));
    }

    #[test]
    fn test_ids_from_replaced_levels_are_rejected() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        let stale = drill.open_status(&data, &schema, "Interested").summary_rows()[0].id;
        drill.open_status(&data, &schema, "Interested");
        assert_eq!(
            drill.open_sector(stale),
            Err(DrillDownError::UnknownGroup(stale))
        );
    }

    #[test]
    fn test_level_guards() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        assert_eq!(drill.back(), Err(DrillDownError::NotOpen));

        let id = drill.open_status(&data, &schema, "Interested").summary_rows()[0].id;
        assert_eq!(drill.back(), Err(DrillDownError::NoParentLevel));
        assert_eq!(drill.open_detail(id), Err(DrillDownError::UnknownGroup(id)));
    }

    #[test]
    fn test_close_clears_everything() {
        let data = sample();
        let schema = LeadSchema::detect(&data);
        let mut drill = DrillDown::new();

        let id = drill.open_status(&data, &schema, "Total").summary_rows()[0].id;
        drill.close();
        assert!(!drill.is_open());
        assert_eq!(drill.registered_groups(), 0);
        assert_eq!(drill.open_sector(id), Err(DrillDownError::NotOpen));
    }

    #[test]
    fn test_group_id_display() {
        assert_eq!(GroupId(7).to_string(), "grp_7");
    }
}
