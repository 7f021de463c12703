use super::aggregate::{
    branch_distribution, status_counts, GroupSummary, LeadStatus, StatusCounts,
};
use super::record::LeadRecord;
use super::schema::LeadSchema;
use serde::{Deserialize, Serialize};

/// Canvas id of the status pie chart
pub const STATUS_CHART_ID: &str = "cStatus";
/// Canvas id of the branch bar chart
pub const BRANCH_CHART_ID: &str = "cMain";

pub const STATUS_SERIES_LABEL: &str = "Lead Status";
pub const BRANCH_SERIES_LABEL: &str = "Leads by Branch";
pub const DEFAULT_BAR_COLOR: &str = "#1a73e8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// Chart-ready series: parallel label / value vectors in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub series_label: String,
    /// One colour per slice, or a single colour for every bar
    pub colors: Vec<String>,
}

impl ChartSeries {
    pub fn status(counts: &StatusCounts) -> Self {
        Self {
            kind: ChartKind::Pie,
            labels: LeadStatus::ALL
                .iter()
                .map(|status| status.label().to_string())
                .collect(),
            values: LeadStatus::ALL
                .iter()
                .map(|status| counts.get(*status))
                .collect(),
            series_label: STATUS_SERIES_LABEL.to_string(),
            colors: LeadStatus::ALL
                .iter()
                .map(|status| status.color().to_string())
                .collect(),
        }
    }

    pub fn branches(summary: &GroupSummary) -> Self {
        let (labels, values) = summary.counts().into_iter().unzip();
        Self {
            kind: ChartKind::Bar,
            labels,
            values,
            series_label: BRANCH_SERIES_LABEL.to_string(),
            colors: vec![DEFAULT_BAR_COLOR.to_string()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Status label to drill into after a click on `chart_id`; only the status pie drills down
pub fn drill_target(chart_id: &str, clicked_label: &str) -> Option<String> {
    (chart_id == STATUS_CHART_ID).then(|| clicked_label.to_string())
}

/// Everything the dashboard page renders for one active view
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub counts: StatusCounts,
    pub status_chart: ChartSeries,
    pub branch_chart: ChartSeries,
}

impl DashboardView {
    pub fn build(active_view: &[LeadRecord], schema: &LeadSchema) -> Self {
        let counts = status_counts(active_view, schema);
        Self {
            counts,
            status_chart: ChartSeries::status(&counts),
            branch_chart: ChartSeries::branches(&branch_distribution(active_view)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_lead_report::record::test_support::records;
    use serde_json::json;

    #[test]
    fn test_dashboard_view_series() {
        let data = records(vec![
            json!({"branch": "A", "status": "Interested"}),
            json!({"branch": "B", "status": "Follow-up Required"}),
            json!({"branch": "A", "status": "Not Interested"}),
            json!({"status": "Interested"}),
        ]);
        let view = DashboardView::build(&data, &LeadSchema::detect(&data));

        assert_eq!(view.counts.total, 4);
        assert_eq!(view.status_chart.kind, ChartKind::Pie);
        assert_eq!(
            view.status_chart.labels,
            vec!["Interested", "Follow-up Required", "Not Interested"]
        );
        assert_eq!(view.status_chart.values, vec![2, 1, 1]);
        assert_eq!(view.status_chart.colors.len(), 3);

        assert_eq!(view.branch_chart.kind, ChartKind::Bar);
        assert_eq!(view.branch_chart.labels, vec!["A", "B", "Unknown"]);
        assert_eq!(view.branch_chart.values, vec![2, 1, 1]);
        assert_eq!(view.branch_chart.colors, vec![DEFAULT_BAR_COLOR]);
    }

    #[test]
    fn test_empty_view_has_zero_slices_and_no_bars() {
        let view = DashboardView::build(&[], &LeadSchema::default());
        assert_eq!(view.status_chart.values, vec![0, 0, 0]);
        assert!(view.branch_chart.is_empty());
    }

    #[test]
    fn test_only_status_chart_drills_down() {
        assert_eq!(
            drill_target(STATUS_CHART_ID, "Interested"),
            Some("Interested".to_string())
        );
        assert_eq!(drill_target(BRANCH_CHART_ID, "A"), None);
    }

    #[test]
    fn test_chart_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ChartKind::Pie).unwrap(), "\"pie\"");
    }
}
