mod dashboard;
mod drilldown;
mod filters;
mod gate;
mod kpi;

pub use dashboard::LeadReportDashboard;
pub use drilldown::DrillDownModal;
pub use filters::LeadFilters;
pub use gate::AccessGate;
pub use kpi::StatusTiles;
