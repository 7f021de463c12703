//! Lead report dashboard: the record pipeline behind the status / branch charts.
//!
//! Data flows one way:
//! `source` (raw body) -> `store` (immutable dataset + schema) -> `filter` (active view)
//! -> `aggregate` / `view` (counts, chart series) -> `drilldown` (modal tables).
//! `export` consumes the active view directly.

pub mod aggregate;
pub mod dates;
pub mod drilldown;
pub mod export;
pub mod filter;
pub mod record;
pub mod schema;
pub mod source;
pub mod store;
pub mod view;

pub use aggregate::{GroupSummary, LeadStatus, StatusCounts};
pub use drilldown::{DrillDown, DrillDownError, DrillLevel, GroupId, StatusScope};
pub use filter::{Choice, FilterOptions, FilterSelection};
pub use record::LeadRecord;
pub use schema::LeadSchema;
pub use source::{LoadError, LoadSequencer, LoadTicket};
pub use store::RecordStore;
pub use view::{ChartKind, ChartSeries, DashboardView};
