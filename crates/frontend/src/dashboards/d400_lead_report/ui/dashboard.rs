use super::{DrillDownModal, LeadFilters, StatusTiles};
use crate::dashboards::d400_lead_report::state::LeadDashboardState;
use crate::shared::chart::ChartCanvas;
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;
use contracts::dashboards::d400_lead_report::view::{
    drill_target, BRANCH_CHART_ID, STATUS_CHART_ID,
};
use leptos::prelude::*;

/// Lead report page: filters, KPI tiles, status pie, branch bars, drill-down modal
#[component]
pub fn LeadReportDashboard() -> impl IntoView {
    let state = expect_context::<LeadDashboardState>();

    let loading = Signal::derive(move || state.is_loading());
    let status_series = Signal::derive(move || state.view.with(|view| view.status_chart.clone()));
    let branch_series = Signal::derive(move || state.view.with(|view| view.branch_chart.clone()));
    let drill_open = move || state.drill.with(|drill| drill.is_open());

    let on_status_click = Callback::new(move |label: String| {
        if let Some(label) = drill_target(STATUS_CHART_ID, &label) {
            state.open_status(&label);
        }
    });

    view! {
        <div id="d400_lead_report--dashboard" class="lead-dashboard">
            <div class="page-header">
                <div class="page-header__text">
                    <h1 class="page-header__title">"Lead Report"</h1>
                    {move || state.loaded_at.get().map(|at| view! {
                        <span class="page-header__subtitle">"Updated " {at}</span>
                    })}
                </div>
                <div class="page-header__actions">
                    <Button
                        variant="secondary"
                        title="Reload data"
                        disabled=loading
                        on_click=Callback::new(move |_| state.load())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button
                        title="Download the filtered leads as CSV"
                        on_click=Callback::new(move |_| state.export_csv())
                    >
                        {icon("download")}
                        " Export CSV"
                    </Button>
                    <Button
                        variant="ghost"
                        title="Lock the dashboard"
                        on_click=Callback::new(move |_| state.lock())
                    >
                        "Lock"
                    </Button>
                </div>
            </div>

            {move || state.error.get().map(|err| view! {
                <div class="alert alert--error">
                    <strong>"Error: "</strong>
                    {err}
                </div>
            })}

            <Show when=move || loading.get()>
                <div class="lead-dashboard__loading">
                    <span>"Loading data..."</span>
                </div>
            </Show>

            <LeadFilters />
            <StatusTiles />

            <div class="lead-dashboard__charts">
                <ChartCanvas
                    canvas_id=STATUS_CHART_ID
                    series=status_series
                    on_click=on_status_click
                />
                <ChartCanvas canvas_id=BRANCH_CHART_ID series=branch_series />
            </div>

            <Show when=drill_open>
                <DrillDownModal />
            </Show>
        </div>
    }
}
