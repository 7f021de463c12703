use crate::dashboards::d400_lead_report::state::LeadDashboardState;
use crate::shared::components::ui::Select;
use crate::shared::icons::icon;
use contracts::dashboards::d400_lead_report::{Choice, FilterOptions};
use leptos::prelude::*;

/// Month / branch / employee / sector selectors
#[component]
pub fn LeadFilters() -> impl IntoView {
    let state = expect_context::<LeadDashboardState>();
    let selection = state.selection;
    let options = Memo::new(move |_| state.store.with(|store| store.options().clone()));

    let month_options = Signal::derive(FilterOptions::month_options);
    let branch_options = Signal::derive(move || {
        options.with(|o| FilterOptions::category_options(&o.branches, "All Branches"))
    });
    let employee_options = Signal::derive(move || {
        options.with(|o| FilterOptions::category_options(&o.employees, "All Employees"))
    });
    let sector_options = Signal::derive(move || {
        options.with(|o| FilterOptions::category_options(&o.sectors, "All Sectors"))
    });

    let active_count = move || selection.with(|s| s.active_count());
    let reset = move |_| {
        state.update_selection(|s| *s = Default::default());
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                {icon("filter")}
                <span class="filter-panel__title">"Filters"</span>
                <Show when=move || { active_count() > 0 }>
                    <span class="badge badge--primary">{active_count}</span>
                    <button class="button button--ghost" on:click=reset>"Reset"</button>
                </Show>
            </div>
            <div class="filter-panel-content">
                <Select
                    id="fMonth"
                    label="Month"
                    value=Signal::derive(move || selection.with(|s| s.month.select_value()))
                    options=month_options
                    on_change=Callback::new(move |value: String| {
                        state.update_selection(|s| s.month = Choice::month_from_select(&value));
                    })
                />
                <Select
                    id="fBranch"
                    label="Branch"
                    value=Signal::derive(move || selection.with(|s| s.branch.select_value()))
                    options=branch_options
                    on_change=Callback::new(move |value: String| {
                        state.update_selection(|s| s.branch = Choice::from_select(&value));
                    })
                />
                <Select
                    id="fEmp"
                    label="Employee"
                    value=Signal::derive(move || selection.with(|s| s.employee.select_value()))
                    options=employee_options
                    on_change=Callback::new(move |value: String| {
                        state.update_selection(|s| s.employee = Choice::from_select(&value));
                    })
                />
                <Select
                    id="fSector"
                    label="Sector"
                    value=Signal::derive(move || selection.with(|s| s.sector.select_value()))
                    options=sector_options
                    on_change=Callback::new(move |value: String| {
                        state.update_selection(|s| s.sector = Choice::from_select(&value));
                    })
                />
            </div>
        </div>
    }
}
