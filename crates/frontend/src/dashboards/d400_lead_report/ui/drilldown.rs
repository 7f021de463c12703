use crate::dashboards::d400_lead_report::state::LeadDashboardState;
use crate::shared::components::stat_card::format_count;
use crate::shared::components::ui::Button;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::dashboards::d400_lead_report::drilldown::{DetailRow, SummaryRow};
use contracts::dashboards::d400_lead_report::{DrillLevel, GroupId};
use leptos::prelude::*;

/// Modal for the Status -> Sector -> Detail drill-down
#[component]
pub fn DrillDownModal() -> impl IntoView {
    let state = expect_context::<LeadDashboardState>();
    let level = Memo::new(move |_| state.drill.with(|drill| drill.level().cloned()));
    let title = Signal::derive(move || {
        level.with(|level| level.as_ref().map(DrillLevel::title).unwrap_or_default())
    });

    let body = move || match level.get() {
        Some(DrillLevel::Status { rows, .. }) => view! {
            <SummaryTable
                key_header="Branch"
                rows=rows
                on_open=Callback::new(move |id| state.open_sector(id))
            />
        }
        .into_any(),
        Some(DrillLevel::Sector { rows, .. }) => view! {
            <div class="drilldown__toolbar">
                <Button variant="secondary" on_click=Callback::new(move |_| state.back())>
                    {icon("chevron-left")}
                    " Back to Branch"
                </Button>
            </div>
            <SummaryTable
                key_header="Sector"
                rows=rows
                on_open=Callback::new(move |id| state.open_detail(id))
            />
        }
        .into_any(),
        Some(DrillLevel::Detail { rows }) => view! {
            <DetailTable rows=rows />
            <div class="drilldown__toolbar">
                <Button variant="secondary" on_click=Callback::new(move |_| state.close_drill())>
                    "Close"
                </Button>
            </div>
        }
        .into_any(),
        None => ().into_any(),
    };

    view! {
        <ModalFrame
            title=title
            modal_class="drilldown"
            on_close=Callback::new(move |_| state.close_drill())
        >
            {body}
        </ModalFrame>
    }
}

#[component]
fn SummaryTable(
    key_header: &'static str,
    rows: Vec<SummaryRow>,
    on_open: Callback<GroupId>,
) -> impl IntoView {
    view! {
        <table class="table drilldown__table">
            <thead>
                <tr>
                    <th>{key_header}</th>
                    <th class="table__cell--numeric">"Leads"</th>
                </tr>
            </thead>
            <tbody>
                <For each=move || rows.clone() key=|row| row.id let:row>
                    <tr>
                        <td>{row.key.clone()}</td>
                        <td class="table__cell--numeric">
                            <a
                                href="#"
                                class="drilldown__link"
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    on_open.run(row.id);
                                }
                            >
                                {format_count(row.count)}
                            </a>
                        </td>
                    </tr>
                </For>
            </tbody>
        </table>
    }
}

#[component]
fn DetailTable(rows: Vec<DetailRow>) -> impl IntoView {
    let rows = rows
        .into_iter()
        .map(|row| {
            view! {
                <tr>
                    <td>{row.business_category}</td>
                    <td>{row.owner_name}</td>
                    <td>{row.owner_contact}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="table drilldown__table">
            <thead>
                <tr>
                    <th>"Business Category"</th>
                    <th>"Owner Name"</th>
                    <th>"Owner Contact"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
