use crate::dashboards::d400_lead_report::state::LeadDashboardState;
use crate::shared::components::stat_card::StatCard;
use contracts::dashboards::d400_lead_report::LeadStatus;
use leptos::prelude::*;

/// Total plus one tile per status. Clicking a tile opens the drill-down for it.
#[component]
pub fn StatusTiles() -> impl IntoView {
    let state = expect_context::<LeadDashboardState>();
    let counts = move || state.view.with(|view| view.counts);

    let total = Signal::derive(move || counts().total);
    let interested = Signal::derive(move || counts().get(LeadStatus::Interested));
    let follow_up = Signal::derive(move || counts().get(LeadStatus::FollowUpRequired));
    let not_interested = Signal::derive(move || counts().get(LeadStatus::NotInterested));

    view! {
        <div class="stat-cards">
            <StatCard
                label="Total Leads"
                icon_name="users"
                value=total
                on_click=Callback::new(move |_| state.open_status("Total"))
            />
            <StatCard
                label="Interested"
                icon_name="thumbs-up"
                tone="success"
                value=interested
                on_click=Callback::new(move |_| state.open_status("Interested"))
            />
            <StatCard
                label="Follow-up"
                icon_name="clock"
                tone="warning"
                value=follow_up
                on_click=Callback::new(move |_| state.open_status("Follow-up"))
            />
            <StatCard
                label="Not Interested"
                icon_name="x-circle"
                tone="danger"
                value=not_interested
                on_click=Callback::new(move |_| state.open_status("Not Interested"))
            />
        </div>
    }
}
