use crate::dashboards::d400_lead_report::state::LeadDashboardState;
use crate::dashboards::d400_lead_report::ui::{AccessGate, LeadReportDashboard};
use contracts::shared::settings::Settings;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let settings = Settings::default();
    log::info!("Lead data source: {}", settings.request_url());

    // Dashboard state lives for the whole session; the gate only hides it.
    let state = LeadDashboardState::new(settings);
    provide_context(state);

    view! {
        <Show
            when=move || state.unlocked.get()
            fallback=|| view! { <AccessGate /> }
        >
            <LeadReportDashboard />
        </Show>
    }
}
