use crate::dashboards::d400_lead_report::state::LeadDashboardState;
use leptos::prelude::*;

/// Passcode prompt shown before the first load
#[component]
pub fn AccessGate() -> impl IntoView {
    let state = expect_context::<LeadDashboardState>();
    let passcode = RwSignal::new(String::new());
    let rejected = RwSignal::new(false);

    let submit = move || {
        let admitted = state.unlock(&passcode.get_untracked());
        rejected.set(!admitted);
    };

    view! {
        <div id="d400_lead_report--gate" class="gate">
            <h2 class="gate__title">"Lead Report"</h2>
            <input
                class="form__input"
                type="password"
                placeholder="Access code"
                prop:value=move || passcode.get()
                on:input=move |ev| passcode.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
            <button class="button button--primary" on:click=move |_| submit()>
                "Open dashboard"
            </button>
            <Show when=move || rejected.get()>
                <div class="gate__hint">"Unknown access code"</div>
            </Show>
        </div>
    }
}
