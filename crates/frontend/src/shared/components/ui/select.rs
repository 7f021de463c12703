use leptos::prelude::*;

/// Labelled `<select>` over `(value, label)` options
#[component]
pub fn Select(
    /// Label text
    #[prop(into)]
    label: String,
    /// Currently selected option value
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// ID for the select element
    id: &'static str,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group">
            <label class="form__label" for=id>
                {label}
            </label>
            <select
                id=id
                class="form__select"
                disabled=move || disabled.get().unwrap_or(false)
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.get() == val_clone;
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
