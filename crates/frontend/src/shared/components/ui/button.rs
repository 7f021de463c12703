use leptos::prelude::*;

/// Button with a variant ("primary" default, "secondary", "ghost")
#[component]
pub fn Button(
    #[prop(optional)]
    variant: Option<&'static str>,
    /// Tooltip
    #[prop(optional, into)]
    title: MaybeProp<String>,
    /// Disabled state (reactive)
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    on_click: Callback<()>,
    children: Children,
) -> impl IntoView {
    let variant_class = match variant.unwrap_or("primary") {
        "secondary" => "button button--secondary",
        "ghost" => "button button--ghost",
        _ => "button button--primary",
    };

    view! {
        <button
            type="button"
            class=variant_class
            title=move || title.get()
            disabled=move || disabled.get().unwrap_or(false)
            on:click=move |_| on_click.run(())
        >
            {children()}
        </button>
    }
}
