use crate::shared::icons::icon;
use leptos::prelude::*;

/// Group digits in threes: 12345 -> "12,345"
pub fn format_count(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Clickable KPI tile
#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// BEM modifier, e.g. "success" -> `stat-card--success`
    #[prop(optional)]
    tone: Option<&'static str>,
    #[prop(into)]
    value: Signal<usize>,
    on_click: Callback<()>,
) -> impl IntoView {
    let class = match tone {
        Some(tone) => format!("stat-card stat-card--clickable stat-card--{tone}"),
        None => "stat-card stat-card--clickable".to_string(),
    };

    view! {
        <div class=class on:click=move |_| on_click.run(())>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || format_count(value.get())}</div>
            </div>
        </div>
    }
}
