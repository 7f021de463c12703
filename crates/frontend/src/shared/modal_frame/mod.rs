use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Modal overlay with a title bar and a body region.
///
/// Closes on the header close button, on Escape, and on a click that both starts and
/// ends on the overlay itself.
#[component]
pub fn ModalFrame(
    /// Title shown in the header
    #[prop(into)]
    title: Signal<String>,
    /// Called when the modal should close
    on_close: Callback<()>,
    /// Extra class for the modal surface (`div.modal`)
    #[prop(optional)]
    modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Defer to the next tick: the overlay may be removed during its own click dispatch
    let close_deferred = move || {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close_deferred();
        }
    });
    on_cleanup(move || escape.remove());

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            close_deferred();
        }
    };

    let modal_class = match modal_class {
        Some(extra) => format!("modal {extra}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=move |ev| overlay_mouse_down.set(is_direct_overlay_event(&ev))
            on:click=handle_overlay_click
        >
            <div class=modal_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| close_deferred()>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}
