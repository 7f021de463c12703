//! Bridge to the page's Chart.js (`window.Chart`).
//!
//! Each [`ChartCanvas`] owns at most one chart instance. Re-rendering destroys the
//! previous instance bound to the canvas before creating the new one.

use contracts::dashboards::d400_lead_report::{ChartKind, ChartSeries};
use js_sys::{Array, Function, Reflect};
use leptos::html::Canvas;
use leptos::prelude::*;
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

#[derive(Serialize)]
struct ChartConfig<'a> {
    #[serde(rename = "type")]
    kind: ChartKind,
    data: ChartData<'a>,
    options: ChartOptions,
}

#[derive(Serialize)]
struct ChartData<'a> {
    labels: &'a [String],
    datasets: [Dataset<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Dataset<'a> {
    label: &'a str,
    data: &'a [usize],
    /// Chart.js takes a single colour for all bars or one per slice
    background_color: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartOptions {
    responsive: bool,
    maintain_aspect_ratio: bool,
    plugins: Value,
}

type ClickHandler = Closure<dyn FnMut(JsValue, JsValue)>;

/// A live Chart.js instance; destroyed on drop
pub struct ChartHandle {
    instance: JsValue,
    _on_click: Option<ClickHandler>,
}

impl Drop for ChartHandle {
    fn drop(&mut self) {
        let destroy = Reflect::get(&self.instance, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        if let Some(destroy) = destroy {
            if let Err(err) = destroy.call0(&self.instance) {
                log::warn!("Chart destroy failed: {:?}", err);
            }
        }
    }
}

/// Create a chart for `series` on `canvas`.
///
/// `on_click` receives the label of the clicked category.
pub fn render_chart(
    canvas: &HtmlCanvasElement,
    series: &ChartSeries,
    on_click: Option<Callback<String>>,
) -> Result<ChartHandle, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let constructor = Reflect::get(&window, &JsValue::from_str("Chart"))?;
    if !constructor.is_function() {
        return Err(JsValue::from_str("Chart.js is not loaded"));
    }
    let constructor: Function = constructor.dyn_into()?;

    let background_color = match series.colors.as_slice() {
        [single] => Value::String(single.clone()),
        colors => Value::from(colors.to_vec()),
    };
    let config = ChartConfig {
        kind: series.kind,
        data: ChartData {
            labels: &series.labels,
            datasets: [Dataset {
                label: &series.series_label,
                data: &series.values,
                background_color,
            }],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: serde_json::json!({ "legend": { "position": "bottom" } }),
        },
    };
    let config_value = config
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let click_handler = on_click.map(|callback| {
        let labels = series.labels.clone();
        Closure::wrap(Box::new(move |_event: JsValue, elements: JsValue| {
            let Ok(elements) = elements.dyn_into::<Array>() else {
                return;
            };
            if elements.length() == 0 {
                return;
            }
            let index = Reflect::get(&elements.get(0), &JsValue::from_str("index"))
                .ok()
                .and_then(|v| v.as_f64());
            if let Some(label) = index.and_then(|i| labels.get(i as usize)) {
                callback.run(label.clone());
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>)
    });

    if let Some(handler) = &click_handler {
        let options = Reflect::get(&config_value, &JsValue::from_str("options"))?;
        Reflect::set(&options, &JsValue::from_str("onClick"), handler.as_ref())?;
    }

    let args = Array::of2(canvas, &config_value);
    let instance = Reflect::construct(&constructor, &args)?;

    Ok(ChartHandle {
        instance,
        _on_click: click_handler,
    })
}

/// Canvas bound to a reactive series
#[component]
pub fn ChartCanvas(
    /// DOM id of the canvas
    canvas_id: &'static str,
    #[prop(into)] series: Signal<ChartSeries>,
    /// Click on a category (slice / bar)
    #[prop(optional)]
    on_click: Option<Callback<String>>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<Canvas>::new();
    // Chart instances are JS objects, keep them out of the Send arena
    let chart = StoredValue::new_local(None::<ChartHandle>);

    Effect::new(move |_| {
        let series = series.get();
        let Some(canvas) = canvas_ref.get() else {
            return;
        };

        chart.set_value(None);
        match render_chart(&canvas, &series, on_click) {
            Ok(handle) => chart.set_value(Some(handle)),
            Err(err) => log::error!("Failed to render chart {}: {:?}", canvas_id, err),
        }
    });

    on_cleanup(move || {
        chart.try_update_value(|handle| *handle = None);
    });

    view! {
        <div class="chart-box">
            <canvas id=canvas_id node_ref=canvas_ref></canvas>
        </div>
    }
}
