use super::api;
use crate::shared::export::download_text;
use chrono::{Local, Utc};
use contracts::dashboards::d400_lead_report::dates::DateReader;
use contracts::dashboards::d400_lead_report::export::{export_file_name, to_csv, CSV_CONTENT_TYPE};
use contracts::dashboards::d400_lead_report::{
    DashboardView, DrillDown, DrillDownError, DrillLevel, FilterSelection, GroupId, LeadRecord,
    LoadSequencer, RecordStore,
};
use contracts::shared::settings::Settings;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Reactive state of the lead report page, shared through context.
///
/// `store` is replaced wholesale on every successful load; `active_view` and `view`
/// are derived from it and the selection and recomputed on every change.
#[derive(Clone, Copy)]
pub struct LeadDashboardState {
    pub unlocked: RwSignal<bool>,
    pub store: RwSignal<RecordStore>,
    pub selection: RwSignal<FilterSelection>,
    pub active_view: Memo<Vec<LeadRecord>>,
    pub view: Memo<DashboardView>,
    pub drill: RwSignal<DrillDown>,
    pub loader: RwSignal<LoadSequencer>,
    pub error: RwSignal<Option<String>>,
    pub loaded_at: RwSignal<Option<String>>,
    pub settings: StoredValue<Settings>,
}

impl LeadDashboardState {
    pub fn new(settings: Settings) -> Self {
        let store = RwSignal::new(RecordStore::default());
        let selection = RwSignal::new(FilterSelection::default());
        let dates = browser_date_reader();

        let active_view = Memo::new(move |_| {
            let selection = selection.get();
            store.with(|store| store.active_view(&selection, &dates))
        });
        let view = Memo::new(move |_| {
            let schema = store.with(|store| store.schema().clone());
            active_view.with(|records| DashboardView::build(records, &schema))
        });

        Self {
            unlocked: RwSignal::new(false),
            store,
            selection,
            active_view,
            view,
            drill: RwSignal::new(DrillDown::new()),
            loader: RwSignal::new(LoadSequencer::new()),
            error: RwSignal::new(None),
            loaded_at: RwSignal::new(None),
            settings: StoredValue::new(settings),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loader.with(|loader| loader.is_loading())
    }

    /// Passcode gate in front of the first load
    pub fn unlock(&self, passcode: &str) -> bool {
        let admitted = self
            .settings
            .with_value(|settings| settings.access.admits(passcode));
        if admitted {
            self.unlocked.set(true);
            self.load();
        }
        admitted
    }

    /// Back to the gate. A load still in flight is abandoned and its result discarded.
    pub fn lock(&self) {
        self.loader.update(|loader| loader.invalidate());
        self.drill.update(|drill| drill.close());
        self.unlocked.set(false);
        log::info!("Dashboard locked");
    }

    /// Fetch the dataset. Ignored while another fetch is running.
    pub fn load(&self) {
        let Some(ticket) = self.loader.try_update(|loader| loader.begin()).flatten() else {
            log::debug!("Lead load already in flight, ignoring refresh");
            return;
        };

        let state = *self;
        let url = self.settings.with_value(|settings| settings.request_url());
        self.error.set(None);

        spawn_local(async move {
            let result = api::fetch_leads(&url).await;

            let current = state
                .loader
                .try_update(|loader| loader.finish(ticket))
                .unwrap_or(false);
            if !current {
                log::warn!("Discarding stale lead response");
                return;
            }

            match result {
                Ok(records) => {
                    log::info!("Loaded {} lead records", records.len());
                    state.drill.update(|drill| drill.close());
                    state.selection.set(FilterSelection::default());
                    state.store.set(RecordStore::new(records));
                    state
                        .loaded_at
                        .set(Some(Local::now().format("%d.%m.%Y %H:%M").to_string()));
                }
                Err(err) => {
                    log::error!("Lead load failed: {:?}", err);
                    state.error.set(Some(err.to_string()));
                }
            }
        });
    }

    pub fn update_selection(&self, f: impl FnOnce(&mut FilterSelection)) {
        self.selection.update(f);
        log::debug!("Filters: {:?}", self.selection.get_untracked());
    }

    /// Status level for a chart slice or KPI tile label
    pub fn open_status(&self, label: &str) {
        let schema = self.store.with_untracked(|store| store.schema().clone());
        self.active_view.with_untracked(|records| {
            self.drill.update(|drill| {
                let level = drill.open_status(records, &schema, label);
                log::debug!("Drill-down: {}", level.title());
            });
        });
    }

    pub fn open_sector(&self, id: GroupId) {
        self.drill_step(|drill| drill.open_sector(id));
    }

    pub fn open_detail(&self, id: GroupId) {
        self.drill_step(|drill| drill.open_detail(id));
    }

    pub fn back(&self) {
        self.drill_step(|drill| drill.back());
    }

    pub fn close_drill(&self) {
        self.drill.update(|drill| drill.close());
    }

    fn drill_step(
        &self,
        step: impl FnOnce(&mut DrillDown) -> Result<&DrillLevel, DrillDownError>,
    ) {
        self.drill.update(|drill| match step(drill) {
            Ok(level) => log::debug!("Drill-down: {}", level.title()),
            Err(err) => log::warn!("Drill-down step rejected: {}", err),
        });
    }

    /// Download the active view as CSV; nothing happens when it is empty
    pub fn export_csv(&self) {
        let csv = self.active_view.with_untracked(|records| to_csv(records));
        if csv.is_empty() {
            log::debug!("Nothing to export");
            return;
        }

        let prefix = self
            .settings
            .with_value(|settings| settings.export.file_prefix.clone());
        let file_name = export_file_name(&prefix, Utc::now().timestamp_millis());
        if let Err(err) = download_text(&csv, &file_name, CSV_CONTENT_TYPE) {
            log::error!("CSV export failed: {}", err);
            self.error.set(Some(format!("Export failed: {}", err)));
        }
    }
}

/// Read timestamps in the browser's local offset
fn browser_date_reader() -> DateReader {
    // getTimezoneOffset() is minutes *behind* UTC
    let behind = js_sys::Date::new_0().get_timezone_offset();
    DateReader::from_offset_minutes(-(behind as i32))
}
