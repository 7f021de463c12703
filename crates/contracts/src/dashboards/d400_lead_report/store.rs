use super::dates::DateReader;
use super::filter::{apply_with, FilterOptions, FilterSelection};
use super::record::LeadRecord;
use super::schema::LeadSchema;
use super::source::{parse_records, LoadError};
use std::sync::Arc;

/// The full dataset of one successful load.
///
/// Never mutated: a refresh builds a new store and replaces the old one wholesale.
/// Schema and selector options are derived once here.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<Vec<LeadRecord>>,
    schema: LeadSchema,
    options: FilterOptions,
}

impl RecordStore {
    pub fn new(records: Vec<LeadRecord>) -> Self {
        let schema = LeadSchema::detect(&records);
        let options = FilterOptions::from_records(&records);
        Self {
            records: Arc::new(records),
            schema,
            options,
        }
    }

    /// Build a store straight from a data-source response body
    pub fn from_body(body: &str) -> Result<Self, LoadError> {
        parse_records(body).map(Self::new)
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn schema(&self) -> &LeadSchema {
        &self.schema
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Active view for a selection
    pub fn active_view(&self, selection: &FilterSelection, dates: &DateReader) -> Vec<LeadRecord> {
        apply_with(&self.records, selection, dates)
    }
}
