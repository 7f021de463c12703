use super::record::{fields, LeadRecord};

/// Field-name bindings inferred from the dataset.
///
/// The source sheet does not guarantee the casing or exact name of the status column
/// ("Status", "LeadStatus", "visit_status" ...). Detection runs once per load on the
/// schema sample (the first record) and every status lookup goes through the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSchema {
    status_key: String,
}

impl Default for LeadSchema {
    fn default() -> Self {
        Self {
            status_key: fields::STATUS.to_string(),
        }
    }
}

impl LeadSchema {
    /// Detect bindings from the first record of the dataset
    pub fn detect(records: &[LeadRecord]) -> Self {
        Self::from_sample(records.first())
    }

    /// First field whose name contains "status" (case-insensitive) wins.
    /// With no sample, or no such field, the literal `status` key is used.
    pub fn from_sample(sample: Option<&LeadRecord>) -> Self {
        let status_key = sample
            .and_then(|record| {
                record
                    .keys()
                    .find(|key| key.to_lowercase().contains("status"))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| fields::STATUS.to_string());
        Self { status_key }
    }

    pub fn status_key(&self) -> &str {
        &self.status_key
    }

    /// Trimmed status text, empty when the record has no status value
    pub fn status_of(&self, record: &LeadRecord) -> String {
        record
            .text(&self.status_key)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}
