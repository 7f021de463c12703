use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Field names the dashboard reads from a lead record
pub mod fields {
    pub const VISIT_DATE: &str = "visitdate";
    pub const DATE: &str = "date";
    pub const BRANCH: &str = "branch";
    pub const EXEC_NAME: &str = "execname";
    pub const SECTOR: &str = "sector";
    pub const STATUS: &str = "status";
    pub const BUSINESS_CATEGORY: &str = "businesscategory";
    pub const OWNER_NAME: &str = "ownername";
    pub const NAME: &str = "name";
    pub const OWNER_NUMBER: &str = "ownernumber";
    pub const MOBILE: &str = "mobile";
    pub const CONTACT: &str = "contact";

    /// Date lookup order: visit date first, generic date second
    pub const DATE_FALLBACK: [&str; 2] = [VISIT_DATE, DATE];
    pub const CATEGORY_FALLBACK: [&str; 2] = [BUSINESS_CATEGORY, SECTOR];
    pub const OWNER_NAME_FALLBACK: [&str; 2] = [OWNER_NAME, NAME];
    pub const OWNER_CONTACT_FALLBACK: [&str; 3] = [OWNER_NUMBER, MOBILE, CONTACT];
}

/// A single lead row as delivered by the data source.
///
/// The source has no fixed schema, so the record is kept as an ordered JSON object.
/// Field order is the order of the source document (`serde_json/preserve_order`);
/// the CSV header and status-field detection depend on it.
///
/// Cloning is cheap: the field map is shared.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct LeadRecord {
    fields: Arc<Map<String, Value>>,
}

impl From<Map<String, Value>> for LeadRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }
}

impl Serialize for LeadRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl LeadRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field names in source order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Textual value of a present (non-blank) field
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    /// First present field out of a fallback chain
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Like [`first_text`](Self::first_text) but with a display default
    pub fn text_or(&self, keys: &[&str], default: &str) -> String {
        self.first_text(keys).unwrap_or_else(|| default.to_string())
    }

    /// Raw string value, used for exact-match filtering.
    ///
    /// Non-string values return `None`: a numeric branch never equals a selected branch name.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Date value from the first present date field
    pub fn date_value(&self) -> Option<&Value> {
        fields::DATE_FALLBACK
            .iter()
            .filter_map(|key| self.get(key))
            .find(|value| !is_blank(value))
    }
}

/// Missing, `null` and empty strings are all treated as "no value"
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Render a JSON value as display text; `None` for blank values.
///
/// Strings are returned verbatim, scalars via their JSON text, and nested
/// objects/arrays as compact JSON.
pub fn value_text(value: &Value) -> Option<String> {
    if is_blank(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
