use crate::dashboards::d400_lead_report::dates::DateReader;
use crate::dashboards::d400_lead_report::export::DEFAULT_FILE_PREFIX;
use crate::dashboards::d400_lead_report::source::{request_url, GET_DATA_ACTION};
use serde::Deserialize;

/// Apps Script deployment serving the lead sheet
macro_rules! default_data_source_url {
    () => {
        "https://script.google.com/macros/s/AKfycbzCSYdiE2ewVzpuIuk8cXoP_Lz810bqZwkh-Cg9VciUFoWClrnsZISOwmQBHqFZu_9l/exec"
    };
}

/// Default settings embedded in every binary
pub const DEFAULT_SETTINGS: &str = concat!(
    r#"
[data_source]
url = ""#,
    default_data_source_url!(),
    r#""
action = "getData"

[export]
file_prefix = "SML_Group_Export"

[access]
passcode = "1"

[dates]
utc_offset_minutes = 0
"#
);

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    #[serde(default)]
    pub data_source: DataSourceSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub access: AccessSettings,
    #[serde(default)]
    pub dates: DateSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DataSourceSettings {
    pub url: String,
    #[serde(default = "default_action")]
    pub action: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub file_prefix: String,
}

/// Placeholder gate in front of the dashboard; not an authentication mechanism
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AccessSettings {
    pub passcode: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DateSettings {
    /// Offset (minutes east of UTC) used to take the calendar day of timestamps
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_action() -> String {
    GET_DATA_ACTION.to_string()
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            url: default_data_source_url!().to_string(),
            action: default_action(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl Default for AccessSettings {
    fn default() -> Self {
        Self {
            passcode: "1".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn request_url(&self) -> String {
        request_url(&self.data_source.url, &self.data_source.action)
    }

    pub fn date_reader(&self) -> DateReader {
        DateReader::from_offset_minutes(self.dates.utc_offset_minutes)
    }
}

impl AccessSettings {
    pub fn admits(&self, input: &str) -> bool {
        input.trim() == self.passcode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_load() {
        let settings = Settings::from_toml(DEFAULT_SETTINGS);
        assert!(settings.is_ok());
        assert_eq!(settings.unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings = Settings::from_toml(
            r#"
            [data_source]
            url = "http://localhost:8080/leads"

            [dates]
            utc_offset_minutes = 330
            "#,
        )
        .unwrap();
        assert_eq!(settings.request_url(), "http://localhost:8080/leads?action=getData");
        assert_eq!(settings.export.file_prefix, "SML_Group_Export");
        assert_eq!(settings.date_reader().offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn test_access_gate() {
        let access = AccessSettings::default();
        assert!(access.admits("1"));
        assert!(access.admits(" 1 "));
        assert!(!access.admits("2"));
    }
}
