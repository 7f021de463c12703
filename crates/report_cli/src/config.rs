use contracts::shared::settings::{Settings, DEFAULT_SETTINGS};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load settings from config.toml
///
/// Search order:
/// 1. Explicit `--config` path
/// 2. Next to the executable
/// 3. Embedded defaults
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_settings(path);
    }

    if let Some(config_path) = config_next_to_exe() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return read_settings(&config_path);
        }
        tracing::warn!("{} not found at: {}", CONFIG_FILE_NAME, config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    Ok(Settings::from_toml(DEFAULT_SETTINGS)?)
}

fn config_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    Some(exe_path.parent()?.join(CONFIG_FILE_NAME))
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(Settings::from_toml(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let settings = Settings::from_toml(DEFAULT_SETTINGS).unwrap();
        assert_eq!(settings.data_source.action, "getData");
        assert_eq!(settings.export.file_prefix, "SML_Group_Export");
    }

    #[test]
    fn test_explicit_config_overrides_sections() {
        let path = std::env::temp_dir().join(format!("lead-report-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[data_source]\nurl = \"http://localhost:8080/exec\"\n\n[dates]\nutc_offset_minutes = 330\n",
        )
        .unwrap();

        let settings = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.request_url(), "http://localhost:8080/exec?action=getData");
        assert_eq!(settings.dates.utc_offset_minutes, 330);
        assert_eq!(settings.export.file_prefix, "SML_Group_Export");
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let path = Path::new("/nonexistent/lead-report/config.toml");
        assert!(load_settings(Some(path)).is_err());
    }
}
