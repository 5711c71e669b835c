//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::answers::Answer;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub checklist: ChecklistConfig,
    pub report: ReportConfig,
    pub form: FormConfig,
}

/// Checklist table location and column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistConfig {
    pub path: PathBuf,
    pub department_column: String,
    pub question_column: String,
}

/// Report page geometry, in millimetres unless noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Wrap threshold in characters.
    pub wrap_width: usize,
    pub line_height_mm: f32,
    pub item_column_mm: f32,
    pub mark_column_mm: f32,
    pub font_size_pt: f32,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub filename: String,
    pub title_prefix: String,
}

/// Form behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Answer used for questions the user never touched.
    pub default_answer: Answer,
    /// Refuse to generate a report while any question is unanswered.
    pub require_all_answered: bool,
}

impl AppConfig {
    /// Get config file path.
    ///
    /// Uses the platform config directory, falling back to the directory of the executable.
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("", "", "checklist-form") {
            return dirs.config_dir().join("config.toml");
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Load config, writing the defaults on first run.
    ///
    /// An invalid file is left untouched and the defaults are used instead.
    pub fn load_or_create(path: &Path) -> AppConfig {
        match Self::try_load(path) {
            ConfigLoadResult::Loaded(config) => {
                tracing::info!("Config loaded successfully");
                config
            }
            ConfigLoadResult::Missing => {
                tracing::info!("Config missing, writing defaults to {:?}", path);
                let config = AppConfig::default();
                if let Err(e) = config.save(path) {
                    tracing::warn!("Failed to write default config: {}", e);
                }
                config
            }
            ConfigLoadResult::Invalid(e) => {
                tracing::warn!("Config invalid, using defaults: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checklist.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("Checklist path cannot be empty".to_string()));
        }
        if self.checklist.department_column.trim().is_empty() || self.checklist.question_column.trim().is_empty() {
            return Err(ConfigError::Validation("Column names cannot be empty".to_string()));
        }

        let report = &self.report;
        if report.wrap_width == 0 {
            return Err(ConfigError::Validation("Wrap width must be at least 1".to_string()));
        }
        let dimensions = [
            report.line_height_mm,
            report.item_column_mm,
            report.mark_column_mm,
            report.font_size_pt,
            report.page_width_mm,
            report.page_height_mm,
        ];
        if dimensions.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(ConfigError::Validation(
                "Report dimensions must be greater than 0".to_string(),
            ));
        }
        if !report.margin_mm.is_finite() || report.margin_mm < 0.0 {
            return Err(ConfigError::Validation("Margin cannot be negative".to_string()));
        }
        if report.table_width_mm() > report.page_width_mm - 2.0 * report.margin_mm {
            return Err(ConfigError::Validation(
                "Table is wider than the printable page".to_string(),
            ));
        }
        if report.filename.trim().is_empty() {
            return Err(ConfigError::Validation("Report filename cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ReportConfig {
    /// Item column plus both mark columns.
    pub fn table_width_mm(&self) -> f32 {
        self.item_column_mm + 2.0 * self.mark_column_mm
    }
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Checklist.csv"),
            department_column: "Department".to_string(),
            question_column: "Checklist".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            wrap_width: 60,
            line_height_mm: 10.0,
            item_column_mm: 110.0,
            mark_column_mm: 40.0,
            font_size_pt: 12.0,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            filename: "Checklist_Report.pdf".to_string(),
            title_prefix: "Checklist Report".to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_answer: Answer::Yes,
            require_all_answered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_table_fits_a4() {
        let report = ReportConfig::default();
        assert_eq!(report.table_width_mm(), 190.0);
        assert!(report.table_width_mm() <= report.page_width_mm - 2.0 * report.margin_mm);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [report]
            wrap_width = 40

            [form]
            default_answer = "NO"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.wrap_width, 40);
        assert_eq!(config.report.line_height_mm, 10.0);
        assert_eq!(config.form.default_answer, Answer::No);
        assert_eq!(config.checklist.question_column, "Checklist");
    }

    #[test]
    fn test_validation_zero_wrap_width() {
        let mut config = AppConfig::default();
        config.report.wrap_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_table_too_wide() {
        let mut config = AppConfig::default();
        config.report.item_column_mm = 150.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_filename() {
        let mut config = AppConfig::default();
        config.report.filename = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_try_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        std::fs::write(&path, "[report]\nwrap_width = 0\n").unwrap();
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Invalid(_)));
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checklist-form").join("config.toml");

        let config = AppConfig::load_or_create(&path);
        assert_eq!(config.report.filename, "Checklist_Report.pdf");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Loaded(_)));

        std::fs::write(&path, "[form]\nrequire_all_answered = true\n").unwrap();
        assert!(AppConfig::load_or_create(&path).form.require_all_answered);
    }

    #[test]
    fn test_load_or_create_keeps_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\nwrap_width = 0\n").unwrap();

        let config = AppConfig::load_or_create(&path);
        assert_eq!(config.report.wrap_width, 60);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[report]\nwrap_width = 0\n");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.form.require_all_answered = true;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert!(loaded.form.require_all_answered),
            other => panic!("expected loaded config, got {other:?}"),
        }
    }
}
