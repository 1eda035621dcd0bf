use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub database: Option<DatabaseConfig>,
    pub dataset: Option<DatasetConfig>,
    pub display: Option<DisplayConfig>,
    pub load: Option<LoadConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub csv_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub default_rows: Option<usize>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub skip_invalid_rows: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

pub const VALID_FORMATS: [&str; 3] = ["table", "json", "csv"];

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExplorerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExplorerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EPL_DB})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn database_path(&self) -> Option<&str> {
        self.database.as_ref().map(|d| d.path.as_str())
    }

    pub fn dataset_path(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.csv_path.as_str())
    }

    pub fn default_rows(&self) -> Option<usize> {
        self.display.as_ref().and_then(|d| d.default_rows)
    }

    pub fn format(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.format.as_deref())
    }

    pub fn skip_invalid_rows(&self) -> Option<bool> {
        self.load.as_ref().and_then(|l| l.skip_invalid_rows)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.database_path() {
            validate_path("database.path", path)?;
        }

        if let Some(path) = self.dataset_path() {
            validate_path("dataset.csv_path", path)?;
            validate_file_extension("dataset.csv_path", path, &["csv"])?;
        }

        if let Some(rows) = self.default_rows() {
            validate_positive_number("display.default_rows", rows, 1)?;
        }

        if let Some(format) = self.format() {
            if !VALID_FORMATS.contains(&format) {
                return Err(ExplorerError::InvalidConfigValueError {
                    field: "display.format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        VALID_FORMATS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
