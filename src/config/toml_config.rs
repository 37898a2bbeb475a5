use crate::utils::error::{Result, StaffingError};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub company: CompanySection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySection {
    pub name: String,
}

impl Default for CompanySection {
    fn default() -> Self {
        Self {
            name: "Demo Company".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub data_dir: String,
    pub company_file: String,
    pub employees_csv: String,
    pub projects_csv: String,
    pub database_path: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            company_file: "company.json".to_string(),
            employees_csv: "employees_report.csv".to_string(),
            projects_csv: "projects_report.csv".to_string(),
            database_path: "company.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub verbose: bool,
    pub json: bool,
    /// `EnvFilter` directive, e.g. `staffing::adapters=debug,info`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StaffingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StaffingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> &Path {
        Path::new(&self.storage.data_dir)
    }

    pub fn company_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.company_file)
    }

    pub fn employees_csv_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.employees_csv)
    }

    pub fn projects_csv_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.projects_csv)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.database_path)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("company.name", &self.company.name)?;
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_path("storage.company_file", &self.storage.company_file)?;
        validate_path("storage.employees_csv", &self.storage.employees_csv)?;
        validate_path("storage.projects_csv", &self.storage.projects_csv)?;
        validate_path("storage.database_path", &self.storage.database_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[company]
name = "Acme"

[storage]
data_dir = "/tmp/acme"
company_file = "acme.json"
employees_csv = "staff.csv"
projects_csv = "projects.csv"
database_path = "acme.db"

[logging]
verbose = true
json = true
filter = "staffing=trace"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.company.name, "Acme");
        assert!(config.logging.verbose);
        assert!(config.logging.json);
        assert_eq!(config.logging.filter.as_deref(), Some("staffing=trace"));
        assert_eq!(config.company_path(), PathBuf::from("/tmp/acme/acme.json"));
        assert_eq!(config.employees_csv_path(), PathBuf::from("/tmp/acme/staff.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_toml_str("[company]\nname = \"Solo\"\n").unwrap();
        assert_eq!(config.company.name, "Solo");
        assert_eq!(config.storage, StorageSection::default());
        assert_eq!(config.logging, LoggingSection::default());
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STAFFING_TEST_DATA_DIR", "/srv/staffing");

        let toml_content = r#"
[storage]
data_dir = "${STAFFING_TEST_DATA_DIR}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.data_dir, "/srv/staffing");

        std::env::remove_var("STAFFING_TEST_DATA_DIR");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let config =
            AppConfig::from_toml_str("[company]\nname = \"${STAFFING_TEST_UNSET_VAR}\"\n").unwrap();
        assert_eq!(config.company.name, "${STAFFING_TEST_UNSET_VAR}");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[company]\nname = \"  \"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[storage]\ncompany_file = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(StaffingError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            AppConfig::from_toml_str("[company\nname = 1"),
            Err(StaffingError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[company]\nname = \"File Co\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.company.name, "File Co");
    }
}
