use crate::domain::model::RetentionPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_csv_path, validate_non_empty_string, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

/// File-based configuration, for running the dashboard refresh from a
/// checked-in settings file instead of flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub dashboard: DashboardSection,
    pub uploads: UploadsSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSection {
    #[serde(default = "default_endpoint")]
    pub analysis_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsSection {
    pub transactions_file: String,
    pub customers_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default)]
    pub clear_on_failure: bool,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8001/upload/".to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            analysis_endpoint: default_endpoint(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            clear_on_failure: false,
        }
    }
}

impl TomlConfig {
    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }
}

impl ConfigProvider for TomlConfig {
    fn analysis_endpoint(&self) -> &str {
        &self.dashboard.analysis_endpoint
    }

    fn transactions_path(&self) -> &str {
        &self.uploads.transactions_file
    }

    fn customers_path(&self) -> &str {
        &self.uploads.customers_file
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn retention_policy(&self) -> RetentionPolicy {
        if self.output.clear_on_failure {
            RetentionPolicy::ClearOnFailure
        } else {
            RetentionPolicy::KeepLastGood
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("dashboard.analysis_endpoint", &self.dashboard.analysis_endpoint)?;
        validate_csv_path("uploads.transactions_file", &self.uploads.transactions_file)?;
        validate_csv_path("uploads.customers_file", &self.uploads.customers_file)?;
        validate_non_empty_string("output.path", &self.output.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_str(
            r#"
[dashboard]
analysis_endpoint = "http://localhost:9000/upload/"

[uploads]
transactions_file = "./data/transactions.csv"
customers_file = "./data/customers.csv"

[output]
path = "./charts"
clear_on_failure = true
"#,
        )
        .unwrap();

        assert_eq!(config.analysis_endpoint(), "http://localhost:9000/upload/");
        assert_eq!(config.transactions_path(), "./data/transactions.csv");
        assert_eq!(config.customers_path(), "./data/customers.csv");
        assert_eq!(config.output_path(), "./charts");
        assert_eq!(config.retention_policy(), RetentionPolicy::ClearOnFailure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_fill_in_endpoint_and_output() {
        let config = TomlConfig::from_str(
            r#"
[dashboard]

[uploads]
transactions_file = "transactions.csv"
customers_file = "customers.csv"

[output]
"#,
        )
        .unwrap();

        assert_eq!(config.analysis_endpoint(), "http://127.0.0.1:8001/upload/");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.retention_policy(), RetentionPolicy::KeepLastGood);
    }

    #[test]
    fn test_missing_uploads_section_is_an_error() {
        let result = TomlConfig::from_str(
            r#"
[dashboard]
analysis_endpoint = "http://localhost:9000/upload/"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let config = TomlConfig::from_str(
            r#"
[dashboard]
analysis_endpoint = "not-a-url"

[uploads]
transactions_file = "transactions.csv"
customers_file = "customers.csv"

[output]
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
