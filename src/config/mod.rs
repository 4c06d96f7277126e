pub mod cli;
pub mod toml_config;

use crate::domain::model::RetentionPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{
    validate_csv_path, validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "rfm-dash")]
#[command(about = "Uploads transaction/customer CSVs for RFM analysis and emits chart payloads")]
pub struct CliConfig {
    #[arg(long, default_value = "http://127.0.0.1:8001/upload/")]
    pub analysis_endpoint: String,

    #[arg(long, help = "Path to the transactions CSV")]
    pub transactions_file: Option<String>,

    #[arg(long, help = "Path to the customers CSV")]
    pub customers_file: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Drop the last good result when a submission fails")]
    pub clear_on_failure: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn analysis_endpoint(&self) -> &str {
        &self.analysis_endpoint
    }

    fn transactions_path(&self) -> &str {
        self.transactions_file.as_deref().unwrap_or_default()
    }

    fn customers_path(&self) -> &str {
        self.customers_file.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn retention_policy(&self) -> RetentionPolicy {
        if self.clear_on_failure {
            RetentionPolicy::ClearOnFailure
        } else {
            RetentionPolicy::KeepLastGood
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("analysis_endpoint", &self.analysis_endpoint)?;
        validate_non_empty_string("output_path", &self.output_path)?;
        let transactions = validate_required_field("transactions_file", &self.transactions_file)?;
        validate_csv_path("transactions_file", transactions)?;
        let customers = validate_required_field("customers_file", &self.customers_file)?;
        validate_csv_path("customers_file", customers)?;
        Ok(())
    }
}
