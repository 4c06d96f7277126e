pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use crate::core::{
    client::HttpAnalysisClient,
    engine::DashboardEngine,
    session::{DashboardSession, SessionState},
};
pub use crate::domain::model::{
    AnalysisRecord, AnalysisResult, RetentionPolicy, UploadFile, UploadPair,
};
pub use crate::domain::ports::{AnalysisBackend, ConfigProvider, Storage};
pub use crate::utils::error::{DashboardError, Result};
