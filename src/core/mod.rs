pub mod client;
pub mod collector;
pub mod engine;
pub mod projections;
pub mod session;

pub use crate::domain::model::{AnalysisRecord, AnalysisResult, UploadFile, UploadPair};
pub use crate::domain::ports::{AnalysisBackend, ConfigProvider, Storage};
pub use crate::utils::error::Result;
