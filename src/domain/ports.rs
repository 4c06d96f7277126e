use crate::domain::model::{AnalysisResult, RetentionPolicy, UploadPair};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn analysis_endpoint(&self) -> &str;
    fn transactions_path(&self) -> &str;
    fn customers_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn retention_policy(&self) -> RetentionPolicy;
}

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit the pair to the analysis service. One shot: no retry, no
    /// timeout, no cancellation.
    async fn submit(&self, pair: &UploadPair) -> Result<AnalysisResult>;
}
