use crate::core::projections;
use crate::core::session::DashboardSession;
use crate::domain::model::UploadFile;
use crate::domain::ports::{AnalysisBackend, ConfigProvider, Storage};
use crate::utils::error::Result;

pub const BARS_PAYLOAD_FILE: &str = "rfm_bars.json";
pub const HEATMAP_PAYLOAD_FILE: &str = "rfm_heatmap.json";
pub const SCATTER_PAYLOAD_FILE: &str = "rfm_scatter.json";

/// Drives one dashboard refresh: read the two CSVs, run the session, write
/// the three chart payloads for the external render targets.
pub struct DashboardEngine<S: Storage, C: ConfigProvider, B: AnalysisBackend> {
    storage: S,
    config: C,
    session: DashboardSession<B>,
}

impl<S: Storage, C: ConfigProvider, B: AnalysisBackend> DashboardEngine<S, C, B> {
    pub fn new(storage: S, config: C, backend: B) -> Self {
        let session = DashboardSession::new(backend).with_policy(config.retention_policy());
        Self {
            storage,
            config,
            session,
        }
    }

    pub fn session(&self) -> &DashboardSession<B> {
        &self.session
    }

    fn payload_path(&self, name: &str) -> String {
        std::path::Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    async fn read_upload(&self, path: &str) -> Result<UploadFile> {
        let bytes = self.storage.read_file(path).await?;
        let name = std::path::Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        Ok(UploadFile::new(name, bytes))
    }

    /// Returns the payload file names that were written.
    pub async fn run(&mut self) -> Result<Vec<String>> {
        tracing::info!("Reading upload files...");
        let transactions = self.read_upload(self.config.transactions_path()).await?;
        let customers = self.read_upload(self.config.customers_path()).await?;
        self.session.offer_files(vec![transactions, customers])?;

        tracing::info!("Submitting to {}...", self.config.analysis_endpoint());
        self.session.submit().await?;

        let Some(result) = self.session.current_result() else {
            tracing::warn!("No analysis result to render");
            return Ok(Vec::new());
        };
        if let Some(summary) = &result.summary {
            tracing::info!(
                "Summary: {} customers, avg R {:.1} / F {:.1} / M {:.1}",
                summary.total_customers,
                summary.avg_recency,
                summary.avg_frequency,
                summary.avg_monetary
            );
        }

        tracing::info!("Writing chart payloads for {} records...", result.len());
        let bars = serde_json::to_vec_pretty(&projections::bars_payload(&result.records))?;
        let heatmap = serde_json::to_vec_pretty(&projections::heatmap_payload(&result.records))?;
        let scatter = serde_json::to_vec_pretty(&projections::scatter_payload(&result.records))?;

        let written = vec![
            self.payload_path(BARS_PAYLOAD_FILE),
            self.payload_path(HEATMAP_PAYLOAD_FILE),
            self.payload_path(SCATTER_PAYLOAD_FILE),
        ];
        self.storage.write_file(&written[0], &bars).await?;
        self.storage.write_file(&written[1], &heatmap).await?;
        self.storage.write_file(&written[2], &scatter).await?;

        Ok(written)
    }
}
