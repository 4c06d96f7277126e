use crate::utils::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One file selected or dropped by the user. Content is opaque; the analysis
/// service does all parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// CSV check mirrors a dropzone accept filter: trust the declared content
    /// type when there is one, otherwise fall back to the file extension.
    pub fn is_csv(&self) -> bool {
        match &self.content_type {
            Some(content_type) => content_type == "text/csv",
            None => std::path::Path::new(&self.name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv")),
        }
    }
}

/// Exactly two files, assigned by drop order: first is transactions, second
/// is customers. The length-2 invariant lives in the constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPair {
    pub transactions: UploadFile,
    pub customers: UploadFile,
}

impl UploadPair {
    pub fn try_from_batch(batch: Vec<UploadFile>) -> Result<Self> {
        match <[UploadFile; 2]>::try_from(batch) {
            Ok([transactions, customers]) => Ok(Self {
                transactions,
                customers,
            }),
            Err(batch) => Err(DashboardError::InvalidUploadCount {
                actual: batch.len(),
            }),
        }
    }
}

/// Customer identifiers come back as numbers or strings depending on the
/// source CSV; they are carried opaquely and only stringified for chart keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerId::Int(n) => write!(f, "{}", n),
            CustomerId::Float(x) => write!(f, "{}", x),
            CustomerId::Text(s) => f.write_str(s),
        }
    }
}

/// One row of the analysis response. The three metrics pass through
/// unmodified; whatever else the service merged in (scores, customer
/// columns, loyalty offers) rides along in `extras` for the tabular
/// pass-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(rename = "CustomerID")]
    pub customer_id: CustomerId,
    #[serde(rename = "Recency")]
    pub recency: f64,
    #[serde(rename = "Frequency")]
    pub frequency: f64,
    #[serde(rename = "Monetary")]
    pub monetary: f64,
    #[serde(flatten)]
    pub extras: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_customers: u64,
    pub avg_recency: f64,
    pub avg_frequency: f64,
    pub avg_monetary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub records: Vec<AnalysisRecord>,
    pub summary: Option<AnalysisSummary>,
}

impl AnalysisResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// What to do with the last good result when a submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetentionPolicy {
    /// Keep showing the previous result (the original dashboard's behavior).
    #[default]
    KeepLastGood,
    /// Drop it so the charts go back to the empty state.
    ClearOnFailure,
}

/// One heatmap cell: category name on x, metric value on y.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub x: &'static str,
    pub y: f64,
}

/// One heatmap row per customer, categories in fixed order so downstream
/// color scaling lines up across entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapEntry {
    pub id: String,
    pub data: Vec<HeatmapCell>,
}

/// Scatter point: x = Recency, y = Monetary, z = Frequency (marker size).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
