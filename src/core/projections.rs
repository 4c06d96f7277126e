use crate::domain::model::{AnalysisRecord, HeatmapCell, HeatmapEntry, ScatterPoint};
use serde::Serialize;

/// Category order is fixed: downstream color scaling assumes it is the same
/// across every heatmap entry.
pub const HEATMAP_CATEGORIES: [&str; 3] = ["Recency", "Frequency", "Monetary"];

/// Diverging color scale bounds used by the heatmap renderer.
pub const HEATMAP_VALUE_RANGE: (f64, f64) = (-100_000.0, 100_000.0);

/// Marker size range for the scatter renderer's third dimension.
pub const SCATTER_SIZE_RANGE: (u32, u32) = (100, 400);

/// Tabular projection: identity pass-through. Bar renderers key each metric
/// by CustomerID directly off the records.
pub fn tabular(records: &[AnalysisRecord]) -> &[AnalysisRecord] {
    records
}

/// Heatmap projection: one entry per record, keyed by stringified customer
/// id, with the three metrics as (category, value) pairs in fixed order.
pub fn heatmap(records: &[AnalysisRecord]) -> Vec<HeatmapEntry> {
    records
        .iter()
        .map(|record| HeatmapEntry {
            id: record.customer_id.to_string(),
            data: vec![
                HeatmapCell {
                    x: HEATMAP_CATEGORIES[0],
                    y: record.recency,
                },
                HeatmapCell {
                    x: HEATMAP_CATEGORIES[1],
                    y: record.frequency,
                },
                HeatmapCell {
                    x: HEATMAP_CATEGORIES[2],
                    y: record.monetary,
                },
            ],
        })
        .collect()
}

/// Point-cloud projection: x = Recency, y = Monetary, z = Frequency. The z
/// value drives marker size, not position. No normalization or clipping.
pub fn scatter(records: &[AnalysisRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|record| ScatterPoint {
            x: record.recency,
            y: record.monetary,
            z: record.frequency,
        })
        .collect()
}

/// Chart-ready payload for the grouped bar renderers, one chart per metric.
#[derive(Debug, Serialize)]
pub struct BarsPayload<'a> {
    pub index_by: &'static str,
    pub metrics: [&'static str; 3],
    pub data: &'a [AnalysisRecord],
}

#[derive(Debug, Serialize)]
pub struct HeatmapPayload {
    pub keys: [&'static str; 3],
    pub min_value: f64,
    pub max_value: f64,
    pub data: Vec<HeatmapEntry>,
}

#[derive(Debug, Serialize)]
pub struct ScatterPayload {
    pub x: &'static str,
    pub y: &'static str,
    pub size: &'static str,
    pub size_range: (u32, u32),
    pub data: Vec<ScatterPoint>,
}

pub fn bars_payload(records: &[AnalysisRecord]) -> BarsPayload<'_> {
    BarsPayload {
        index_by: "CustomerID",
        metrics: HEATMAP_CATEGORIES,
        data: tabular(records),
    }
}

pub fn heatmap_payload(records: &[AnalysisRecord]) -> HeatmapPayload {
    HeatmapPayload {
        keys: HEATMAP_CATEGORIES,
        min_value: HEATMAP_VALUE_RANGE.0,
        max_value: HEATMAP_VALUE_RANGE.1,
        data: heatmap(records),
    }
}

pub fn scatter_payload(records: &[AnalysisRecord]) -> ScatterPayload {
    ScatterPayload {
        x: "Recency",
        y: "Monetary",
        size: "Frequency",
        size_range: SCATTER_SIZE_RANGE,
        data: scatter(records),
    }
}
