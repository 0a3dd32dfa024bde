//! Implore integration adapter for data and visualization
//!
//! Provides access to implore functionality for:
//! - Data search and retrieval
//! - Visualization generation
//! - Provenance tracking

use serde::{Deserialize, Serialize};

use crate::error::{IntegrationError, Result};

/// A data source discovered through search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct DataSource {
    /// Source identifier
    pub id: String,
    /// Name or title
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// URL if web-accessible
    pub url: Option<String>,
    /// Data format (CSV, HDF5, FITS, Parquet, etc.)
    pub format: DataFormat,
    /// Estimated size in bytes
    pub size_bytes: Option<u64>,
    /// Last update timestamp
    pub last_updated: Option<String>,
    /// Provenance information
    pub provenance: Option<Provenance>,
}

/// Data format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum DataFormat {
    /// Comma-separated values
    Csv,
    /// JSON format
    Json,
    /// HDF5 (Hierarchical Data Format)
    Hdf5,
    /// FITS (Flexible Image Transport System)
    Fits,
    /// Apache Parquet
    Parquet,
    /// SQLite database
    Sqlite,
    /// Unknown format
    Unknown,
}

/// Provenance information for data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Provenance {
    /// Original source URL
    pub source_url: String,
    /// When the data was fetched
    pub fetched_at: String,
    /// Hash of the data for verification
    pub content_hash: Option<String>,
    /// License information
    pub license: Option<String>,
    /// Citation if applicable
    pub citation: Option<String>,
    /// Additional notes
    pub notes: Option<String>,
}

/// Result of fetching data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FetchResult {
    /// Whether the fetch succeeded
    pub success: bool,
    /// Local path where data was stored
    pub local_path: Option<String>,
    /// Provenance tracking
    pub provenance: Provenance,
    /// Error message if failed
    pub error: Option<String>,
    /// Size of fetched data in bytes
    pub size_bytes: u64,
}

/// Request for a visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct VisualizationRequest {
    /// Data source to visualize
    pub data_path: String,
    /// Type of visualization
    pub viz_type: VisualizationType,
    /// X-axis column/variable
    pub x_axis: Option<String>,
    /// Y-axis column/variable
    pub y_axis: Option<String>,
    /// Color/grouping column
    pub color_by: Option<String>,
    /// Title for the visualization
    pub title: Option<String>,
    /// Output format
    pub output_format: VisualizationFormat,
}

/// Types of visualizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum VisualizationType {
    /// Scatter plot
    Scatter,
    /// Line plot
    Line,
    /// Bar chart
    Bar,
    /// Histogram
    Histogram,
    /// Heatmap
    Heatmap,
    /// Box plot
    BoxPlot,
    /// 3D surface
    Surface3D,
    /// Time series
    TimeSeries,
}

/// Output format for visualizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum VisualizationFormat {
    /// PNG image
    Png,
    /// SVG vector graphic
    Svg,
    /// PDF
    Pdf,
    /// Interactive HTML
    Html,
}

/// Result of creating a visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct VisualizationResult {
    /// Whether creation succeeded
    pub success: bool,
    /// Path to output file
    pub output_path: Option<String>,
    /// Output data (for embedding)
    pub output_data: Option<Vec<u8>>,
    /// Error message if failed
    pub error: Option<String>,
}

/// Adapter for implore integration
pub struct ImploreAdapter {
    /// Base directory for data storage
    data_directory: String,
    /// Base directory for figure output
    figures_directory: String,
}

impl ImploreAdapter {
    /// Create a new adapter
    pub fn new(data_directory: String, figures_directory: String) -> Self {
        Self {
            data_directory,
            figures_directory,
        }
    }

    /// Search for data sources
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<DataSource>> {
        // TODO: Integrate with implore-core search
        // This could search:
        // - Local data catalog
        // - Web APIs (via URL scheme)
        // - Known data repositories

        Ok(Vec::new())
    }

    /// Fetch data from a URL with provenance tracking
    pub fn fetch(&self, url: &str, filename: &str) -> Result<FetchResult> {
        // TODO: Integrate with implore-io for data fetching
        // Would use implore:// URL scheme for GUI app communication

        let provenance = Provenance {
            source_url: url.to_string(),
            fetched_at: chrono::Utc::now().to_rfc3339(),
            content_hash: None,
            license: None,
            citation: None,
            notes: None,
        };

        // Placeholder - actual implementation would download
        Ok(FetchResult {
            success: false,
            local_path: None,
            provenance,
            error: Some("Not implemented".to_string()),
            size_bytes: 0,
        })
    }

    /// Create a visualization
    pub fn create_visualization(
        &self,
        request: VisualizationRequest,
    ) -> Result<VisualizationResult> {
        // TODO: Use implore-core visualization capabilities
        // This would:
        // 1. Load data from request.data_path
        // 2. Create the specified visualization
        // 3. Export to the requested format

        Ok(VisualizationResult {
            success: false,
            output_path: None,
            output_data: None,
            error: Some("Not implemented".to_string()),
        })
    }

    /// Get data statistics
    pub fn data_statistics(&self, path: &str) -> Result<DataStatistics> {
        // TODO: Compute statistics using implore-stats
        Ok(DataStatistics {
            row_count: 0,
            column_count: 0,
            columns: Vec::new(),
            size_bytes: 0,
        })
    }

    /// Open data in the implore GUI app
    pub fn open_in_app(&self, path: &str) -> Result<()> {
        // TODO: Launch implore:// URL scheme
        // This would open the implore macOS/iOS app with the data
        Ok(())
    }
}

impl Default for ImploreAdapter {
    fn default() -> Self {
        Self::new("data".to_string(), "figures".to_string())
    }
}

/// Statistics about a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct DataStatistics {
    /// Number of rows
    pub row_count: usize,
    /// Number of columns
    pub column_count: usize,
    /// Column information
    pub columns: Vec<ColumnInfo>,
    /// Total size in bytes
    pub size_bytes: u64,
}

/// Information about a data column
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: String,
    /// Number of non-null values
    pub non_null_count: usize,
    /// Number of unique values
    pub unique_count: Option<usize>,
    /// Min value (for numeric)
    pub min: Option<f64>,
    /// Max value (for numeric)
    pub max: Option<f64>,
    /// Mean value (for numeric)
    pub mean: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_creation() {
        let adapter = ImploreAdapter::new("data".to_string(), "figures".to_string());
        // Just verify it creates successfully
    }

    #[test]
    fn test_provenance_tracking() {
        let adapter = ImploreAdapter::default();
        let result = adapter.fetch("https://example.com/data.csv", "data.csv");

        assert!(result.is_ok());
        let fetch_result = result.unwrap();
        assert_eq!(
            fetch_result.provenance.source_url,
            "https://example.com/data.csv"
        );
    }
}
