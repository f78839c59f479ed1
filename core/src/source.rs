//! Collaborator traits for live map documents.
//!
//! The host GIS API is closed and host-controlled; everything the core needs
//! from it funnels through these traits. The vendor's "capability query
//! before attribute access" pattern becomes Option-returning getters: `None`
//! means the layer instance does not support the attribute, so extraction is
//! a deterministic projection with no runtime reflection.

use serde_json::Value;
use thiserror::Error;

use crate::document::{FieldInfo, SpatialReference};
use crate::error_codes;

/// Errors reported by a live-document collaborator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Describing a layer's data failed, typically because the data source is
    /// broken. Extraction treats this as best-effort and moves on.
    #[error("[MAPDIFF_SRC_001] could not describe data for layer '{layer}': {message}")]
    DescribeFailed { layer: String, message: String },

    #[error("[MAPDIFF_SRC_002] connection update rejected for '{layer}': {message}")]
    UpdateFailed { layer: String, message: String },
}

impl SourceError {
    pub fn code(&self) -> &'static str {
        match self {
            SourceError::DescribeFailed { .. } => error_codes::SOURCE_DESCRIBE_FAILED,
            SourceError::UpdateFailed { .. } => error_codes::SOURCE_UPDATE_FAILED,
        }
    }
}

/// Described data type of a layer's underlying source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    FeatureLayer,
    RasterLayer,
    TableView,
    Other(String),
}

/// Result of a data-describe query against a layer's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDescription {
    pub data_type: DataType,
    pub fields: Vec<FieldInfo>,
}

/// Service connection properties as reported by the host layer object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProperties {
    pub service_type: String,
    pub user_name: Option<String>,
    pub server: Option<String>,
    pub service: Option<String>,
    pub database: Option<String>,
}

/// One live layer. Getters default to `None` (capability absent) so adapters
/// implement only what their layer type supports.
pub trait LayerSource {
    fn name(&self) -> String;

    fn long_name(&self) -> Option<String> {
        None
    }

    fn is_group_layer(&self) -> bool;

    fn is_network_analyst_layer(&self) -> bool {
        false
    }

    fn layer_id(&self) -> Option<i64> {
        None
    }

    fn has_fixed_id(&self) -> Option<bool> {
        None
    }

    fn dataset_name(&self) -> Option<String> {
        None
    }

    fn data_source(&self) -> Option<String> {
        None
    }

    fn service_properties(&self) -> Option<ServiceProperties> {
        None
    }

    fn workspace_path(&self) -> Option<String> {
        None
    }

    fn visible(&self) -> Option<bool> {
        None
    }

    fn definition_query(&self) -> Option<String> {
        None
    }

    fn connection_properties(&self) -> Option<Value> {
        None
    }

    /// Data-describe query. `Ok(None)` means the source offers no
    /// description; `Err` means the description could not be resolved (for
    /// example a broken data source).
    fn describe(&self) -> Result<Option<DataDescription>, SourceError> {
        Ok(None)
    }
}

/// One live table view. All four attributes are unconditional.
pub trait TableSource {
    fn name(&self) -> String;
    fn data_source(&self) -> String;
    fn definition_query(&self) -> String;
    fn connection_properties(&self) -> Value;
}

/// One live map (data frame).
pub trait MapSource {
    type Layer: LayerSource;
    type Table: TableSource;

    fn layers(&self) -> Vec<&Self::Layer>;
    fn table_views(&self) -> Vec<&Self::Table>;

    /// Spatial reference of the map's default view.
    fn spatial_reference(&self) -> Option<SpatialReference> {
        None
    }
}

/// A live document: an ordered sequence of maps.
pub trait DocumentSource {
    type Map: MapSource;

    fn maps(&self) -> Vec<&Self::Map>;
}
