//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use mapdoc_diff::{
    DocumentSnapshot, FieldInfo, LayerRecord, MapSnapshot, SpatialReference, TableRecord,
};

pub fn layer(name: &str) -> LayerRecord {
    LayerRecord::named(name)
}

pub fn layer_with_keys(id: i64, name: &str, dataset: &str) -> LayerRecord {
    LayerRecord {
        id: Some(id),
        dataset_name: Some(dataset.to_string()),
        ..LayerRecord::named(name)
    }
}

pub fn table(name: &str, data_source: &str) -> TableRecord {
    TableRecord {
        name: name.to_string(),
        data_source: data_source.to_string(),
        definition_query: String::new(),
        connection_properties: serde_json::json!({}),
    }
}

pub fn field(index: u32, name: &str, visible: bool) -> FieldInfo {
    FieldInfo::new(index, name, visible)
}

pub fn wgs84() -> SpatialReference {
    SpatialReference {
        factory_code: Some(4326),
        kind: Some("Geographic".to_string()),
        name: Some("GCS_WGS_1984".to_string()),
    }
}

/// One-map document holding the given comparable layers.
pub fn document(layers: Vec<LayerRecord>) -> DocumentSnapshot {
    DocumentSnapshot::new(vec![MapSnapshot {
        layers: layers.into_iter().map(Some).collect(),
        table_views: Vec::new(),
        spatial_reference: Some(wgs84()),
    }])
}

pub fn document_with_maps(maps: Vec<MapSnapshot>) -> DocumentSnapshot {
    DocumentSnapshot::new(maps)
}

pub fn map_with_sr(layers: Vec<Option<LayerRecord>>, sr: Option<SpatialReference>) -> MapSnapshot {
    MapSnapshot {
        layers,
        table_views: Vec::new(),
        spatial_reference: sr,
    }
}
