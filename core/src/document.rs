//! Snapshot data model for map documents.
//!
//! A [`DocumentSnapshot`] is a plain, serializable projection of a live map
//! document: one [`MapSnapshot`] per map (data frame), each holding the layer
//! and table-view records relevant to data source connections. Snapshots are
//! what the comparison engine and the template matcher operate on; they carry
//! no handles back into the host GIS API.
//!
//! Wire format uses the camelCase attribute names emitted by host-side
//! snapshot tooling (`datasetName`, `workspacePath`, ...). Optional attributes
//! serialize only when present, so JSON presence mirrors in-memory presence.

use serde::{Deserialize, Serialize};

/// One entry of a feature layer's field table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub index: u32,
    pub name: String,
    pub visible: bool,
}

impl FieldInfo {
    pub fn new(index: u32, name: impl Into<String>, visible: bool) -> FieldInfo {
        FieldInfo {
            index,
            name: name.into(),
            visible,
        }
    }
}

/// One layer (or network-analyst group layer) at a point in time.
///
/// Every attribute except `name` is optional: the host layer object reports a
/// per-instance capability set, and an attribute it does not support is simply
/// absent from the record. Key equality during correlation treats an absent
/// attribute as *not equal* to anything, including another absent attribute.
///
/// Within one snapshot's flattened layer list, `name` is the bookkeeping key
/// for correlation. Two layers sharing a `name` in one snapshot are a
/// degenerate case the matcher does not disambiguate; `compare` flags it with
/// a warning instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Whether the host document pins layer ids across edits. Matching on id
    /// alone is only sound when this is enabled upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_fixed_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    /// Service type reported by the layer's service properties, e.g. SDE,
    /// MapServer, IMS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_query: Option<String>,
    /// Opaque connection description as reported by the host API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_properties: Option<serde_json::Value>,
    /// Field table, populated best-effort for feature layers whose data
    /// source resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldInfo>>,
}

impl LayerRecord {
    pub fn named(name: impl Into<String>) -> LayerRecord {
        LayerRecord {
            name: name.into(),
            ..LayerRecord::default()
        }
    }
}

/// One table view's connection details. Unlike layers, table views expose all
/// four attributes unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecord {
    pub name: String,
    pub data_source: String,
    pub definition_query: String,
    pub connection_properties: serde_json::Value,
}

/// Spatial reference of a map's default view, captured for frame-level
/// comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory_code: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One map (data frame) of a document.
///
/// `layers` preserves table-of-contents order and keeps a `None` placeholder
/// for each plain group layer, so positional consumers (the bulk rewriter)
/// stay aligned with the live document's layer list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSnapshot {
    pub layers: Vec<Option<LayerRecord>>,
    #[serde(default)]
    pub table_views: Vec<TableRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Ordered snapshot of every map in a document.
///
/// Serializes as a bare array of maps, matching the host-side snapshot
/// format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSnapshot {
    pub maps: Vec<MapSnapshot>,
}

impl DocumentSnapshot {
    pub fn new(maps: Vec<MapSnapshot>) -> DocumentSnapshot {
        DocumentSnapshot { maps }
    }

    /// All comparable (non-group) layers across every map, in table-of-contents
    /// order.
    pub fn layer_pool(&self) -> impl Iterator<Item = &LayerRecord> {
        self.maps
            .iter()
            .flat_map(|map| map.layers.iter().filter_map(|layer| layer.as_ref()))
    }

    /// Comparable layer count across all maps.
    pub fn layer_count(&self) -> usize {
        self.layer_pool().count()
    }

    /// Group-layer placeholder count across all maps.
    pub fn group_count(&self) -> usize {
        self.maps
            .iter()
            .map(|map| map.layers.iter().filter(|layer| layer.is_none()).count())
            .sum()
    }

    pub fn table_count(&self) -> usize {
        self.maps.iter().map(|map| map.table_views.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_attributes_are_not_serialized() {
        let record = LayerRecord::named("Roads");
        let json = serde_json::to_value(&record).expect("serialize record");
        let object = json.as_object().expect("record serializes as object");
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("name"), Some(&serde_json::json!("Roads")));
    }

    #[test]
    fn snapshot_round_trips_through_wire_names() {
        let json = serde_json::json!([{
            "layers": [
                null,
                {
                    "name": "Roads",
                    "id": 7,
                    "datasetName": "roads_2020",
                    "workspacePath": "c:/data/roads.gdb",
                    "visible": true,
                    "fields": [{"index": 0, "name": "F1", "visible": true}]
                }
            ],
            "tableViews": [{
                "name": "Ownership",
                "dataSource": "c:/data/owners.gdb/ownership",
                "definitionQuery": "",
                "connectionProperties": {"workspace_factory": "File Geodatabase"}
            }],
            "spatialReference": {"factoryCode": 4326, "type": "Geographic", "name": "GCS_WGS_1984"}
        }]);

        let snapshot: DocumentSnapshot =
            serde_json::from_value(json.clone()).expect("deserialize snapshot");
        assert_eq!(snapshot.maps.len(), 1);
        assert_eq!(snapshot.layer_count(), 1);
        assert_eq!(snapshot.group_count(), 1);
        assert_eq!(snapshot.table_count(), 1);

        let layer = snapshot.layer_pool().next().expect("one layer");
        assert_eq!(layer.dataset_name.as_deref(), Some("roads_2020"));

        let back = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(back, json);
    }
}
