//! Snapshot extraction from live document sources.
//!
//! Pure projection: walk the document's maps and layers, copy the attributes
//! each layer instance supports into a [`LayerRecord`], and never mutate the
//! source. The only heuristic-free judgment call is the field table, which is
//! best-effort enrichment: a layer whose data source fails to describe keeps
//! its record, just without `fields`.

use tracing::warn;

use crate::document::{DocumentSnapshot, LayerRecord, MapSnapshot, TableRecord};
use crate::source::{DataType, DocumentSource, LayerSource, MapSource, TableSource};

/// Project a live document into a plain snapshot.
pub fn extract_document<D: DocumentSource>(document: &D) -> DocumentSnapshot {
    let maps = document.maps().into_iter().map(extract_map).collect();
    DocumentSnapshot::new(maps)
}

fn extract_map<M: MapSource>(map: &M) -> MapSnapshot {
    MapSnapshot {
        layers: map.layers().into_iter().map(extract_layer).collect(),
        table_views: map.table_views().into_iter().map(extract_table).collect(),
        spatial_reference: map.spatial_reference(),
    }
}

/// Extract one layer. Plain group layers are transparent containers, not
/// comparable leaf entities; they yield a positional placeholder.
/// Network-analyst group layers are the exception and are kept.
pub fn extract_layer<L: LayerSource>(layer: &L) -> Option<LayerRecord> {
    if layer.is_group_layer() && !layer.is_network_analyst_layer() {
        return None;
    }

    let mut record = LayerRecord {
        name: layer.name(),
        long_name: layer.long_name(),
        ..LayerRecord::default()
    };

    record.id = layer.layer_id();
    record.has_fixed_id = layer.has_fixed_id();
    record.dataset_name = layer.dataset_name();
    record.data_source = layer.data_source();

    if let Some(props) = layer.service_properties() {
        record.user_name = props.user_name;
        // Server, service and database only apply to SDE connections.
        if props.service_type.eq_ignore_ascii_case("sde") {
            record.server = props.server;
            record.service = props.service;
            record.database = props.database;
        }
        record.service_type = Some(props.service_type);
    }

    record.workspace_path = layer.workspace_path();
    record.visible = layer.visible();
    record.definition_query = layer.definition_query();
    record.connection_properties = layer.connection_properties();

    // Fields only resolve against a valid data source, so a describe failure
    // is swallowed: the record survives without field detail.
    match layer.describe() {
        Ok(Some(description)) if description.data_type == DataType::FeatureLayer => {
            record.fields = Some(description.fields);
        }
        Ok(_) => {}
        Err(error) => {
            warn!(
                layer = %record.name,
                %error,
                "could not resolve layer fields; the data source may be broken"
            );
        }
    }

    Some(record)
}

fn extract_table<T: TableSource>(table: &T) -> TableRecord {
    TableRecord {
        name: table.name(),
        data_source: table.data_source(),
        definition_query: table.definition_query(),
        connection_properties: table.connection_properties(),
    }
}
