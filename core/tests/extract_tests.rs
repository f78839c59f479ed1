mod common;

use common::wgs84;
use mapdoc_diff::{
    DataDescription, DataType, DocumentSource, FieldInfo, LayerSource, MapSource,
    ServiceProperties, SourceError, SpatialReference, TableSource, extract_document, extract_layer,
};
use serde_json::json;

/// Configurable fake layer covering the capability combinations the live API
/// exhibits.
#[derive(Default)]
struct FakeLayer {
    name: String,
    group: bool,
    network_analyst: bool,
    id: Option<i64>,
    dataset_name: Option<String>,
    service_properties: Option<ServiceProperties>,
    workspace_path: Option<String>,
    visible: Option<bool>,
    describe: Option<Result<Option<DataDescription>, String>>,
}

impl FakeLayer {
    fn named(name: &str) -> FakeLayer {
        FakeLayer {
            name: name.to_string(),
            ..FakeLayer::default()
        }
    }
}

impl LayerSource for FakeLayer {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_group_layer(&self) -> bool {
        self.group
    }

    fn is_network_analyst_layer(&self) -> bool {
        self.network_analyst
    }

    fn layer_id(&self) -> Option<i64> {
        self.id
    }

    fn dataset_name(&self) -> Option<String> {
        self.dataset_name.clone()
    }

    fn service_properties(&self) -> Option<ServiceProperties> {
        self.service_properties.clone()
    }

    fn workspace_path(&self) -> Option<String> {
        self.workspace_path.clone()
    }

    fn visible(&self) -> Option<bool> {
        self.visible
    }

    fn describe(&self) -> Result<Option<DataDescription>, SourceError> {
        match &self.describe {
            None => Ok(None),
            Some(Ok(description)) => Ok(description.clone()),
            Some(Err(message)) => Err(SourceError::DescribeFailed {
                layer: self.name.clone(),
                message: message.clone(),
            }),
        }
    }
}

struct FakeTable {
    name: String,
}

impl TableSource for FakeTable {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn data_source(&self) -> String {
        format!("c:/data/tables.gdb/{}", self.name)
    }

    fn definition_query(&self) -> String {
        String::new()
    }

    fn connection_properties(&self) -> serde_json::Value {
        json!({"workspace_factory": "File Geodatabase"})
    }
}

struct FakeMap {
    layers: Vec<FakeLayer>,
    tables: Vec<FakeTable>,
    spatial_reference: Option<SpatialReference>,
}

impl MapSource for FakeMap {
    type Layer = FakeLayer;
    type Table = FakeTable;

    fn layers(&self) -> Vec<&FakeLayer> {
        self.layers.iter().collect()
    }

    fn table_views(&self) -> Vec<&FakeTable> {
        self.tables.iter().collect()
    }

    fn spatial_reference(&self) -> Option<SpatialReference> {
        self.spatial_reference.clone()
    }
}

struct FakeDocument {
    maps: Vec<FakeMap>,
}

impl DocumentSource for FakeDocument {
    type Map = FakeMap;

    fn maps(&self) -> Vec<&FakeMap> {
        self.maps.iter().collect()
    }
}

fn sde_properties() -> ServiceProperties {
    ServiceProperties {
        service_type: "SDE".to_string(),
        user_name: Some("gisadmin".to_string()),
        server: Some("db01".to_string()),
        service: Some("5151".to_string()),
        database: Some("prod".to_string()),
    }
}

#[test]
fn group_layers_become_positional_placeholders() {
    let group = FakeLayer {
        group: true,
        ..FakeLayer::named("Transport")
    };
    assert_eq!(extract_layer(&group), None);
}

#[test]
fn network_analyst_group_layers_are_kept() {
    let layer = FakeLayer {
        group: true,
        network_analyst: true,
        ..FakeLayer::named("Route Analysis")
    };
    let record = extract_layer(&layer).expect("network analyst layer extracted");
    assert_eq!(record.name, "Route Analysis");
}

#[test]
fn unsupported_attributes_stay_absent() {
    let record = extract_layer(&FakeLayer::named("Roads")).expect("layer extracted");
    assert_eq!(record.name, "Roads");
    assert!(record.id.is_none());
    assert!(record.dataset_name.is_none());
    assert!(record.workspace_path.is_none());
    assert!(record.fields.is_none());
}

#[test]
fn sde_connections_carry_server_service_and_database() {
    let layer = FakeLayer {
        service_properties: Some(sde_properties()),
        ..FakeLayer::named("Roads")
    };
    let record = extract_layer(&layer).expect("layer extracted");
    assert_eq!(record.service_type.as_deref(), Some("SDE"));
    assert_eq!(record.user_name.as_deref(), Some("gisadmin"));
    assert_eq!(record.server.as_deref(), Some("db01"));
    assert_eq!(record.service.as_deref(), Some("5151"));
    assert_eq!(record.database.as_deref(), Some("prod"));
}

#[test]
fn non_sde_connections_drop_server_scoped_attributes() {
    let layer = FakeLayer {
        service_properties: Some(ServiceProperties {
            service_type: "MapServer".to_string(),
            ..sde_properties()
        }),
        ..FakeLayer::named("Roads")
    };
    let record = extract_layer(&layer).expect("layer extracted");
    assert_eq!(record.service_type.as_deref(), Some("MapServer"));
    assert_eq!(record.user_name.as_deref(), Some("gisadmin"));
    assert!(record.server.is_none());
    assert!(record.service.is_none());
    assert!(record.database.is_none());
}

#[test]
fn feature_layers_pick_up_described_fields() {
    let layer = FakeLayer {
        describe: Some(Ok(Some(DataDescription {
            data_type: DataType::FeatureLayer,
            fields: vec![FieldInfo::new(0, "OBJECTID", true)],
        }))),
        ..FakeLayer::named("Roads")
    };
    let record = extract_layer(&layer).expect("layer extracted");
    assert_eq!(record.fields, Some(vec![FieldInfo::new(0, "OBJECTID", true)]));
}

#[test]
fn non_feature_descriptions_leave_fields_absent() {
    let layer = FakeLayer {
        describe: Some(Ok(Some(DataDescription {
            data_type: DataType::RasterLayer,
            fields: Vec::new(),
        }))),
        ..FakeLayer::named("Hillshade")
    };
    let record = extract_layer(&layer).expect("layer extracted");
    assert!(record.fields.is_none());
}

#[test]
fn describe_failure_keeps_the_record_without_fields() {
    let layer = FakeLayer {
        dataset_name: Some("roads_2020".to_string()),
        describe: Some(Err("workspace not found".to_string())),
        ..FakeLayer::named("Roads")
    };
    let record = extract_layer(&layer).expect("layer extracted despite failure");
    assert_eq!(record.dataset_name.as_deref(), Some("roads_2020"));
    assert!(record.fields.is_none());
}

#[test]
fn document_extraction_preserves_order_and_placeholders() {
    let document = FakeDocument {
        maps: vec![FakeMap {
            layers: vec![
                FakeLayer {
                    group: true,
                    ..FakeLayer::named("Transport")
                },
                FakeLayer {
                    id: Some(1),
                    visible: Some(true),
                    ..FakeLayer::named("Roads")
                },
            ],
            tables: vec![FakeTable {
                name: "ownership".to_string(),
            }],
            spatial_reference: Some(wgs84()),
        }],
    };

    let snapshot = extract_document(&document);

    assert_eq!(snapshot.maps.len(), 1);
    let map = &snapshot.maps[0];
    assert_eq!(map.layers.len(), 2);
    assert!(map.layers[0].is_none());

    let roads = map.layers[1].as_ref().expect("comparable layer");
    assert_eq!(roads.name, "Roads");
    assert_eq!(roads.id, Some(1));
    assert_eq!(roads.visible, Some(true));

    assert_eq!(map.table_views.len(), 1);
    assert_eq!(map.table_views[0].name, "ownership");
    assert_eq!(
        map.table_views[0].data_source,
        "c:/data/tables.gdb/ownership"
    );

    assert_eq!(map.spatial_reference, Some(wgs84()));
}
