use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use std::{io::Write, path::Path};
use transfer_index_core::model::{TransferIndex, TransferIndexEntry};
use transfer_index_gtfs::schedule::LocalProjection;

use super::fs_ops::create_output_file;
use crate::app::TransferAppError;

/// builds a FeatureCollection of rail stops as WGS84 points carrying `stop_id`,
/// `stop_name` and `bus_xfer_routes`. stops without a location get a null geometry.
pub fn transfer_index_features(
    index: &TransferIndex,
    projection: &LocalProjection,
) -> FeatureCollection {
    let features = index
        .entries
        .values()
        .map(|entry| {
            let location = entry.coordinate.map(|p| projection.unproject(&p));
            create_feature(entry, location)
        })
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn create_feature(entry: &TransferIndexEntry, location: Option<Point<f64>>) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert(String::from("stop_id"), json!(entry.stop_id));
    properties.insert(String::from("stop_name"), json!(entry.name));
    properties.insert(
        String::from("bus_xfer_routes"),
        json!(entry.distinct_route_count),
    );
    properties.insert(String::from("bus_route_ids"), json!(entry.route_ids));
    Feature {
        bbox: None,
        geometry: location.map(|p| Geometry::new(Value::Point(vec![p.x(), p.y()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn write_transfer_index_geojson(
    index: &TransferIndex,
    projection: &LocalProjection,
    output_directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<(), TransferAppError> {
    let mut file = match create_output_file(output_directory, filename, overwrite)? {
        Some(file) => file,
        None => return Ok(()),
    };
    let collection = transfer_index_features(index, projection);
    file.write_all(collection.to_string().as_bytes())
        .map_err(|e| TransferAppError::WriteError {
            path: output_directory.join(filename),
            message: e.to_string(),
        })?;
    log::info!("wrote {} features to {filename}", collection.features.len());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;
    use transfer_index_core::model::ScheduleCoverage;

    #[test]
    fn test_features_are_wgs84_points() {
        let projection = LocalProjection::new(Point::new(-80.5, 43.5));
        let entries = [
            TransferIndexEntry {
                stop_id: String::from("R1"),
                name: String::from("Central"),
                coordinate: Some(Point::new(0.0, 0.0)),
                distinct_route_count: 2,
                route_ids: vec![String::from("7"), String::from("8")],
            },
            TransferIndexEntry {
                stop_id: String::from("R2"),
                name: String::from("Unmapped"),
                coordinate: None,
                distinct_route_count: 0,
                route_ids: vec![],
            },
        ]
        .into_iter()
        .map(|e| (e.stop_id.clone(), e))
        .collect::<BTreeMap<_, _>>();
        let index = TransferIndex {
            entries,
            coverage: ScheduleCoverage::Served,
            excluded_stops: vec![],
            candidate_pair_count: 0,
            opportunity_count: 0,
        };
        let collection = transfer_index_features(&index, &projection);
        assert_eq!(collection.features.len(), 2);
        let r1 = &collection.features[0];
        assert_eq!(
            r1.geometry.as_ref().map(|g| g.value.clone()),
            Some(Value::Point(vec![-80.5, 43.5]))
        );
        let props = r1.properties.as_ref().expect("properties");
        assert_eq!(props.get("bus_xfer_routes"), Some(&json!(2)));
        assert_eq!(props.get("stop_name"), Some(&json!("Central")));
        assert!(collection.features[1].geometry.is_none());
    }
}
