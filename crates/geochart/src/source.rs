//! GeoJSON point source for the pushpin layer.

use serde_json::{Map, Value};
use tracing::debug;

use foundation::LngLat;
use foundation::math::min_max;

use crate::model::{AttributeData, GeoData, MeasureData};
use crate::policy::is_clustering_allowed;
use crate::roles::GeoRole;

/// Property key carrying the tooltip label of a point.
pub const LOCATION_NAME_KEY: &str = "locationName";

/// Points ready to hand to the map, plus what the layer needs to style them.
#[derive(Debug, Clone, PartialEq)]
pub struct PushpinDataSource {
    pub features: Value,
    pub cluster: bool,
    /// Finite min/max of the size measure, when one is bound.
    pub size_range: Option<(f64, f64)>,
    pub segment_items: Vec<String>,
}

impl PushpinDataSource {
    pub fn from_geo_data(geo_data: &GeoData) -> Self {
        Self {
            features: create_pushpin_features(geo_data),
            cluster: is_clustering_allowed(geo_data),
            size_range: geo_data.size.as_ref().and_then(|size| min_max(&size.data)),
            segment_items: segment_items(geo_data),
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features
            .get("features")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

/// `FeatureCollection` of `Point` features, one per parseable location label.
pub fn create_pushpin_features(geo_data: &GeoData) -> Value {
    let mut features = Vec::new();
    if let Some(location) = &geo_data.location {
        let mut skipped = 0usize;
        for (row, label) in location.data.iter().enumerate() {
            let Some(coords) = LngLat::from_location_label(label) else {
                skipped += 1;
                continue;
            };
            features.push(point_feature(coords, feature_properties(geo_data, row)));
        }
        if skipped > 0 {
            debug!("skipped {skipped} rows with unparseable location labels");
        }
    }

    let mut root = Map::new();
    root.insert("type".to_string(), Value::String("FeatureCollection".to_string()));
    root.insert("features".to_string(), Value::Array(features));
    Value::Object(root)
}

fn point_feature(coords: LngLat, properties: Map<String, Value>) -> Value {
    let [lng, lat] = coords.to_geojson_coords();
    let mut geometry = Map::new();
    geometry.insert("type".to_string(), Value::String("Point".to_string()));
    geometry.insert(
        "coordinates".to_string(),
        Value::Array(vec![Value::from(lng), Value::from(lat)]),
    );

    let mut feature = Map::new();
    feature.insert("type".to_string(), Value::String("Feature".to_string()));
    feature.insert("geometry".to_string(), Value::Object(geometry));
    feature.insert("properties".to_string(), Value::Object(properties));
    Value::Object(feature)
}

fn feature_properties(geo_data: &GeoData, row: usize) -> Map<String, Value> {
    let mut properties = Map::new();
    if let Some(location) = &geo_data.location {
        properties.insert(GeoRole::Location.as_str().to_string(), attribute_property(location, row));
    }
    if let Some(segment) = &geo_data.segment {
        properties.insert(GeoRole::Segment.as_str().to_string(), attribute_property(segment, row));
    }
    if let Some(tooltip_text) = &geo_data.tooltip_text {
        properties.insert(
            GeoRole::TooltipText.as_str().to_string(),
            attribute_property(tooltip_text, row),
        );
        let name = tooltip_text.data.get(row).cloned().unwrap_or_default();
        properties.insert(LOCATION_NAME_KEY.to_string(), Value::String(name));
    }
    if let Some(size) = &geo_data.size {
        properties.insert(GeoRole::Size.as_str().to_string(), measure_property(size, row));
    }
    if let Some(color) = &geo_data.color {
        properties.insert(GeoRole::Color.as_str().to_string(), measure_property(color, row));
    }
    properties
}

fn attribute_property(data: &AttributeData, row: usize) -> Value {
    let value = data.data.get(row).map_or(Value::Null, |label| Value::String(label.clone()));
    titled(&data.name, value)
}

// NaN has no JSON form and ends up as null.
fn measure_property(data: &MeasureData, row: usize) -> Value {
    let value = data.data.get(row).map_or(Value::Null, |v| Value::from(*v));
    let mut property = titled(&data.name, value);
    if let (Some(format), Value::Object(obj)) = (&data.format, &mut property) {
        obj.insert("format".to_string(), Value::String(format.clone()));
    }
    property
}

fn titled(title: &str, value: Value) -> Value {
    let mut obj = Map::new();
    obj.insert("title".to_string(), Value::String(title.to_string()));
    obj.insert("value".to_string(), value);
    Value::Object(obj)
}

/// Distinct segment labels in first-seen order; empty when segment is unbound.
pub fn segment_items(geo_data: &GeoData) -> Vec<String> {
    let Some(segment) = &geo_data.segment else {
        return Vec::new();
    };
    let mut items: Vec<String> = Vec::new();
    for label in &segment.data {
        if !items.contains(label) {
            items.push(label.clone());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn attribute(index: usize, name: &str, data: &[&str]) -> AttributeData {
        AttributeData {
            index,
            name: name.to_string(),
            data: data.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn measure(index: usize, name: &str, data: Vec<f64>) -> MeasureData {
        MeasureData {
            index,
            name: name.to_string(),
            data,
            format: Some("#,##0".to_string()),
        }
    }

    fn sample() -> GeoData {
        GeoData {
            location: Some(attribute(0, "Coordinates", &["44.5;-89.5", "bogus", "39.0;-80.5"])),
            segment: Some(attribute(1, "Type", &["General Goods", "Toy Store", "General Goods"])),
            tooltip_text: Some(attribute(2, "State", &["Wisconsin", "Nowhere", "West Virginia"])),
            size: Some(measure(0, "Population", vec![1005.0, 943.0, f64::NAN])),
            color: None,
        }
    }

    #[test]
    fn builds_point_features_and_skips_bad_rows() {
        let features = create_pushpin_features(&sample());
        assert_eq!(
            features,
            json!({
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [-89.5, 44.5] },
                        "properties": {
                            "location": { "title": "Coordinates", "value": "44.5;-89.5" },
                            "segment": { "title": "Type", "value": "General Goods" },
                            "tooltipText": { "title": "State", "value": "Wisconsin" },
                            "locationName": "Wisconsin",
                            "size": { "title": "Population", "value": 1005.0, "format": "#,##0" }
                        }
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [-80.5, 39.0] },
                        "properties": {
                            "location": { "title": "Coordinates", "value": "39.0;-80.5" },
                            "segment": { "title": "Type", "value": "General Goods" },
                            "tooltipText": { "title": "State", "value": "West Virginia" },
                            "locationName": "West Virginia",
                            "size": { "title": "Population", "value": null, "format": "#,##0" }
                        }
                    }
                ]
            })
        );
    }

    #[test]
    fn no_location_means_no_features() {
        let source = PushpinDataSource::from_geo_data(&GeoData::default());
        assert_eq!(source.feature_count(), 0);
        assert!(source.cluster);
        assert_eq!(source.size_range, None);
    }

    #[test]
    fn data_source_summary() {
        let source = PushpinDataSource::from_geo_data(&sample());
        assert_eq!(source.feature_count(), 2);
        assert!(!source.cluster);
        assert_eq!(source.size_range, Some((943.0, 1005.0)));
        assert_eq!(source.segment_items, vec!["General Goods", "Toy Store"]);
    }

    #[test]
    fn segment_items_keep_first_seen_order() {
        let geo = GeoData {
            segment: Some(attribute(0, "Type", &["b", "a", "b", "c", "a"])),
            ..GeoData::default()
        };
        assert_eq!(segment_items(&geo), vec!["b", "a", "c"]);
        assert!(segment_items(&GeoData::default()).is_empty());
    }
}
