//! Chart configuration handed to the geo chart by its host.
//!
//! The map access token travels here as a construction parameter of the
//! renderer; nothing in this crate stores it globally.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use formats::{Bucket, VisualizationObjectContent};
use foundation::{DEFAULT_ZOOM, LngLat};

use crate::buckets::get_geo_buckets_from_md_object;
use crate::policy::limit_or_default;

const MAPBOX_TOKEN_KEY: &str = "mapboxToken";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoConfig {
    #[serde(default)]
    pub mapbox_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LngLat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Maximum number of points to render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_segment_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<String>,
    #[serde(default)]
    pub is_export_mode: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md_object: Option<VisualizationObjectContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separators: Option<Separators>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    pub thousand: String,
    pub decimal: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            thousand: ",".to_string(),
            decimal: ".".to_string(),
        }
    }
}

impl GeoConfig {
    pub fn new(mapbox_token: impl Into<String>) -> Self {
        Self {
            mapbox_token: mapbox_token.into(),
            ..Self::default()
        }
    }

    pub fn limit_or_default(&self) -> usize {
        limit_or_default(self.limit)
    }

    pub fn center_or_default(&self) -> LngLat {
        self.center.unwrap_or_default()
    }

    pub fn zoom_or_default(&self) -> f64 {
        self.zoom.unwrap_or(DEFAULT_ZOOM)
    }

    /// Buckets of the configured definition, tooltip bucket included.
    pub fn buckets(&self) -> Vec<Bucket> {
        get_geo_buckets_from_md_object(self.md_object.as_ref())
    }
}

/// A config object is a geo config iff it carries a map access token.
pub fn is_geo_config(config: &Value) -> bool {
    config.get(MAPBOX_TOKEN_KEY).is_some()
}

/// Plain chart config: anything that is not a geo config.
pub fn is_chart_config(config: &Value) -> bool {
    !is_geo_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DEFAULT_DATA_POINTS_LIMIT;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn distinguishes_geo_and_chart_configs() {
        assert!(is_geo_config(&json!({ "mapboxToken": "abc" })));
        assert!(!is_geo_config(&json!({})));
        assert!(is_chart_config(&json!({})));
        assert!(!is_chart_config(&json!({ "mapboxToken": "abc" })));
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config: GeoConfig = serde_json::from_value(json!({ "mapboxToken": "abc" })).unwrap();
        assert_eq!(config.mapbox_token, "abc");
        assert_eq!(config.limit_or_default(), DEFAULT_DATA_POINTS_LIMIT);
        assert_eq!(config.center_or_default(), LngLat::new(34.0, 5.0));
        assert_eq!(config.zoom_or_default(), 2.0);
        assert!(config.buckets().is_empty());
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let config: GeoConfig =
            serde_json::from_value(json!({ "mapboxToken": "abc", "limit": 0 })).unwrap();
        assert_eq!(config.limit, Some(0));
        assert_eq!(config.limit_or_default(), DEFAULT_DATA_POINTS_LIMIT);
    }

    #[test]
    fn parses_full_config() {
        let config: GeoConfig = serde_json::from_value(json!({
            "mapboxToken": "abc",
            "center": { "lat": 40.1, "lng": -90.2 },
            "zoom": 4,
            "limit": 20,
            "selectedSegmentItems": ["Toy Store"],
            "tooltipText": "/gdc/md/p/obj/3",
            "isExportMode": true,
            "separators": { "thousand": " ", "decimal": "," },
            "mdObject": {
                "buckets": [ { "localIdentifier": "location", "items": [
                    { "visualizationAttribute": { "localIdentifier": "a1",
                        "displayForm": { "uri": "/gdc/md/p/obj/1" } } } ] } ],
                "properties": "{\"controls\":{\"tooltipText\":\"/gdc/md/p/obj/3\"}}"
            }
        }))
        .unwrap();
        assert_eq!(config.limit_or_default(), 20);
        assert_eq!(config.zoom_or_default(), 4.0);
        assert_eq!(config.center_or_default(), LngLat::new(40.1, -90.2));
        assert_eq!(config.selected_segment_items, vec!["Toy Store"]);
        assert!(config.is_export_mode);
        assert_eq!(config.separators.as_ref().unwrap().decimal, ",");

        let buckets = config.buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[1].local_identifier, "tooltipText");
    }
}
