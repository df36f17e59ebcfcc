//! The serialized visualization properties blob.
//!
//! Only `controls` is modelled; anything else in the blob is kept verbatim so a
//! parse/serialize cycle does not drop unrelated settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use foundation::LngLat;

use crate::error::FormatError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<GeoControls>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoControls {
    /// Display form URI of the attribute used for tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LngLat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl GeoProperties {
    pub fn tooltip_text(&self) -> Option<&str> {
        self.controls
            .as_ref()
            .and_then(|controls| controls.tooltip_text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Strict parse of a properties blob.
pub fn parse_geo_properties(blob: &str) -> Result<GeoProperties, FormatError> {
    let value: Value = serde_json::from_str(blob)?;
    if !value.is_object() {
        return Err(FormatError::NotAnObject {
            found: json_kind(&value),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Lenient parse: a missing or malformed blob yields empty properties.
pub fn parse_geo_property_item(blob: Option<&str>) -> GeoProperties {
    blob.and_then(|blob| parse_geo_properties(blob).ok())
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_tooltip_text_control() {
        let props =
            parse_geo_properties(r#"{"controls":{"tooltipText":"/gdc/displayform/geo2"}}"#).unwrap();
        assert_eq!(props.tooltip_text(), Some("/gdc/displayform/geo2"));
    }

    #[test]
    fn keeps_unmodelled_keys() {
        let blob = r#"{"controls":{"zoom":4,"legend":{"enabled":false}},"sortItems":[]}"#;
        let props = parse_geo_properties(blob).unwrap();
        let controls = props.controls.clone().unwrap();
        assert_eq!(controls.zoom, Some(4.0));
        assert!(controls.other.contains_key("legend"));
        assert!(props.other.contains_key("sortItems"));

        let back: Value = serde_json::to_value(&props).unwrap();
        assert_eq!(back["controls"]["legend"]["enabled"], Value::Bool(false));
    }

    #[test]
    fn rejects_non_objects() {
        let err = parse_geo_properties("[1]").unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON object, found an array");
        assert!(matches!(
            parse_geo_properties("{"),
            Err(FormatError::Parse(_))
        ));
    }

    #[test]
    fn lenient_parse_defaults_to_empty() {
        assert_eq!(parse_geo_property_item(None), GeoProperties::default());
        assert_eq!(parse_geo_property_item(Some("not json")), GeoProperties::default());
        assert_eq!(parse_geo_property_item(Some("{}")).tooltip_text(), None);
        assert_eq!(
            parse_geo_property_item(Some(r#"{"controls":{"tooltipText":""}}"#)).tooltip_text(),
            None
        );
    }
}
