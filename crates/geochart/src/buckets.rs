//! Bucket synthesis for persisted pushpin definitions.

use formats::{Bucket, BucketItem, VisualizationObjectContent, parse_geo_property_item};
use tracing::debug;

use crate::roles::{GeoRole, TOOLTIP_TEXT};

/// Bucket binding the tooltip text attribute to `display_form_uri`.
pub fn build_tooltip_bucket(display_form_uri: &str) -> Bucket {
    Bucket::new(
        TOOLTIP_TEXT,
        vec![BucketItem::attribute(TOOLTIP_TEXT, display_form_uri)],
    )
}

/// Buckets of a persisted pushpin definition.
///
/// The tooltip text attribute is stored in the properties blob
/// (`controls.tooltipText`) rather than as a bucket; it is appended as a
/// synthesized tooltip bucket unless one is already declared.
pub fn get_geo_buckets_from_md_object(md_object: Option<&VisualizationObjectContent>) -> Vec<Bucket> {
    let Some(md_object) = md_object else {
        return Vec::new();
    };
    let mut buckets = md_object.buckets.clone();

    let properties = parse_geo_property_item(md_object.properties.as_deref());
    let Some(tooltip_text) = properties.tooltip_text() else {
        return buckets;
    };

    let declared = buckets.iter().any(|bucket| {
        GeoRole::from_bucket_name(&bucket.local_identifier) == Some(GeoRole::TooltipText)
            && !bucket.items.is_empty()
    });
    if declared {
        debug!("tooltip text bucket already declared, ignoring properties control");
        return buckets;
    }

    buckets.push(build_tooltip_bucket(tooltip_text));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn geo1() -> BucketItem {
        BucketItem::attribute("localIdentifier123", "/gdc/displayform/geo1")
    }

    #[test]
    fn appends_tooltip_bucket_from_properties() {
        let md_object = VisualizationObjectContent {
            visualization_class: Some(formats::ObjQualifier::uri("/gdc/visualizationclass/1")),
            buckets: vec![Bucket::new("location", vec![geo1()])],
            properties: Some(r#"{"controls":{"tooltipText":"/gdc/displayform/geo2"}}"#.to_string()),
        };
        assert_eq!(
            get_geo_buckets_from_md_object(Some(&md_object)),
            vec![
                Bucket::new("location", vec![geo1()]),
                Bucket::new(
                    "tooltipText",
                    vec![BucketItem::attribute("tooltipText", "/gdc/displayform/geo2")]
                ),
            ]
        );
    }

    #[test]
    fn without_properties_buckets_are_unchanged() {
        let md_object = VisualizationObjectContent {
            visualization_class: None,
            buckets: vec![Bucket::new("size", vec![geo1()])],
            properties: None,
        };
        assert_eq!(
            get_geo_buckets_from_md_object(Some(&md_object)),
            md_object.buckets
        );
    }

    #[test]
    fn malformed_properties_are_ignored() {
        let md_object = VisualizationObjectContent {
            buckets: vec![Bucket::new("location", vec![geo1()])],
            properties: Some("{not json".to_string()),
            ..VisualizationObjectContent::default()
        };
        assert_eq!(get_geo_buckets_from_md_object(Some(&md_object)), md_object.buckets);
    }

    #[test]
    fn declared_tooltip_bucket_is_not_duplicated() {
        let declared = build_tooltip_bucket("/gdc/displayform/geo3");
        let md_object = VisualizationObjectContent {
            buckets: vec![Bucket::new("location", vec![geo1()]), declared],
            properties: Some(r#"{"controls":{"tooltipText":"/gdc/displayform/geo2"}}"#.to_string()),
            ..VisualizationObjectContent::default()
        };
        assert_eq!(get_geo_buckets_from_md_object(Some(&md_object)), md_object.buckets);
    }

    #[test]
    fn no_md_object_means_no_buckets() {
        assert!(get_geo_buckets_from_md_object(None).is_empty());
    }
}
