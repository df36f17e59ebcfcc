//! Visualization definition: buckets of attribute/measure items and the
//! persisted visualization object that carries them.

use serde::{Deserialize, Serialize};

/// Reference to a metadata object, either by URI or by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjQualifier {
    Uri { uri: String },
    Identifier { identifier: String },
}

impl ObjQualifier {
    pub fn uri(uri: impl Into<String>) -> Self {
        ObjQualifier::Uri { uri: uri.into() }
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            ObjQualifier::Uri { uri } => Some(uri),
            ObjQualifier::Identifier { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub local_identifier: String,
    #[serde(default)]
    pub items: Vec<BucketItem>,
}

impl Bucket {
    pub fn new(local_identifier: impl Into<String>, items: Vec<BucketItem>) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            items,
        }
    }

    /// Only the first item of a bucket is significant.
    pub fn first_item(&self) -> Option<&BucketItem> {
        self.items.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BucketItem {
    VisualizationAttribute(VisualizationAttribute),
    Measure(Measure),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationAttribute {
    pub local_identifier: String,
    pub display_form: ObjQualifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub local_identifier: String,
    pub definition: MeasureDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Simple measures reference a metadata item; derived measures (period over
/// period, arithmetic) reference other measures and have no item of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureDefinition {
    MeasureDefinition(SimpleMeasureDefinition),
    PopMeasureDefinition(serde_json::Value),
    PreviousPeriodMeasure(serde_json::Value),
    ArithmeticMeasure(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMeasureDefinition {
    pub item: ObjQualifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_ratio: Option<bool>,
}

impl BucketItem {
    pub fn attribute(local_identifier: impl Into<String>, display_form_uri: impl Into<String>) -> Self {
        BucketItem::VisualizationAttribute(VisualizationAttribute {
            local_identifier: local_identifier.into(),
            display_form: ObjQualifier::uri(display_form_uri),
            alias: None,
        })
    }

    pub fn measure(local_identifier: impl Into<String>, item_uri: impl Into<String>) -> Self {
        BucketItem::Measure(Measure {
            local_identifier: local_identifier.into(),
            definition: MeasureDefinition::MeasureDefinition(SimpleMeasureDefinition {
                item: ObjQualifier::uri(item_uri),
                aggregation: None,
                compute_ratio: None,
            }),
            title: None,
            alias: None,
            format: None,
        })
    }

    pub fn local_identifier(&self) -> &str {
        match self {
            BucketItem::VisualizationAttribute(attribute) => &attribute.local_identifier,
            BucketItem::Measure(measure) => &measure.local_identifier,
        }
    }

    /// Display form URI for attributes, referenced item URI for simple measures.
    pub fn uri(&self) -> Option<&str> {
        match self {
            BucketItem::VisualizationAttribute(attribute) => attribute.display_form.as_uri(),
            BucketItem::Measure(measure) => match &measure.definition {
                MeasureDefinition::MeasureDefinition(definition) => definition.item.as_uri(),
                _ => None,
            },
        }
    }
}

/// Persisted visualization definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationObjectContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_class: Option<ObjQualifier>,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    /// Serialized JSON properties blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
}
