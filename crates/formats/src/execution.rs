//! Execution response and result shapes produced by the analytics engine.
//!
//! A response describes the result's dimensions (attribute headers and at most
//! one measure group); the result carries the header item labels per dimension
//! and, when measures were requested, a two-dimensional data matrix with one row
//! per measure.

use serde::{Deserialize, Serialize};

use foundation::coerce_to_float;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponses {
    pub execution_response: ExecutionResponse,
    pub execution_result: ExecutionResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub dimensions: Vec<ResultDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ExecutionLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLinks {
    pub execution_result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDimension {
    #[serde(default)]
    pub headers: Vec<Header>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Header {
    AttributeHeader(AttributeHeader),
    MeasureGroupHeader(MeasureGroupHeader),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeHeader {
    pub name: String,
    #[serde(default)]
    pub local_identifier: String,
    /// Display form URI.
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_of: Option<AttributeFormOf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeFormOf {
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureGroupHeader {
    #[serde(default)]
    pub items: Vec<MeasureHeaderItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureHeaderItem {
    pub measure_header_item: MeasureHeader,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureHeader {
    pub name: String,
    #[serde(default)]
    pub local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ExecutionResponse {
    /// All attribute headers, dimension by dimension, in header order.
    pub fn attribute_headers(&self) -> Vec<&AttributeHeader> {
        attribute_headers_in_dimensions(&self.dimensions)
    }

    /// Items of the (single) measure group header, or empty if there is none.
    pub fn measure_group_items(&self) -> &[MeasureHeaderItem] {
        measure_group_header_items(&self.dimensions)
    }

    /// Format string of the measure at `measure_index` in the measure group.
    pub fn measure_format(&self, measure_index: usize) -> Option<&str> {
        self.measure_group_items()
            .get(measure_index)
            .and_then(|item| item.measure_header_item.format.as_deref())
    }
}

pub fn attribute_headers_in_dimensions(dimensions: &[ResultDimension]) -> Vec<&AttributeHeader> {
    dimensions
        .iter()
        .flat_map(|dimension| dimension.headers.iter())
        .filter_map(|header| match header {
            Header::AttributeHeader(attribute) => Some(attribute),
            Header::MeasureGroupHeader(_) => None,
        })
        .collect()
}

pub fn measure_group_header_items(dimensions: &[ResultDimension]) -> &[MeasureHeaderItem] {
    dimensions
        .iter()
        .flat_map(|dimension| dimension.headers.iter())
        .find_map(|header| match header {
            Header::MeasureGroupHeader(group) => Some(group.items.as_slice()),
            Header::AttributeHeader(_) => None,
        })
        .unwrap_or(&[])
}

/// A raw cell of the data matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Text(String),
    Number(f64),
    Null,
}

impl DataValue {
    pub fn to_f64(&self) -> f64 {
        match self {
            DataValue::Text(s) => coerce_to_float(Some(s.as_str())),
            DataValue::Number(n) => *n,
            DataValue::Null => coerce_to_float(None),
        }
    }
}

/// The data matrix as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultData {
    Rows(Vec<Vec<DataValue>>),
    Flat(Vec<DataValue>),
}

impl Default for ResultData {
    fn default() -> Self {
        ResultData::Flat(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultHeaderItem {
    AttributeHeaderItem(NamedHeaderItem),
    MeasureHeaderItem(MeasureResultItem),
    TotalHeaderItem(TotalResultItem),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedHeaderItem {
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureResultItem {
    pub name: String,
    #[serde(default)]
    pub order: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalResultItem {
    pub name: String,
    #[serde(rename = "type", default)]
    pub total_type: String,
}

impl ResultHeaderItem {
    pub fn attribute(name: impl Into<String>, uri: impl Into<String>) -> Self {
        ResultHeaderItem::AttributeHeaderItem(NamedHeaderItem {
            name: name.into(),
            uri: uri.into(),
        })
    }

    /// Display text of the item, whichever header kind it is.
    pub fn name(&self) -> &str {
        match self {
            ResultHeaderItem::AttributeHeaderItem(item) => &item.name,
            ResultHeaderItem::MeasureHeaderItem(item) => &item.name,
            ResultHeaderItem::TotalHeaderItem(item) => &item.name,
        }
    }
}

/// Header items of one dimension: one label sequence per attribute.
pub type DimensionHeaderItems = Vec<Vec<ResultHeaderItem>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub data: ResultData,
    #[serde(default)]
    pub header_items: Vec<DimensionHeaderItems>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    pub count: Vec<usize>,
    pub offset: Vec<usize>,
    pub total: Vec<usize>,
}

/// Shape of an execution result, resolved once at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutionData<'a> {
    /// Attribute-only result: labels, no measure rows.
    OneDimensional {
        header_items: &'a [DimensionHeaderItems],
    },
    TwoDimensional {
        measure_rows: &'a [Vec<DataValue>],
        header_items: &'a [DimensionHeaderItems],
    },
}

impl<'a> ExecutionData<'a> {
    pub fn resolve(result: &'a ExecutionResult) -> Self {
        let header_items = result.header_items.as_slice();
        match &result.data {
            ResultData::Rows(rows) if !rows.is_empty() => ExecutionData::TwoDimensional {
                measure_rows: rows.as_slice(),
                header_items,
            },
            _ => ExecutionData::OneDimensional { header_items },
        }
    }

    pub fn is_two_dimensional(&self) -> bool {
        matches!(self, ExecutionData::TwoDimensional { .. })
    }

    pub fn header_items(&self) -> &'a [DimensionHeaderItems] {
        match *self {
            ExecutionData::OneDimensional { header_items }
            | ExecutionData::TwoDimensional { header_items, .. } => header_items,
        }
    }

    /// Measure row at `index`; `None` for attribute-only results or out of range.
    pub fn measure_row(&self, index: usize) -> Option<&'a [DataValue]> {
        match *self {
            ExecutionData::OneDimensional { .. } => None,
            ExecutionData::TwoDimensional { measure_rows, .. } => {
                measure_rows.get(index).map(Vec::as_slice)
            }
        }
    }
}
