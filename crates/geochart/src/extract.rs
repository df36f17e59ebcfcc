//! Per-role value extraction.

use formats::{
    Bucket, DimensionHeaderItems, ExecutionData, ExecutionResponse, ExecutionResponses,
    ExecutionResult, ResultHeaderItem,
};
use tracing::debug;

use crate::model::{AttributeData, GeoData, MeasureData, ResolvedRoles, RoleBinding, RoleIndex};
use crate::resolver::resolve_roles;
use crate::roles::GeoRole;

/// Extract labels and values for every resolvable role.
///
/// Roles that do not resolve are left out. Malformed results degrade to empty
/// data for the affected role.
pub fn extract_geo_data(buckets: &[Bucket], execution: &ExecutionResponses) -> GeoData {
    let ExecutionResponses {
        execution_response,
        execution_result,
    } = execution;
    let roles = resolve_roles(buckets, &execution_response.dimensions);
    geo_data_from_roles(&roles, execution_response, execution_result)
}

/// Extraction step alone, for callers that already resolved the roles.
pub fn geo_data_from_roles(
    roles: &ResolvedRoles,
    response: &ExecutionResponse,
    result: &ExecutionResult,
) -> GeoData {
    let data = ExecutionData::resolve(result);
    let attribute_items = attribute_header_items(data.header_items(), roles);

    let attribute = |role: GeoRole| {
        roles.get(role).map(|binding| AttributeData {
            index: binding.index,
            name: binding.name.clone(),
            data: attribute_data(attribute_items, binding, role),
        })
    };
    let measure = |role: GeoRole| {
        roles.get(role).map(|binding| MeasureData {
            index: binding.index,
            name: binding.name.clone(),
            data: measure_data(&data, binding, role),
            format: get_format_from_execution_response(response, binding.index),
        })
    };

    GeoData {
        location: attribute(GeoRole::Location),
        segment: attribute(GeoRole::Segment),
        tooltip_text: attribute(GeoRole::TooltipText),
        size: measure(GeoRole::Size),
        color: measure(GeoRole::Color),
    }
}

/// Attribute header items of the result.
///
/// When a size or color measure is bound the measure group occupies the first
/// dimension and the attributes live in the second; otherwise in the first.
pub fn get_geo_attribute_header_items<'a>(
    result: &'a ExecutionResult,
    roles: &impl RoleIndex,
) -> &'a [Vec<ResultHeaderItem>] {
    attribute_header_items(&result.header_items, roles)
}

fn attribute_header_items<'a>(
    header_items: &'a [DimensionHeaderItems],
    roles: &impl RoleIndex,
) -> &'a [Vec<ResultHeaderItem>] {
    let dimension = usize::from(roles.has_measure());
    header_items
        .get(dimension)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn attribute_data(items: &[Vec<ResultHeaderItem>], binding: &RoleBinding, role: GeoRole) -> Vec<String> {
    match items.get(binding.index) {
        Some(labels) => labels.iter().map(|item| item.name().to_string()).collect(),
        None => {
            debug!("{role}: no header items at attribute index {}", binding.index);
            Vec::new()
        }
    }
}

fn measure_data(data: &ExecutionData<'_>, binding: &RoleBinding, role: GeoRole) -> Vec<f64> {
    if !data.is_two_dimensional() {
        debug!("{role}: result is attribute-only, no measure values");
        return Vec::new();
    }
    match data.measure_row(binding.index) {
        Some(row) => row.iter().map(|value| value.to_f64()).collect(),
        None => {
            debug!("{role}: no data row at measure index {}", binding.index);
            Vec::new()
        }
    }
}

/// Display format of the measure at `measure_index`, if it has one.
pub fn get_format_from_execution_response(
    response: &ExecutionResponse,
    measure_index: usize,
) -> Option<String> {
    response.measure_format(measure_index).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoDataIndex;
    use formats::{BucketItem, DataValue, ResultData};
    use pretty_assertions::assert_eq;

    fn response(measures: bool) -> ExecutionResponse {
        let mut dimensions = Vec::new();
        if measures {
            dimensions.push(serde_json::json!({ "headers": [ { "measureGroupHeader": { "items": [
                { "measureHeaderItem": { "name": "Population", "localIdentifier": "m_size", "format": "#,##0" } }
            ] } } ] }));
        }
        dimensions.push(serde_json::json!({ "headers": [
            { "attributeHeader": { "name": "State", "localIdentifier": "a_location", "uri": "/obj/1" } }
        ] }));
        serde_json::from_value(serde_json::json!({ "dimensions": dimensions })).unwrap()
    }

    fn labels(names: &[&str]) -> Vec<ResultHeaderItem> {
        names
            .iter()
            .map(|name| ResultHeaderItem::attribute(*name, "/e"))
            .collect()
    }

    fn buckets(size: bool) -> Vec<Bucket> {
        let mut buckets = vec![Bucket::new("location", vec![BucketItem::attribute("a_location", "/obj/1")])];
        if size {
            buckets.push(Bucket::new("size", vec![BucketItem::measure("m_size", "/obj/4")]));
        }
        buckets
    }

    #[test]
    fn empty_buckets_give_empty_geo_data() {
        let execution = ExecutionResponses {
            execution_response: response(true),
            execution_result: ExecutionResult::default(),
        };
        assert_eq!(extract_geo_data(&[], &execution), GeoData::default());
    }

    #[test]
    fn extracts_labels_and_coerced_values() {
        let execution = ExecutionResponses {
            execution_response: response(true),
            execution_result: ExecutionResult {
                data: ResultData::Rows(vec![vec![
                    DataValue::Text("10".to_string()),
                    DataValue::Null,
                    DataValue::Text("abc".to_string()),
                ]]),
                header_items: vec![
                    vec![labels(&["Population"])],
                    vec![labels(&["1;2", "3;4", "5;6"])],
                ],
                paging: None,
            },
        };
        let geo = extract_geo_data(&buckets(true), &execution);

        let location = geo.location.unwrap();
        assert_eq!(location.index, 0);
        assert_eq!(location.name, "State");
        assert_eq!(location.data, vec!["1;2", "3;4", "5;6"]);

        let size = geo.size.unwrap();
        assert_eq!(size.name, "Population");
        assert_eq!(size.format.as_deref(), Some("#,##0"));
        assert_eq!(size.data.len(), 3);
        assert_eq!(size.data[0], 10.0);
        assert!(size.data[1].is_nan());
        assert_eq!(size.data[2], 0.0);
    }

    #[test]
    fn attribute_only_result_yields_empty_measure_data() {
        let execution = ExecutionResponses {
            execution_response: response(true),
            execution_result: ExecutionResult {
                data: ResultData::Flat(Vec::new()),
                header_items: vec![vec![], vec![labels(&["1;2"])]],
                paging: None,
            },
        };
        let geo = extract_geo_data(&buckets(true), &execution);
        assert_eq!(geo.size.unwrap().data, Vec::<f64>::new());
        assert_eq!(geo.location.unwrap().data, vec!["1;2"]);
    }

    #[test]
    fn missing_header_items_degrade_to_empty() {
        let execution = ExecutionResponses {
            execution_response: response(false),
            execution_result: ExecutionResult::default(),
        };
        let geo = extract_geo_data(&buckets(false), &execution);
        assert_eq!(
            geo.location,
            Some(AttributeData {
                index: 0,
                name: "State".to_string(),
                data: Vec::new(),
            })
        );
    }

    #[test]
    fn attribute_header_items_dimension_depends_on_measures() {
        let result = ExecutionResult {
            header_items: vec![vec![labels(&["m"])], vec![labels(&["a", "b"])]],
            ..ExecutionResult::default()
        };
        let without = GeoDataIndex::default();
        assert_eq!(get_geo_attribute_header_items(&result, &without)[0].len(), 1);

        let with_color = GeoDataIndex {
            location: Some(0),
            color: Some(0),
            ..GeoDataIndex::default()
        };
        assert_eq!(get_geo_attribute_header_items(&result, &with_color)[0].len(), 2);

        let empty = ExecutionResult::default();
        assert!(get_geo_attribute_header_items(&empty, &without).is_empty());
    }

    #[test]
    fn format_lookup_out_of_range_is_none() {
        assert_eq!(get_format_from_execution_response(&response(true), 0), Some("#,##0".to_string()));
        assert_eq!(get_format_from_execution_response(&response(true), 3), None);
        assert_eq!(get_format_from_execution_response(&response(false), 0), None);
    }
}
