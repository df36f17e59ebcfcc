//! Size and clustering policy.

use formats::{Bucket, ExecutionResponses, ExecutionResult};
use tracing::warn;

use crate::extract::get_geo_attribute_header_items;
use crate::model::{GeoData, RoleIndex};
use crate::resolver::get_geo_data_index;
use crate::roles::{GeoRole, LOCATION};

/// Default points limit applied by callers that do not configure one.
pub const DEFAULT_DATA_POINTS_LIMIT: usize = 25_000;

/// Configured limit, falling back to the default when unset or zero.
pub fn limit_or_default(limit: Option<usize>) -> usize {
    limit
        .filter(|&limit| limit > 0)
        .unwrap_or(DEFAULT_DATA_POINTS_LIMIT)
}

/// Whether the result has more location rows than `limit`.
///
/// Despite the name this is a "too large" predicate: `true` means the data must
/// be rejected rather than rendered.
pub fn is_data_of_reasonable_size(
    result: &ExecutionResult,
    roles: &impl RoleIndex,
    limit: usize,
) -> bool {
    location_count(result, roles) > limit
}

/// Number of location header items; 0 when location is not bound.
pub fn location_count(result: &ExecutionResult, roles: &impl RoleIndex) -> usize {
    let Some(location_index) = roles.role_index(GeoRole::Location) else {
        return 0;
    };
    get_geo_attribute_header_items(result, roles)
        .get(location_index)
        .map_or(0, Vec::len)
}

/// Clustering is only allowed when no per-point styling role (size, color,
/// segment) is bound.
pub fn is_clustering_allowed(geo_data: &GeoData) -> bool {
    geo_data.size.is_none() && geo_data.color.is_none() && geo_data.segment.is_none()
}

/// True iff no location bucket has any items.
pub fn is_location_missing(buckets: &[Bucket]) -> bool {
    !buckets
        .iter()
        .any(|bucket| bucket.local_identifier == LOCATION && !bucket.items.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataVerdict {
    /// No execution has arrived yet.
    Pending,
    Reasonable,
    /// The too-large callback was invoked.
    TooLarge,
}

/// Check a freshly arrived execution against the points limit.
///
/// When the data is too large `on_data_too_large` is invoked. A missing
/// callback in that case is a caller contract violation and panics.
pub fn validate_data(
    execution: Option<&ExecutionResponses>,
    buckets: &[Bucket],
    limit: Option<usize>,
    on_data_too_large: Option<&mut dyn FnMut()>,
) -> DataVerdict {
    let Some(execution) = execution else {
        return DataVerdict::Pending;
    };

    let index = get_geo_data_index(buckets);
    let limit = limit_or_default(limit);
    if !is_data_of_reasonable_size(&execution.execution_result, &index, limit) {
        return DataVerdict::Reasonable;
    }

    warn!(
        "geo data too large: {} locations over limit {limit}",
        location_count(&execution.execution_result, &index)
    );
    let Some(on_data_too_large) = on_data_too_large else {
        panic!("GeoChart's onDataTooLarge callback is missing.");
    };
    on_data_too_large();
    DataVerdict::TooLarge
}
