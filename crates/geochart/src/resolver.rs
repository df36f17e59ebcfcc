//! Bucket role resolution.
//!
//! Two variants exist:
//! - [`resolve_roles`] looks each bucket's first item up in the execution
//!   response headers and reports the true header position. This is the source
//!   of truth.
//! - [`get_geo_data_index`] derives positions from role presence alone, in the
//!   fixed order location, segment, tooltip text (attributes) and size, color
//!   (measures). It agrees with [`resolve_roles`] only when the headers are laid
//!   out in that canonical order, and is meant for the size check where header
//!   metadata is not at hand.

use std::collections::BTreeMap;

use formats::{
    Bucket, BucketItem, ResultDimension, attribute_headers_in_dimensions,
    measure_group_header_items,
};
use tracing::{debug, trace};

use crate::model::{GeoDataIndex, ResolvedRoles, RoleBinding};
use crate::roles::GeoRole;

/// Identifiers a bucket item can be matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketItemInfo<'a> {
    pub local_identifier: &'a str,
    pub uri: Option<&'a str>,
}

impl<'a> BucketItemInfo<'a> {
    pub fn from_item(item: &'a BucketItem) -> Self {
        Self {
            local_identifier: item.local_identifier(),
            uri: item.uri(),
        }
    }

    fn matches(&self, local_identifier: &str, uri: Option<&str>) -> bool {
        if !self.local_identifier.is_empty() && self.local_identifier == local_identifier {
            return true;
        }
        matches!((self.uri, uri), (Some(a), Some(b)) if a == b)
    }
}

/// First item of every role bucket. A later bucket for the same role replaces an
/// earlier one; buckets without items and unknown bucket names are skipped.
pub fn bucket_item_infos(buckets: &[Bucket]) -> BTreeMap<GeoRole, BucketItemInfo<'_>> {
    let mut infos = BTreeMap::new();
    for bucket in buckets {
        let Some(role) = GeoRole::from_bucket_name(&bucket.local_identifier) else {
            trace!("ignoring bucket {:?}: not a geo role", bucket.local_identifier);
            continue;
        };
        let Some(item) = bucket.first_item() else {
            trace!("ignoring empty {role} bucket");
            continue;
        };
        infos.insert(role, BucketItemInfo::from_item(item));
    }
    infos
}

/// Resolve each bound role to its position in the execution response headers.
///
/// Attribute roles index into the flattened attribute headers, measure roles
/// into the measure group. A role whose item is not found is absent.
pub fn resolve_roles(buckets: &[Bucket], dimensions: &[ResultDimension]) -> ResolvedRoles {
    let attribute_headers = attribute_headers_in_dimensions(dimensions);
    let measure_items = measure_group_header_items(dimensions);
    let infos = bucket_item_infos(buckets);

    let mut resolved = ResolvedRoles::default();

    for role in GeoRole::ATTRIBUTES {
        let Some(info) = infos.get(&role) else {
            continue;
        };
        let found = attribute_headers
            .iter()
            .position(|header| info.matches(&header.local_identifier, Some(header.uri.as_str())));
        match found {
            Some(index) => {
                resolved.set(role, RoleBinding::new(index, &attribute_headers[index].name));
            }
            None => debug!(
                "{role} item {:?} not found among {} attribute headers",
                info.local_identifier,
                attribute_headers.len()
            ),
        }
    }

    for role in GeoRole::MEASURES {
        let Some(info) = infos.get(&role) else {
            continue;
        };
        let found = measure_items.iter().position(|item| {
            let header = &item.measure_header_item;
            info.matches(&header.local_identifier, header.uri.as_deref())
        });
        match found {
            Some(index) => {
                let name = &measure_items[index].measure_header_item.name;
                resolved.set(role, RoleBinding::new(index, name));
            }
            None => debug!(
                "{role} item {:?} not found among {} measure headers",
                info.local_identifier,
                measure_items.len()
            ),
        }
    }

    resolved
}

/// Positions derived from role presence alone.
///
/// Attribute roles count up in the order location, segment, tooltip text and
/// measure roles in the order size, color, skipping roles that are absent.
pub fn get_geo_data_index(buckets: &[Bucket]) -> GeoDataIndex {
    let infos = bucket_item_infos(buckets);
    let present = |role: GeoRole| infos.contains_key(&role);
    geo_data_index_from_presence(
        present(GeoRole::Location),
        present(GeoRole::Segment),
        present(GeoRole::TooltipText),
        present(GeoRole::Size),
        present(GeoRole::Color),
    )
}

pub fn geo_data_index_from_presence(
    location: bool,
    segment: bool,
    tooltip_text: bool,
    size: bool,
    color: bool,
) -> GeoDataIndex {
    let mut next_attribute = 0;
    let mut attribute_slot = |present: bool| {
        present.then(|| {
            let index = next_attribute;
            next_attribute += 1;
            index
        })
    };
    let location = attribute_slot(location);
    let segment_by = attribute_slot(segment);
    let tooltip_text = attribute_slot(tooltip_text);

    GeoDataIndex {
        location,
        segment_by,
        tooltip_text,
        size: size.then_some(0),
        color: color.then_some(usize::from(size)),
    }
}
