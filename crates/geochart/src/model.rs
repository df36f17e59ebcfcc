//! Role-index maps and the extracted per-role geo data.
//!
//! Every role is an `Option`: a role is present iff its bucket resolved, and an
//! absent role is an omitted key when serialized, never `null`.

use serde::{Deserialize, Serialize};

use crate::roles::GeoRole;

/// Anything that can tell the position of a role in the execution result.
pub trait RoleIndex {
    fn role_index(&self, role: GeoRole) -> Option<usize>;

    fn has_role(&self, role: GeoRole) -> bool {
        self.role_index(role).is_some()
    }

    /// Whether a size or color measure is bound, i.e. the result carries a
    /// measure group in its other dimension.
    fn has_measure(&self) -> bool {
        GeoRole::MEASURES.into_iter().any(|role| self.has_role(role))
    }
}

/// Header position and display name of a resolved role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    pub index: usize,
    pub name: String,
}

impl RoleBinding {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Output of the header-based resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RoleBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<RoleBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<RoleBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<RoleBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RoleBinding>,
}

impl ResolvedRoles {
    pub fn get(&self, role: GeoRole) -> Option<&RoleBinding> {
        match role {
            GeoRole::Location => self.location.as_ref(),
            GeoRole::Segment => self.segment.as_ref(),
            GeoRole::TooltipText => self.tooltip_text.as_ref(),
            GeoRole::Size => self.size.as_ref(),
            GeoRole::Color => self.color.as_ref(),
        }
    }

    pub fn set(&mut self, role: GeoRole, binding: RoleBinding) {
        let slot = match role {
            GeoRole::Location => &mut self.location,
            GeoRole::Segment => &mut self.segment,
            GeoRole::TooltipText => &mut self.tooltip_text,
            GeoRole::Size => &mut self.size,
            GeoRole::Color => &mut self.color,
        };
        *slot = Some(binding);
    }
}

impl RoleIndex for ResolvedRoles {
    fn role_index(&self, role: GeoRole) -> Option<usize> {
        self.get(role).map(|binding| binding.index)
    }
}

/// Output of the presence-flag resolver: positions only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoDataIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_by: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<usize>,
}

impl RoleIndex for GeoDataIndex {
    fn role_index(&self, role: GeoRole) -> Option<usize> {
        match role {
            GeoRole::Location => self.location,
            GeoRole::Segment => self.segment_by,
            GeoRole::TooltipText => self.tooltip_text,
            GeoRole::Size => self.size,
            GeoRole::Color => self.color,
        }
    }
}

/// Labels of an attribute role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeData {
    pub index: usize,
    pub name: String,
    pub data: Vec<String>,
}

/// Values of a measure role, with the measure's display format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureData {
    pub index: usize,
    pub name: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Role-keyed data consumed by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<AttributeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<AttributeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<AttributeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<MeasureData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<MeasureData>,
}

impl GeoData {
    pub fn is_empty(&self) -> bool {
        !GeoRole::ALL.into_iter().any(|role| self.has_role(role))
    }

    /// Number of location rows; 0 when location is not bound.
    pub fn point_count(&self) -> usize {
        self.location.as_ref().map_or(0, |location| location.data.len())
    }
}

impl RoleIndex for GeoData {
    fn role_index(&self, role: GeoRole) -> Option<usize> {
        match role {
            GeoRole::Location => self.location.as_ref().map(|d| d.index),
            GeoRole::Segment => self.segment.as_ref().map(|d| d.index),
            GeoRole::TooltipText => self.tooltip_text.as_ref().map(|d| d.index),
            GeoRole::Size => self.size.as_ref().map(|d| d.index),
            GeoRole::Color => self.color.as_ref().map(|d| d.index),
        }
    }
}
