use std::fmt;

pub const LOCATION: &str = "location";
pub const SEGMENT: &str = "segment";
pub const SEGMENT_BY: &str = "segmentBy";
pub const TOOLTIP_TEXT: &str = "tooltipText";
pub const SIZE: &str = "size";
pub const COLOR: &str = "color";

/// Bucket roles of a pushpin chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeoRole {
    Location,
    Segment,
    TooltipText,
    Size,
    Color,
}

impl GeoRole {
    /// Roles bound to attributes, in canonical order.
    pub const ATTRIBUTES: [GeoRole; 3] = [GeoRole::Location, GeoRole::Segment, GeoRole::TooltipText];
    /// Roles bound to measures, in canonical order.
    pub const MEASURES: [GeoRole; 2] = [GeoRole::Size, GeoRole::Color];
    pub const ALL: [GeoRole; 5] = [
        GeoRole::Location,
        GeoRole::Segment,
        GeoRole::TooltipText,
        GeoRole::Size,
        GeoRole::Color,
    ];

    /// Role for a bucket local identifier. `segment` and `segmentBy` are aliases.
    pub fn from_bucket_name(name: &str) -> Option<Self> {
        match name {
            LOCATION => Some(GeoRole::Location),
            SEGMENT | SEGMENT_BY => Some(GeoRole::Segment),
            TOOLTIP_TEXT => Some(GeoRole::TooltipText),
            SIZE => Some(GeoRole::Size),
            COLOR => Some(GeoRole::Color),
            _ => None,
        }
    }

    pub fn is_measure(self) -> bool {
        matches!(self, GeoRole::Size | GeoRole::Color)
    }

    /// Key used in extracted geo data.
    pub fn as_str(self) -> &'static str {
        match self {
            GeoRole::Location => LOCATION,
            GeoRole::Segment => SEGMENT,
            GeoRole::TooltipText => TOOLTIP_TEXT,
            GeoRole::Size => SIZE,
            GeoRole::Color => COLOR,
        }
    }
}

impl fmt::Display for GeoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
