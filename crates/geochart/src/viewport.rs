//! Property deltas persisted when the user pans or zooms the map.
//!
//! Defaults are never persisted: a center equal to the default center or a
//! zoom equal to the default zoom leaves the corresponding control unset.

use serde::{Deserialize, Serialize};

use formats::{GeoControls, GeoProperties};
use foundation::{LngLat, is_default_zoom};

/// `{"properties": {...}}` payload handed back to the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesChange {
    pub properties: GeoProperties,
}

impl PropertiesChange {
    fn with_controls(controls: GeoControls) -> Self {
        Self {
            properties: GeoProperties {
                controls: Some(controls),
                ..GeoProperties::default()
            },
        }
    }
}

/// Delta after a move ends. The center is rounded before the default check.
pub fn center_changed(center: LngLat, tooltip_text: Option<&str>) -> PropertiesChange {
    let center = center.to_fixed();
    PropertiesChange::with_controls(GeoControls {
        center: (!center.is_default()).then_some(center),
        tooltip_text: tooltip_text.map(str::to_string),
        ..GeoControls::default()
    })
}

/// Delta after a zoom ends.
pub fn zoom_changed(zoom: f64) -> PropertiesChange {
    PropertiesChange::with_controls(GeoControls {
        zoom: (!is_default_zoom(zoom)).then_some(zoom),
        ..GeoControls::default()
    })
}
