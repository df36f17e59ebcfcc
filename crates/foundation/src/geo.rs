//! Geographic coordinate pair and viewport defaults.
//!
//! The rendering layer only persists viewport changes that differ from the
//! defaults below, and always rounds centers to `DEFAULT_ROUND_NUM` decimals so
//! that sub-pixel pans do not produce noisy property updates.

use serde::{Deserialize, Serialize};

use crate::math::round_to_fixed;

/// Default map center latitude (degrees).
pub const DEFAULT_LATITUDE: f64 = 34.0;
/// Default map center longitude (degrees).
pub const DEFAULT_LONGITUDE: f64 = 5.0;
/// Default map zoom level.
pub const DEFAULT_ZOOM: f64 = 2.0;
/// Decimal places kept when persisting a map center.
pub const DEFAULT_ROUND_NUM: usize = 5;

/// Separator between latitude and longitude in a location label (`"44.5;-89.5"`).
pub const LOCATION_SEPARATOR: char = ';';

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lat: f64,
    pub lng: f64,
}

impl LngLat {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub const fn default_center() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }

    pub fn is_default(&self) -> bool {
        self.lat == DEFAULT_LATITUDE && self.lng == DEFAULT_LONGITUDE
    }

    /// Round both components to `DEFAULT_ROUND_NUM` decimal places.
    pub fn to_fixed(&self) -> Self {
        Self::new(
            round_to_fixed(self.lat, DEFAULT_ROUND_NUM),
            round_to_fixed(self.lng, DEFAULT_ROUND_NUM),
        )
    }

    /// Parse a `"lat;lng"` location label.
    ///
    /// Returns `None` when either half is missing or not a finite number.
    pub fn from_location_label(label: &str) -> Option<Self> {
        let (lat, lng) = label.split_once(LOCATION_SEPARATOR)?;
        let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lng = lng.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self::new(lat, lng))
    }

    /// `[lng, lat]`, the GeoJSON coordinate order.
    pub fn to_geojson_coords(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl Default for LngLat {
    fn default() -> Self {
        Self::default_center()
    }
}

pub fn is_default_center(center: LngLat) -> bool {
    center.is_default()
}

pub fn is_default_zoom(zoom: f64) -> bool {
    zoom == DEFAULT_ZOOM
}

pub fn center_to_fixed(center: LngLat) -> LngLat {
    center.to_fixed()
}
