//! Data binding for pushpin geo charts.
//!
//! Maps bucket roles (location, segment, tooltip text, size, color) onto
//! positions in an execution result, extracts the per-role labels and measure
//! values, and decides whether the result may be rendered and clustered.
//!
//! Layers:
//! - `roles`: the closed role vocabulary
//! - `resolver`: bucket roles to header positions (header-based and presence-flag variants)
//! - `extract`: per-role label/value extraction into `GeoData`
//! - `policy`: too-large, clustering and location-missing verdicts
//! - `buckets`, `config`, `viewport`, `source`: glue for the rendering layer

pub mod buckets;
pub mod config;
pub mod extract;
pub mod model;
pub mod policy;
pub mod resolver;
pub mod roles;
pub mod source;
pub mod viewport;

pub use buckets::*;
pub use config::*;
pub use extract::*;
pub use model::*;
pub use policy::*;
pub use resolver::*;
pub use roles::*;
pub use source::*;
pub use viewport::*;
