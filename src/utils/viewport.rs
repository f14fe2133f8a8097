use serde::{Deserialize, Serialize};

use crate::types::place::LatLng;

/// Center and span of a map camera, in degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// Region centered on the box spanned by `northeast` and `southwest`.
///
/// Corners are taken as given: swapped corners produce negative deltas and a
/// box crossing the antimeridian is not normalized.
pub fn compute_region(northeast: LatLng, southwest: LatLng) -> MapRegion {
    MapRegion {
        latitude: (northeast.lat + southwest.lat) / 2.0,
        longitude: (northeast.lng + southwest.lng) / 2.0,
        latitude_delta: northeast.lat - southwest.lat,
        longitude_delta: northeast.lng - southwest.lng,
    }
}
