use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Bounding box as returned by the places API.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Geometry {
    pub location: LatLng,
    pub viewport: Option<Viewport>,
}

/// Details for a single place. Only `geometry` is interpreted; every other
/// field of the API result is carried along untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub geometry: Option<Geometry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
