use serde::{Deserialize, Serialize};

use crate::types::place::PlaceDetails;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GooglePlaceDetailsResponse {
    pub result: Option<PlaceDetails>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}
