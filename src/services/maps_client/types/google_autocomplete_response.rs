use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GoogleAutocompleteResponsePrediction {
    pub description: String,
    pub place_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GoogleAutocompleteResponse {
    pub predictions: Option<Vec<GoogleAutocompleteResponsePrediction>>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}
