use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::services::maps_client::{
    maps_service::PlacesApi,
    types::{
        google_autocomplete_response::{
            GoogleAutocompleteResponse, GoogleAutocompleteResponsePrediction,
        },
        google_place_details_response::GooglePlaceDetailsResponse,
        maps_service_error::MapsServiceError,
    },
};

type Gate<T> = oneshot::Receiver<Result<T, MapsServiceError>>;

/// In-process [`PlacesApi`] whose responses are released by the test, in any
/// order. Calls without a registered gate answer immediately with an empty
/// response.
#[derive(Default)]
pub struct FakePlacesApi {
    calls: Mutex<Vec<String>>,
    autocomplete_gates: Mutex<HashMap<String, Gate<GoogleAutocompleteResponse>>>,
    details_gates: Mutex<HashMap<String, Gate<GooglePlaceDetailsResponse>>>,
}

impl FakePlacesApi {
    pub fn gate_autocomplete(
        &self,
        input: &str,
    ) -> oneshot::Sender<Result<GoogleAutocompleteResponse, MapsServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.autocomplete_gates
            .lock()
            .unwrap()
            .insert(input.to_string(), rx);
        tx
    }

    pub fn gate_place_details(
        &self,
        place_id: &str,
    ) -> oneshot::Sender<Result<GooglePlaceDetailsResponse, MapsServiceError>> {
        let (tx, rx) = oneshot::channel();
        self.details_gates
            .lock()
            .unwrap()
            .insert(place_id.to_string(), rx);
        tx
    }

    /// Every call so far, as `autocomplete:<input>` or `details:<place id>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesApi for FakePlacesApi {
    async fn autocomplete(
        &self,
        input: &str,
    ) -> Result<GoogleAutocompleteResponse, MapsServiceError> {
        self.calls.lock().unwrap().push(format!("autocomplete:{}", input));
        let gate = self.autocomplete_gates.lock().unwrap().remove(input);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(MapsServiceError::NetworkFailure("gate dropped".into()))),
            None => Ok(GoogleAutocompleteResponse::default()),
        }
    }

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<GooglePlaceDetailsResponse, MapsServiceError> {
        self.calls.lock().unwrap().push(format!("details:{}", place_id));
        let gate = self.details_gates.lock().unwrap().remove(place_id);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(MapsServiceError::NetworkFailure("gate dropped".into()))),
            None => Ok(GooglePlaceDetailsResponse::default()),
        }
    }
}

pub fn predictions(pairs: &[(&str, &str)]) -> GoogleAutocompleteResponse {
    GoogleAutocompleteResponse {
        predictions: Some(
            pairs
                .iter()
                .map(|(description, place_id)| GoogleAutocompleteResponsePrediction {
                    description: description.to_string(),
                    place_id: place_id.to_string(),
                })
                .collect(),
        ),
        status: Some("OK".to_string()),
        error_message: None,
    }
}

pub fn details(json: serde_json::Value) -> GooglePlaceDetailsResponse {
    GooglePlaceDetailsResponse {
        result: Some(serde_json::from_value(json).unwrap()),
        status: Some("OK".to_string()),
        error_message: None,
    }
}
