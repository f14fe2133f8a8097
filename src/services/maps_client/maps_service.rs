use async_trait::async_trait;
use tracing::warn;

use super::{
    http_client::HttpClient,
    query_builder::QueryParams,
    types::{
        google_autocomplete_response::GoogleAutocompleteResponse,
        google_place_details_response::GooglePlaceDetailsResponse,
        maps_service_error::MapsServiceError,
    },
};

const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";
const PLACE_DETAILS_PATH: &str = "/maps/api/place/details/json";

/// The two places endpoints the search screen depends on.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn autocomplete(&self, input: &str)
        -> Result<GoogleAutocompleteResponse, MapsServiceError>;

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<GooglePlaceDetailsResponse, MapsServiceError>;
}

#[derive(Clone)]
pub struct MapsServiceConfig {
    pub api_key: String,
    pub host: String,
}

#[derive(Clone)]
pub struct MapsService {
    config: MapsServiceConfig,
    client: HttpClient,
}

impl MapsService {
    pub fn new(config: MapsServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }

    fn url(&self, path: &str, params: QueryParams) -> String {
        format!(
            "{}{}{}",
            self.config.host,
            path,
            params.param("key", &self.config.api_key).to_query_string()
        )
    }
}

#[async_trait]
impl PlacesApi for MapsService {
    async fn autocomplete(
        &self,
        input: &str,
    ) -> Result<GoogleAutocompleteResponse, MapsServiceError> {
        let url = self.url(AUTOCOMPLETE_PATH, QueryParams::new().param("input", input));

        let body = self
            .client
            .try_fetch_json::<GoogleAutocompleteResponse>(&url)
            .await?;
        log_api_status("autocomplete", &body.status, &body.error_message);

        Ok(body)
    }

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<GooglePlaceDetailsResponse, MapsServiceError> {
        let url = self.url(
            PLACE_DETAILS_PATH,
            QueryParams::new().param("place_id", place_id),
        );

        let body = self
            .client
            .try_fetch_json::<GooglePlaceDetailsResponse>(&url)
            .await?;
        log_api_status("place details", &body.status, &body.error_message);

        Ok(body)
    }
}

// Google reports most failures in-band with a 200.
fn log_api_status(endpoint: &str, status: &Option<String>, error_message: &Option<String>) {
    match status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some(status) => warn!(
            "Places {} returned status {}: {}",
            endpoint,
            status,
            error_message.as_deref().unwrap_or("no error message")
        ),
    }
}
