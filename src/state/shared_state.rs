use serde::Serialize;

use crate::types::{place::PlaceDetails, search_option::SearchOption};

/// Progress of the most recent request of one kind.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

/// Session-wide search state. Each field is replaced wholesale.
#[derive(Serialize, Debug, Clone, Default)]
pub struct SharedState {
    auto_complete_results: Vec<SearchOption>,
    place_details: Option<PlaceDetails>,
    place_details_seq: u64,
    recent_searches: Vec<SearchOption>,
    autocomplete_status: RequestStatus,
    place_details_status: RequestStatus,
}

impl SharedState {
    pub fn auto_complete_results(&self) -> &[SearchOption] {
        &self.auto_complete_results
    }

    pub fn place_details(&self) -> Option<&PlaceDetails> {
        self.place_details.as_ref()
    }

    /// Sequence number of the request whose response is in `place_details`,
    /// 0 until the first response lands.
    pub fn place_details_seq(&self) -> u64 {
        self.place_details_seq
    }

    pub fn recent_searches(&self) -> &[SearchOption] {
        &self.recent_searches
    }

    pub fn autocomplete_status(&self) -> &RequestStatus {
        &self.autocomplete_status
    }

    pub fn place_details_status(&self) -> &RequestStatus {
        &self.place_details_status
    }

    pub fn set_auto_complete_results(&mut self, results: Vec<SearchOption>) {
        self.auto_complete_results = results;
    }

    pub fn set_place_details(&mut self, details: Option<PlaceDetails>, seq: u64) {
        self.place_details = details;
        self.place_details_seq = seq;
    }

    pub fn set_recent_searches(&mut self, searches: Vec<SearchOption>) {
        self.recent_searches = searches;
    }

    pub fn set_autocomplete_status(&mut self, status: RequestStatus) {
        self.autocomplete_status = status;
    }

    pub fn set_place_details_status(&mut self, status: RequestStatus) {
        self.place_details_status = status;
    }
}
