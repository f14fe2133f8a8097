use serde::Serialize;

use super::{map_widget::Camera, workflow::WorkflowState};
use crate::{
    state::shared_state::RequestStatus,
    types::{place::PlaceDetails, search_option::SearchOption},
};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything a client needs to draw the search screen.
#[derive(Serialize, Debug, Clone)]
pub struct ScreenView {
    pub input: String,
    pub input_focused: bool,
    pub show_clear_button: bool,
    pub show_options: bool,
    pub options_header: Option<&'static str>,
    pub options: Vec<SearchOption>,
    pub marker: Option<Marker>,
    pub camera: Camera,
    pub workflow: WorkflowState,
    pub autocomplete_status: RequestStatus,
    pub place_details_status: RequestStatus,
    pub place_details: Option<PlaceDetails>,
}
