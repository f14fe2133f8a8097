use std::{sync::Arc, time::Duration};

use tracing::{debug, info};

use super::{
    map_widget::{Camera, MapWidget},
    view::{Marker, ScreenView},
    workflow::WorkflowState,
};
use crate::{
    services::request_orchestrator::RequestOrchestrator,
    state::store::Store,
    types::{place::Geometry, search_option::SearchOption},
    utils::viewport::{compute_region, MapRegion},
};

pub const RECENT_SEARCH_HEADER: &str = "Recent Search";
pub const MARKER_ID: &str = "selected-place";
pub const ANIMATION_DURATION: Duration = Duration::from_millis(600);
pub const INITIAL_REGION: MapRegion = MapRegion {
    latitude: 3.6305816393328616,
    longitude: 102.57744135741954,
    latitude_delta: 0.169042,
    longitude_delta: 25.92998,
};

/// The single search screen: a map, a search field and a suggestion list.
///
/// Holds only UI-local state. Search results, place details and recent
/// searches are read from the [`Store`] on every render.
pub struct MapScreen<M> {
    orchestrator: Arc<RequestOrchestrator>,
    store: Store,
    map: M,
    input: String,
    input_focused: bool,
    show_options: bool,
    marker: Option<Marker>,
    workflow: WorkflowState,
    awaiting_details: Option<u64>,
}

impl<M: MapWidget> MapScreen<M> {
    pub fn new(orchestrator: Arc<RequestOrchestrator>, store: Store, map: M) -> Self {
        Self {
            orchestrator,
            store,
            map,
            input: String::new(),
            input_focused: false,
            show_options: false,
            marker: None,
            workflow: WorkflowState::Idle,
            awaiting_details: None,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn workflow(&self) -> WorkflowState {
        self.workflow
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn on_change_text(&mut self, text: &str) {
        self.set_input(text);
        self.workflow = WorkflowState::on_text(text);
        self.sync();
    }

    pub fn on_focus(&mut self) {
        self.input_focused = true;
        self.show_options = true;
        self.sync();
    }

    pub fn on_blur(&mut self) {
        self.input_focused = false;
        self.show_options = false;
        self.sync();
    }

    pub fn on_clear(&mut self) {
        self.on_change_text("");
    }

    pub fn on_select(&mut self, option: SearchOption) {
        info!("Selected place {} ({})", option.label, option.value);

        self.input_focused = false;
        self.show_options = false;
        self.set_input(&option.label);
        self.marker = None;
        self.workflow = WorkflowState::Selected;

        // Only this request's response may move the map.
        let pending = self.orchestrator.dispatch_place_details(&option.value);
        self.awaiting_details = Some(pending.seq);

        self.store
            .update_if(|state| match remember_search(state.recent_searches(), &option) {
                Some(recent) => {
                    state.set_recent_searches(recent);
                    true
                }
                None => false,
            });
    }

    /// Applies store changes the screen reacts to. Safe to call at any time.
    pub fn sync(&mut self) {
        let awaiting = self.awaiting_details;
        let arrived = self.store.read(|s| match awaiting {
            Some(seq) if s.place_details_seq() == seq => {
                Some(s.place_details().and_then(|d| d.geometry.clone()))
            }
            _ => None,
        });

        if let Some(geometry) = arrived {
            self.awaiting_details = None;
            self.apply_geometry(geometry);
        }

        let has_options = !self.options().1.is_empty();
        self.workflow = self
            .workflow
            .with_suggestions_visible(self.show_options && has_options);
    }

    /// Suggestions to list, with the header to show above them.
    pub fn options(&self) -> (Option<&'static str>, Vec<SearchOption>) {
        self.store.read(|s| {
            if !s.auto_complete_results().is_empty() {
                (None, s.auto_complete_results().to_vec())
            } else if !s.recent_searches().is_empty() {
                (Some(RECENT_SEARCH_HEADER), s.recent_searches().to_vec())
            } else {
                (None, Vec::new())
            }
        })
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        // Completion is observed through the store.
        drop(self.orchestrator.dispatch_autocomplete(text));
    }

    fn apply_geometry(&mut self, geometry: Option<Geometry>) {
        let Some(geometry) = geometry else {
            debug!("Place details carry no geometry, leaving map unchanged");
            return;
        };

        self.marker = Some(Marker {
            id: MARKER_ID.to_string(),
            latitude: geometry.location.lat,
            longitude: geometry.location.lng,
        });

        match geometry.viewport {
            Some(viewport) => self.map.animate_to_region(
                compute_region(viewport.northeast, viewport.southwest),
                ANIMATION_DURATION,
            ),
            None => debug!("Place details carry no viewport, not moving the map"),
        }

        if self.workflow == WorkflowState::Selected {
            self.workflow = WorkflowState::MarkerPlaced;
        }
    }
}

impl MapScreen<Camera> {
    pub fn view(&self) -> ScreenView {
        let (options_header, options) = self.options();
        let state = self.store.snapshot();

        ScreenView {
            input: self.input.clone(),
            input_focused: self.input_focused,
            show_clear_button: self.input_focused && !self.input.is_empty(),
            show_options: self.show_options && !options.is_empty(),
            options_header,
            options,
            marker: self.marker.clone(),
            camera: self.map.clone(),
            workflow: self.workflow,
            autocomplete_status: state.autocomplete_status().clone(),
            place_details_status: state.place_details_status().clone(),
            place_details: state.place_details().cloned(),
        }
    }
}

/// Recent searches with `place` in front, or `None` when it is already listed.
pub fn remember_search(recent: &[SearchOption], place: &SearchOption) -> Option<Vec<SearchOption>> {
    if recent.contains(place) {
        return None;
    }

    let mut updated = Vec::with_capacity(recent.len() + 1);
    updated.push(place.clone());
    updated.extend_from_slice(recent);
    Some(updated)
}
