use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, Instrument};

use crate::{
    services::maps_client::maps_service::PlacesApi,
    state::{shared_state::RequestStatus, store::Store},
    types::search_option::SearchOption,
};

use latest_wins::{LatestWins, Ticket};

#[cfg(test)]
pub mod fake_places_api;
pub mod latest_wins;

/// A place-details request in flight.
pub struct PendingDetails {
    pub seq: u64,
    pub handle: JoinHandle<()>,
}

/// Turns search triggers into places API calls and publishes their results
/// into the [`Store`]. Each trigger kind keeps its own latest-wins sequence,
/// so an autocomplete never invalidates a place-details request or the other
/// way round.
pub struct RequestOrchestrator {
    api: Arc<dyn PlacesApi>,
    store: Store,
    autocomplete: LatestWins,
    place_details: LatestWins,
}

impl RequestOrchestrator {
    pub fn new(api: Arc<dyn PlacesApi>, store: Store, abort_superseded: bool) -> Self {
        Self {
            api,
            store,
            autocomplete: LatestWins::new(abort_superseded),
            place_details: LatestWins::new(abort_superseded),
        }
    }

    /// Starts an autocomplete for `text`. Empty text clears the results
    /// before returning and makes no request.
    pub fn dispatch_autocomplete(self: &Arc<Self>, text: &str) -> Option<JoinHandle<()>> {
        // Issued before the write, so any older request that commits from
        // here on is already stale.
        let ticket = self.autocomplete.issue();
        self.store.update_if(|state| {
            if !self.autocomplete.is_current(&ticket) {
                return false;
            }
            if text.is_empty() {
                state.set_auto_complete_results(Vec::new());
                state.set_autocomplete_status(RequestStatus::Idle);
            } else {
                state.set_autocomplete_status(RequestStatus::Loading);
            }
            true
        });

        if text.is_empty() {
            debug!("Cleared autocomplete results");
            return None;
        }

        let this = Arc::clone(self);
        let text = text.to_string();
        Some(tokio::spawn(
            async move { this.run_autocomplete(ticket, text).await }.in_current_span(),
        ))
    }

    /// Starts a place-details request. The returned sequence number is the
    /// one its response will carry in the store.
    pub fn dispatch_place_details(self: &Arc<Self>, place_id: &str) -> PendingDetails {
        let ticket = self.place_details.issue();
        let seq = ticket.seq();
        self.store.update_if(|state| {
            if !self.place_details.is_current(&ticket) {
                return false;
            }
            state.set_place_details_status(RequestStatus::Loading);
            true
        });

        let this = Arc::clone(self);
        let place_id = place_id.to_string();
        let handle = tokio::spawn(
            async move { this.run_place_details(ticket, place_id).await }.in_current_span(),
        );

        PendingDetails { seq, handle }
    }

    async fn run_autocomplete(&self, ticket: Ticket, text: String) {
        let response = tokio::select! {
            _ = ticket.superseded() => {
                debug!("Autocomplete for {:?} superseded, dropping request", text);
                return;
            }
            response = self.api.autocomplete(&text) => response,
        };

        let (results, status) = match response {
            Ok(body) => (
                body.predictions
                    .unwrap_or_default()
                    .into_iter()
                    .map(SearchOption::from)
                    .collect::<Vec<_>>(),
                RequestStatus::Ready,
            ),
            Err(e) => {
                error!("Failed to fetch autocomplete for {:?}: {}", text, e);
                (
                    Vec::new(),
                    RequestStatus::Failed {
                        message: e.to_string(),
                    },
                )
            }
        };

        let applied = self.store.update_if(|state| {
            if !self.autocomplete.is_current(&ticket) {
                return false;
            }
            state.set_auto_complete_results(results);
            state.set_autocomplete_status(status);
            true
        });

        if !applied {
            debug!("Discarding stale autocomplete result for {:?}", text);
        }
    }

    async fn run_place_details(&self, ticket: Ticket, place_id: String) {
        let response = tokio::select! {
            _ = ticket.superseded() => {
                debug!("Place details for {} superseded, dropping request", place_id);
                return;
            }
            response = self.api.place_details(&place_id) => response,
        };

        let applied = match response {
            Ok(body) => self.store.update_if(|state| {
                if !self.place_details.is_current(&ticket) {
                    return false;
                }
                state.set_place_details(body.result, ticket.seq());
                state.set_place_details_status(RequestStatus::Ready);
                true
            }),
            Err(e) => {
                error!("Failed to fetch place details for {}: {}", place_id, e);
                self.store.update_if(|state| {
                    if !self.place_details.is_current(&ticket) {
                        return false;
                    }
                    state.set_place_details_status(RequestStatus::Failed {
                        message: e.to_string(),
                    });
                    true
                })
            }
        };

        if !applied {
            debug!("Discarding stale place details for {}", place_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tracing_test::traced_test;

    use super::{
        fake_places_api::{details, predictions, FakePlacesApi},
        *,
    };
    use crate::services::maps_client::types::maps_service_error::MapsServiceError;

    fn gen_orchestrator(abort_superseded: bool) -> (Arc<RequestOrchestrator>, Arc<FakePlacesApi>, Store) {
        let api = Arc::new(FakePlacesApi::default());
        let store = Store::default();
        let orchestrator = Arc::new(RequestOrchestrator::new(
            api.clone(),
            store.clone(),
            abort_superseded,
        ));
        (orchestrator, api, store)
    }

    fn labels(store: &Store) -> Vec<String> {
        store.read(|s| {
            s.auto_complete_results()
                .iter()
                .map(|o| o.label.clone())
                .collect()
        })
    }

    #[tokio::test]
    async fn writes_predictions_as_search_options() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        api.gate_autocomplete("Paris")
            .send(Ok(predictions(&[("Paris, France", "p1")])))
            .unwrap();

        orchestrator
            .dispatch_autocomplete("Paris")
            .unwrap()
            .await
            .unwrap();

        let state = store.snapshot();
        assert_eq!(
            state.auto_complete_results(),
            &[SearchOption::new("Paris, France", "p1")]
        );
        assert_eq!(state.auto_complete_results()[0].label, "Paris, France");
        assert_eq!(state.autocomplete_status(), &RequestStatus::Ready);
    }

    #[tokio::test]
    #[traced_test]
    async fn late_completion_of_older_request_is_discarded() {
        let (orchestrator, api, store) = gen_orchestrator(false);
        let gate_a = api.gate_autocomplete("Par");
        let gate_b = api.gate_autocomplete("Paris");

        let handle_a = orchestrator.dispatch_autocomplete("Par").unwrap();
        let handle_b = orchestrator.dispatch_autocomplete("Paris").unwrap();

        gate_b
            .send(Ok(predictions(&[("Paris, France", "p1")])))
            .unwrap();
        handle_b.await.unwrap();
        gate_a
            .send(Ok(predictions(&[("Parma, Italy", "p2"), ("Paro, Bhutan", "p3")])))
            .unwrap();
        handle_a.await.unwrap();

        assert_eq!(labels(&store), vec!["Paris, France"]);
        assert_eq!(
            api.calls(),
            vec!["autocomplete:Par".to_string(), "autocomplete:Paris".to_string()]
        );
        assert!(logs_contain("Discarding stale autocomplete result"));
    }

    #[tokio::test]
    async fn superseded_request_is_aborted_when_enabled() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        let _gate_a = api.gate_autocomplete("Par");
        let gate_b = api.gate_autocomplete("Paris");

        let handle_a = orchestrator.dispatch_autocomplete("Par").unwrap();
        let handle_b = orchestrator.dispatch_autocomplete("Paris").unwrap();

        // The older task finishes without its gate ever being released.
        handle_a.await.unwrap();
        gate_b
            .send(Ok(predictions(&[("Paris, France", "p1")])))
            .unwrap();
        handle_b.await.unwrap();

        assert_eq!(labels(&store), vec!["Paris, France"]);
    }

    #[tokio::test]
    async fn empty_text_clears_synchronously_without_request() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        store.update(|s| s.set_auto_complete_results(vec![SearchOption::new("old", "o")]));

        let handle = orchestrator.dispatch_autocomplete("");

        assert!(handle.is_none());
        assert!(store.read(|s| s.auto_complete_results().is_empty()));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn clearing_discards_in_flight_request() {
        let (orchestrator, api, store) = gen_orchestrator(false);
        let gate = api.gate_autocomplete("Pa");

        let handle = orchestrator.dispatch_autocomplete("Pa").unwrap();
        orchestrator.dispatch_autocomplete("");
        gate.send(Ok(predictions(&[("Panama", "p9")]))).unwrap();
        handle.await.unwrap();

        assert!(labels(&store).is_empty());
    }

    #[tokio::test]
    async fn failed_autocomplete_clears_results() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        store.update(|s| s.set_auto_complete_results(vec![SearchOption::new("old", "o")]));
        api.gate_autocomplete("Paris")
            .send(Err(MapsServiceError::NetworkFailure("offline".into())))
            .unwrap();

        orchestrator
            .dispatch_autocomplete("Paris")
            .unwrap()
            .await
            .unwrap();

        let state = store.snapshot();
        assert!(state.auto_complete_results().is_empty());
        assert!(matches!(
            state.autocomplete_status(),
            RequestStatus::Failed { message } if message.contains("offline")
        ));
    }

    #[tokio::test]
    async fn response_without_predictions_gives_empty_results() {
        let (orchestrator, _api, store) = gen_orchestrator(true);
        store.update(|s| s.set_auto_complete_results(vec![SearchOption::new("old", "o")]));

        // No gate registered: the fake answers with an empty body.
        orchestrator
            .dispatch_autocomplete("Paris")
            .unwrap()
            .await
            .unwrap();

        assert!(labels(&store).is_empty());
    }

    #[tokio::test]
    async fn place_details_replace_previous_result() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        api.gate_place_details("p1")
            .send(Ok(details(json!({
                "name": "Paris",
                "geometry": {"location": {"lat": 48.85, "lng": 2.35}}
            }))))
            .unwrap();

        let pending = orchestrator.dispatch_place_details("p1");
        assert_eq!(pending.seq, 1);
        pending.handle.await.unwrap();

        let state = store.snapshot();
        let location = state.place_details().unwrap().geometry.as_ref().unwrap().location;
        assert_eq!((location.lat, location.lng), (48.85, 2.35));
        assert_eq!(state.place_details_seq(), 1);
        assert_eq!(state.place_details_status(), &RequestStatus::Ready);
        assert_eq!(api.calls(), vec!["details:p1".to_string()]);
    }

    #[tokio::test]
    async fn failed_place_details_leave_state_unchanged() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        store.update(|s| {
            s.set_place_details(Some(
                serde_json::from_value(json!({"name": "Old"})).unwrap(),
            ), 0)
        });
        api.gate_place_details("p1")
            .send(Err(MapsServiceError::MalformedResponse("bad json".into())))
            .unwrap();

        orchestrator.dispatch_place_details("p1").handle.await.unwrap();

        let state = store.snapshot();
        assert_eq!(
            state.place_details().unwrap().extra.get("name"),
            Some(&json!("Old"))
        );
        assert_eq!(state.place_details_seq(), 0);
        assert!(matches!(
            state.place_details_status(),
            RequestStatus::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn stale_place_details_are_discarded() {
        let (orchestrator, api, store) = gen_orchestrator(false);
        let gate_1 = api.gate_place_details("p1");
        let gate_2 = api.gate_place_details("p2");

        let handle_1 = orchestrator.dispatch_place_details("p1").handle;
        let pending_2 = orchestrator.dispatch_place_details("p2");

        gate_2.send(Ok(details(json!({"name": "Second"})))).unwrap();
        pending_2.handle.await.unwrap();
        gate_1.send(Ok(details(json!({"name": "First"})))).unwrap();
        handle_1.await.unwrap();

        assert_eq!(store.read(|s| s.place_details_seq()), pending_2.seq);

        assert_eq!(
            store.read(|s| s.place_details().unwrap().extra.get("name").cloned()),
            Some(json!("Second"))
        );
    }

    #[tokio::test]
    async fn triggers_do_not_cancel_each_other() {
        let (orchestrator, api, store) = gen_orchestrator(true);
        let details_gate = api.gate_place_details("p1");
        let autocomplete_gate = api.gate_autocomplete("Lyon");

        let details_handle = orchestrator.dispatch_place_details("p1").handle;
        let autocomplete_handle = orchestrator.dispatch_autocomplete("Lyon").unwrap();

        autocomplete_gate
            .send(Ok(predictions(&[("Lyon, France", "p2")])))
            .unwrap();
        details_gate.send(Ok(details(json!({"name": "Paris"})))).unwrap();
        let (details_done, autocomplete_done) =
            futures::future::join(details_handle, autocomplete_handle).await;
        details_done.unwrap();
        autocomplete_done.unwrap();

        let state = store.snapshot();
        assert_eq!(state.auto_complete_results()[0].value, "p2");
        assert_eq!(
            state.place_details().unwrap().extra.get("name"),
            Some(&json!("Paris"))
        );
    }
}
