use std::sync::{Arc, Mutex};

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{
    config::Config,
    routes::apply_routes,
    screen::{
        map_screen::{MapScreen, INITIAL_REGION},
        map_widget::Camera,
    },
    services::{
        maps_client::{
            http_client::HttpClient,
            maps_service::{MapsService, MapsServiceConfig},
            types::maps_service_error::MapsServiceError,
        },
        request_orchestrator::RequestOrchestrator,
    },
    state::store::Store,
    types::app_state::AppState,
};

/// Wires the session together: one store, one orchestrator, one screen.
pub fn gen_app(config: &Config) -> Result<Router, MapsServiceError> {
    let maps_service = MapsService::new(
        MapsServiceConfig {
            api_key: config.maps_api_key.clone(),
            host: config.maps_host.clone(),
        },
        HttpClient::new(config.http.clone())?,
    );

    let store = Store::default();
    let orchestrator = Arc::new(RequestOrchestrator::new(
        Arc::new(maps_service),
        store.clone(),
        config.abort_superseded_requests,
    ));
    let screen = Arc::new(Mutex::new(MapScreen::new(
        orchestrator,
        store.clone(),
        Camera::new(INITIAL_REGION),
    )));

    spawn_screen_sync(&store, screen.clone());
    info!("Session ready, places host {}", config.maps_host);

    let state = AppState { screen };

    Ok(apply_routes(Router::new())
        .route("/", get(root))
        .layer(CorsLayer::new())
        .with_state(state))
}

// Re-render the screen whenever the store changes.
fn spawn_screen_sync(store: &Store, screen: Arc<Mutex<MapScreen<Camera>>>) {
    let mut rx = store.subscribe();

    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if !sync_screen(&screen) {
                break;
            }
        }
    });
}

fn sync_screen(screen: &Mutex<MapScreen<Camera>>) -> bool {
    match screen.lock() {
        Ok(mut screen) => {
            screen.sync();
            true
        }
        Err(_) => {
            error!("Screen lock poisoned, stopping sync");
            false
        }
    }
}

async fn root() -> &'static str {
    "place-finder"
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub google_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    let google_server = mockito::Server::new_async().await;
    let host = google_server.url();

    let config = Config::from_lookup(|name| match name {
        "GOOGLE_MAPS_API_KEY" => Some("test-key".to_string()),
        "GOOGLE_MAPS_HOST" => Some(host.clone()),
        "HTTP_MAX_RETRIES" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();

    MockApp {
        app: gen_app(&config).unwrap(),
        google_server,
    }
}
