pub mod maps_client;
pub mod request_orchestrator;
