pub mod http_client;
pub mod maps_service;
pub mod query_builder;
pub mod types;
