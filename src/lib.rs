pub mod app;
pub mod config;
pub mod routes;
pub mod screen;
pub mod services;
pub mod state;
pub mod types;
pub mod utils;
