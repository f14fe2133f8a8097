pub mod app_state;
pub mod place;
pub mod search_option;
