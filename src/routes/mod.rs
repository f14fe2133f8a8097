use axum::{
    routing::{get, post},
    Router,
};

use crate::types::app_state::AppState;

pub mod get_screen;
pub mod select_place;
pub mod set_input_focus;
pub mod update_search_text;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route("/screen", get(get_screen::get_screen))
        .route(
            "/screen/search-text",
            post(update_search_text::update_search_text),
        )
        .route("/screen/select", post(select_place::select_place))
        .route("/screen/focus", post(set_input_focus::focus_input))
        .route("/screen/blur", post(set_input_focus::blur_input))
        .route("/screen/clear", post(set_input_focus::clear_input))
}
