use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{screen::view::ScreenView, types::app_state::AppState, utils::app_error::AppError};

#[derive(Serialize)]
pub struct ScreenResponse {
    pub data: ScreenView,
}

pub fn screen_response(data: ScreenView) -> Response {
    Json(ScreenResponse { data }).into_response()
}

pub async fn get_screen(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state.with_screen(|screen| {
        screen.sync();
        screen.view()
    })?;

    Ok(screen_response(view))
}
