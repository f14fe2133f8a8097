use axum::{extract::State, response::Response};

use super::get_screen::screen_response;
use crate::{types::app_state::AppState, utils::app_error::AppError};

pub async fn focus_input(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state.with_screen(|screen| {
        screen.on_focus();
        screen.view()
    })?;

    Ok(screen_response(view))
}

pub async fn blur_input(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state.with_screen(|screen| {
        screen.on_blur();
        screen.view()
    })?;

    Ok(screen_response(view))
}

pub async fn clear_input(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state.with_screen(|screen| {
        screen.on_clear();
        screen.view()
    })?;

    Ok(screen_response(view))
}
