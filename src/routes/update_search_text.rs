use axum::{extract::State, response::Response};
use serde::Deserialize;
use validator::Validate;

use super::get_screen::screen_response;
use crate::{
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

#[derive(Validate, Deserialize)]
pub struct UpdateSearchTextPayload {
    #[serde(default)]
    #[validate(length(max = 256, message = "Must be at most 256 characters"))]
    pub text: String,
}

pub async fn update_search_text(
    State(state): State<AppState>,
    ValidatedQuery(UpdateSearchTextPayload { text }): ValidatedQuery<UpdateSearchTextPayload>,
) -> Result<Response, AppError> {
    let view = state.with_screen(|screen| {
        screen.on_change_text(&text);
        screen.view()
    })?;

    Ok(screen_response(view))
}
