use axum::{extract::State, response::Response};
use serde::Deserialize;
use validator::Validate;

use super::get_screen::screen_response;
use crate::{
    types::{app_state::AppState, search_option::SearchOption},
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

#[derive(Validate, Deserialize)]
pub struct SelectPlacePayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub label: String,

    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub value: String,
}

pub async fn select_place(
    State(state): State<AppState>,
    ValidatedQuery(SelectPlacePayload { label, value }): ValidatedQuery<SelectPlacePayload>,
) -> Result<Response, AppError> {
    let view = state.with_screen(|screen| {
        screen.on_select(SearchOption::new(label, value));
        screen.view()
    })?;

    Ok(screen_response(view))
}
