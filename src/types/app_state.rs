use std::sync::{Arc, Mutex};

use tracing::error;

use crate::{
    screen::{map_screen::MapScreen, map_widget::Camera},
    utils::app_error::AppError,
};

#[derive(Clone)]
pub struct AppState {
    pub screen: Arc<Mutex<MapScreen<Camera>>>,
}

impl AppState {
    /// Runs `f` with the session's screen locked.
    pub fn with_screen<R>(&self, f: impl FnOnce(&mut MapScreen<Camera>) -> R) -> Result<R, AppError> {
        let mut screen = self.screen.lock().map_err(|_| {
            error!("Screen lock poisoned");
            AppError::internal()
        })?;

        Ok(f(&mut screen))
    }
}
