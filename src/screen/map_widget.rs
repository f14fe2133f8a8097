use std::time::Duration;

use serde::Serialize;

use crate::utils::viewport::MapRegion;

/// The map component the screen drives.
pub trait MapWidget {
    fn animate_to_region(&mut self, region: MapRegion, duration: Duration);
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub region: MapRegion,
    pub duration_ms: u64,
}

/// Map state kept in process and handed to whichever client renders it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Camera {
    pub region: MapRegion,
    pub last_animation: Option<Animation>,
}

impl Camera {
    pub fn new(region: MapRegion) -> Self {
        Self {
            region,
            last_animation: None,
        }
    }
}

impl MapWidget for Camera {
    fn animate_to_region(&mut self, region: MapRegion, duration: Duration) {
        self.region = region;
        self.last_animation = Some(Animation {
            region,
            duration_ms: duration.as_millis() as u64,
        });
    }
}
