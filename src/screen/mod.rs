pub mod map_screen;
pub mod map_widget;
pub mod view;
pub mod workflow;
