pub mod shared_state;
pub mod store;
