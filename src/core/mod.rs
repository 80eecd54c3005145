pub mod config;
pub mod constants;
pub mod geo;
pub mod slot;
pub mod view_state;
