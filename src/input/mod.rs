pub mod events;

pub use events::{PointerHandler, PointerMoveEvent};
