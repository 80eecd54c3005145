pub mod feature;
pub mod style;
pub mod sync;

pub use feature::{OverlayFeature, WeakOverlayFeature};
pub use style::{OverlayStyle, Rgba};
pub use sync::PointerSync;
