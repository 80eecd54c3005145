use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{core::geo::Point, mount::MountPoint};

/// A pointer move delivered by the engine to a slot's interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerMoveEvent {
    /// Mount point of the viewport that raised the event
    pub source: MountPoint,
    /// Pointer position in map space
    pub coordinate: Point,
    /// Pointer position in the viewport, if the engine knows it
    pub pixel: Option<Point>,
}

impl PointerMoveEvent {
    pub fn new(source: MountPoint, coordinate: Point) -> Self {
        Self {
            source,
            coordinate,
            pixel: None,
        }
    }

    pub fn with_pixel(mut self, pixel: Point) -> Self {
        self.pixel = Some(pixel);
        self
    }
}

/// Callback registered on pointer interactions. Single-threaded: engines call
/// it from the UI event loop.
pub type PointerHandler = Rc<dyn Fn(&PointerMoveEvent)>;
