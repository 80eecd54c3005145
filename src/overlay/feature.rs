use std::{
    cell::Cell,
    rc::{Rc, Weak},
};

use crate::core::geo::Point;

/// Last known pointer position in map space.
///
/// Owned by its slot and outlives any number of map instances. Clones share
/// the same geometry; the engine holds one while the overlay layer is
/// attached so it can read the point on its own draw cycle.
#[derive(Debug, Clone, Default)]
pub struct OverlayFeature {
    geometry: Rc<Cell<Point>>,
}

impl OverlayFeature {
    pub fn new(initial: Point) -> Self {
        Self {
            geometry: Rc::new(Cell::new(initial)),
        }
    }

    pub fn coordinate(&self) -> Point {
        self.geometry.get()
    }

    pub fn set_coordinate(&self, coordinate: Point) {
        self.geometry.set(coordinate);
    }

    /// Non-owning reference for broadcast lists.
    pub fn downgrade(&self) -> WeakOverlayFeature {
        WeakOverlayFeature(Rc::downgrade(&self.geometry))
    }

    /// True if both handles refer to the same geometry.
    pub fn ptr_eq(&self, other: &OverlayFeature) -> bool {
        Rc::ptr_eq(&self.geometry, &other.geometry)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeakOverlayFeature(Weak<Cell<Point>>);

impl WeakOverlayFeature {
    pub fn upgrade(&self) -> Option<OverlayFeature> {
        self.0.upgrade().map(|geometry| OverlayFeature { geometry })
    }
}
