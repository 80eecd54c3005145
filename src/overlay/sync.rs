//! Cross-viewport cursor link.
//!
//! `PointerSync` holds non-owning references to every slot's overlay feature
//! and builds the one shared pointer handler that is registered on every live
//! interaction. A move in any viewport writes the same coordinate into all
//! features.

use std::rc::Rc;

use crate::{
    core::geo::Point,
    input::events::{PointerHandler, PointerMoveEvent},
    overlay::feature::{OverlayFeature, WeakOverlayFeature},
};

#[derive(Debug, Clone)]
pub struct PointerSync {
    targets: Rc<[WeakOverlayFeature]>,
}

impl PointerSync {
    pub fn new<'a>(features: impl IntoIterator<Item = &'a OverlayFeature>) -> Self {
        Self {
            targets: features.into_iter().map(OverlayFeature::downgrade).collect(),
        }
    }

    /// Writes `coordinate` into every feature still alive. Returns how many
    /// features were updated.
    pub fn broadcast(&self, coordinate: Point) -> usize {
        let mut updated = 0;
        for feature in self.targets.iter().filter_map(WeakOverlayFeature::upgrade) {
            feature.set_coordinate(coordinate);
            updated += 1;
        }
        updated
    }

    /// The shared handler. Every call to this returns a handle to a fresh
    /// closure over the same target list, so register one result everywhere.
    pub fn handler(&self) -> PointerHandler {
        let sync = self.clone();
        Rc::new(move |event: &PointerMoveEvent| {
            let updated = sync.broadcast(event.coordinate);
            log::trace!(
                "pointer move ({:.1}, {:.1}) from {} synced to {} features",
                event.coordinate.x,
                event.coordinate.y,
                event.source,
                updated
            );
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
