//! Attachment points for map instances.
//!
//! A mount point is wherever the host can place a map: a DOM element, an
//! egui region. The manager asks a `MountRegistry` for each desired slot on
//! every pass and skips slots that are not mounted yet.

#[cfg(feature = "wasm")]
pub mod web;

use serde::{Deserialize, Serialize};

use crate::{core::slot::MountSlot, prelude::HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountPoint {
    id: String,
}

impl MountPoint {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for MountPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Resolves the attachment point currently present for a slot.
pub trait MountRegistry {
    fn mount_point(&self, slot: MountSlot) -> Option<MountPoint>;

    fn is_mounted(&self, slot: MountSlot) -> bool {
        self.mount_point(slot).is_some()
    }
}

/// In-memory registry the host updates as regions appear and disappear.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    points: HashMap<MountSlot, MountPoint>,
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with both slots mounted under their default ids.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for slot in MountSlot::ALL {
            table.mount(slot, MountPoint::new(slot.default_mount_id()));
        }
        table
    }

    /// Returns the point previously mounted for `slot`, if any.
    pub fn mount(&mut self, slot: MountSlot, point: MountPoint) -> Option<MountPoint> {
        self.points.insert(slot, point)
    }

    pub fn unmount(&mut self, slot: MountSlot) -> Option<MountPoint> {
        self.points.remove(&slot)
    }

    /// Mounts or unmounts `slot` under its default id. Returns true if the
    /// table changed.
    pub fn set_default_mounted(&mut self, slot: MountSlot, mounted: bool) -> bool {
        match (mounted, self.points.contains_key(&slot)) {
            (true, false) => {
                self.mount(slot, MountPoint::new(slot.default_mount_id()));
                true
            }
            (false, true) => {
                self.unmount(slot);
                true
            }
            _ => false,
        }
    }
}

impl MountRegistry for MountTable {
    fn mount_point(&self, slot: MountSlot) -> Option<MountPoint> {
        self.points.get(&slot).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_table() {
        let mut table = MountTable::new();
        assert!(!table.is_mounted(MountSlot::Primary));

        assert!(table.mount(MountSlot::Primary, MountPoint::new("left")).is_none());
        assert_eq!(
            table.mount_point(MountSlot::Primary),
            Some(MountPoint::new("left"))
        );

        assert_eq!(
            table.unmount(MountSlot::Primary),
            Some(MountPoint::new("left"))
        );
        assert!(table.unmount(MountSlot::Primary).is_none());
    }

    #[test]
    fn test_default_mounts() {
        let table = MountTable::with_defaults();
        assert_eq!(table.mount_point(MountSlot::Secondary).unwrap().id(), "map2");

        let mut table = MountTable::new();
        assert!(table.set_default_mounted(MountSlot::Secondary, true));
        assert!(!table.set_default_mounted(MountSlot::Secondary, true));
        assert!(table.set_default_mounted(MountSlot::Secondary, false));
        assert!(!table.is_mounted(MountSlot::Secondary));
    }
}
