use serde::{Deserialize, Serialize};

use crate::core::constants::{PRIMARY_MOUNT_ID, SECONDARY_MOUNT_ID};

/// One of the (at most two) regions that host a map instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MountSlot {
    Primary,
    Secondary,
}

impl MountSlot {
    pub const ALL: [MountSlot; 2] = [MountSlot::Primary, MountSlot::Secondary];

    /// Stable index used for per-slot storage.
    pub fn index(self) -> usize {
        match self {
            MountSlot::Primary => 0,
            MountSlot::Secondary => 1,
        }
    }

    /// Default mount point id for hosts without their own naming.
    pub fn default_mount_id(self) -> &'static str {
        match self {
            MountSlot::Primary => PRIMARY_MOUNT_ID,
            MountSlot::Secondary => SECONDARY_MOUNT_ID,
        }
    }
}

impl std::fmt::Display for MountSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MountSlot::Primary => write!(f, "primary"),
            MountSlot::Secondary => write!(f, "secondary"),
        }
    }
}

/// How the shell arranges the mount regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotLayout {
    /// A single full-width region.
    FullWidth,
    /// Two regions side by side, primary on the left.
    SideBySide,
}

impl SlotLayout {
    /// CSS class list for DOM hosts.
    pub fn class_name(self) -> &'static str {
        match self {
            SlotLayout::FullWidth => "map-container",
            SlotLayout::SideBySide => "map-container split-view",
        }
    }

    /// Number of regions this layout shows.
    pub fn region_count(self) -> usize {
        match self {
            SlotLayout::FullWidth => 1,
            SlotLayout::SideBySide => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_are_distinct() {
        assert_eq!(MountSlot::Primary.index(), 0);
        assert_eq!(MountSlot::Secondary.index(), 1);
        assert_eq!(MountSlot::ALL.len(), 2);
    }

    #[test]
    fn test_layout_class_names() {
        assert_eq!(SlotLayout::FullWidth.class_name(), "map-container");
        assert_eq!(SlotLayout::SideBySide.class_name(), "map-container split-view");
        assert_eq!(SlotLayout::SideBySide.region_count(), 2);
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(MountSlot::Primary.to_string(), "primary");
        assert_eq!(MountSlot::Secondary.default_mount_id(), "map2");
    }
}
