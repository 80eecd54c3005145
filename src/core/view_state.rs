//! Two-flag view mode state machine.
//!
//! The controller owns `{split_view, overlay_visible}` and nothing else. Every
//! mutation bumps a generation counter; the coordinator compares generations
//! to decide when a reconciliation pass is due.

use serde::{Deserialize, Serialize};

use crate::core::{
    constants::{LABEL_MERGE, LABEL_SHOW_CURSOR, LABEL_SHOW_SPOTLIGHT, LABEL_SPLIT},
    slot::{MountSlot, SlotLayout},
};

const SINGLE: &[MountSlot] = &[MountSlot::Primary];
const SPLIT: &[MountSlot] = &[MountSlot::Primary, MountSlot::Secondary];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub split_view: bool,
    pub overlay_visible: bool,
}

impl ViewState {
    pub fn new(split_view: bool, overlay_visible: bool) -> Self {
        Self {
            split_view,
            overlay_visible,
        }
    }

    /// Slots that should host a live map instance in this state.
    pub fn desired_slots(&self) -> &'static [MountSlot] {
        if self.split_view {
            SPLIT
        } else {
            SINGLE
        }
    }

    pub fn wants(&self, slot: MountSlot) -> bool {
        self.desired_slots().contains(&slot)
    }

    pub fn layout(&self) -> SlotLayout {
        if self.split_view {
            SlotLayout::SideBySide
        } else {
            SlotLayout::FullWidth
        }
    }
}

/// What the shell should offer the user in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSurface {
    /// Label of the split/merge toggle, always shown.
    pub split_label: &'static str,
    /// Label of the overlay toggle; `None` while the view is not split.
    pub overlay_label: Option<&'static str>,
}

/// Holds and mutates the view mode. Read access only for everyone else.
#[derive(Debug, Clone, Default)]
pub struct ViewModeController {
    state: ViewState,
    generation: u64,
}

impl ViewModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Incremented on every toggle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Flips split view. Entering or leaving split view always clears the
    /// overlay.
    pub fn toggle_split_view(&mut self) -> ViewState {
        self.state.split_view = !self.state.split_view;
        self.state.overlay_visible = false;
        self.generation += 1;
        log::debug!(
            "split view toggled: split={} overlay={}",
            self.state.split_view,
            self.state.overlay_visible
        );
        self.state
    }

    /// Flips the overlay. Not rejected while single: the manager keeps every
    /// per-slot invariant for a lone primary instance too.
    pub fn toggle_overlay(&mut self) -> ViewState {
        self.state.overlay_visible = !self.state.overlay_visible;
        self.generation += 1;
        log::debug!(
            "overlay toggled: split={} overlay={}",
            self.state.split_view,
            self.state.overlay_visible
        );
        self.state
    }

    pub fn controls(&self) -> ControlSurface {
        let split_label = if self.state.split_view {
            LABEL_MERGE
        } else {
            LABEL_SPLIT
        };
        let overlay_label = self.state.split_view.then_some(if self.state.overlay_visible {
            LABEL_SHOW_CURSOR
        } else {
            LABEL_SHOW_SPOTLIGHT
        });

        ControlSurface {
            split_label,
            overlay_label,
        }
    }
}
