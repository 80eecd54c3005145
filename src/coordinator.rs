//! Top-level split-view coordinator.
//!
//! Owns the view mode controller and the instance manager. Toggles mutate
//! the controller and immediately run a reconciliation pass against the
//! host's mount points, so a state change and its pass are atomic with
//! respect to later events. Hosts whose regions appear only after a render
//! call `commit` once the new layout is in place instead.

use crate::{
    core::{
        config::CoordinatorConfig,
        slot::{MountSlot, SlotLayout},
        view_state::{ControlSurface, ViewModeController, ViewState},
    },
    engine::MapEngine,
    manager::{MapInstanceManager, ReconcileReport},
    mount::MountRegistry,
    overlay::feature::OverlayFeature,
};

pub struct SplitViewCoordinator<E: MapEngine> {
    controller: ViewModeController,
    manager: MapInstanceManager<E>,
    /// Controller generation the live set was last reconciled against
    reconciled_generation: Option<u64>,
}

impl<E: MapEngine> SplitViewCoordinator<E> {
    pub fn new(engine: E, config: CoordinatorConfig) -> Self {
        Self {
            controller: ViewModeController::new(),
            manager: MapInstanceManager::new(engine, config),
            reconciled_generation: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.controller.state()
    }

    pub fn controls(&self) -> ControlSurface {
        self.controller.controls()
    }

    pub fn layout(&self) -> SlotLayout {
        self.controller.state().layout()
    }

    pub fn manager(&self) -> &MapInstanceManager<E> {
        &self.manager
    }

    pub fn engine(&self) -> &E {
        self.manager.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.manager.engine_mut()
    }

    pub fn feature(&self, slot: MountSlot) -> &OverlayFeature {
        self.manager.feature(slot)
    }

    /// Flips split view (clearing the overlay) and reconciles.
    pub fn toggle_split_view(&mut self, mounts: &dyn MountRegistry) -> ReconcileReport {
        self.controller.toggle_split_view();
        self.reconcile(mounts)
    }

    /// Flips the overlay and reconciles.
    pub fn toggle_overlay(&mut self, mounts: &dyn MountRegistry) -> ReconcileReport {
        self.controller.toggle_overlay();
        self.reconcile(mounts)
    }

    /// Runs a pass if the state changed since the last one or a desired slot
    /// is still missing its instance. Returns `None` when nothing was due.
    pub fn commit(&mut self, mounts: &dyn MountRegistry) -> Option<ReconcileReport> {
        let state = self.controller.state();
        let stale = self.reconciled_generation != Some(self.controller.generation());
        let pending_mount = !self.manager.is_complete_for(state)
            && state
                .desired_slots()
                .iter()
                .any(|slot| !self.manager.is_live(*slot) && mounts.is_mounted(*slot));

        (stale || pending_mount).then(|| self.reconcile(mounts))
    }

    /// Host-side mount changes (a region appeared or moved) force a pass.
    pub fn mount_changed(&mut self, mounts: &dyn MountRegistry) -> ReconcileReport {
        self.reconcile(mounts)
    }

    fn reconcile(&mut self, mounts: &dyn MountRegistry) -> ReconcileReport {
        let report = self.manager.reconcile(self.controller.state(), mounts);
        self.reconciled_generation = Some(self.controller.generation());
        report
    }

    /// Disposes every live instance. The coordinator stays usable; the next
    /// `commit` rebuilds.
    pub fn unmount(&mut self) {
        self.manager.dispose_all();
        self.reconciled_generation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::HeadlessEngine, mount::MountTable};

    #[test]
    fn test_commit_runs_once_per_change() {
        let mut coordinator =
            SplitViewCoordinator::new(HeadlessEngine::new(), CoordinatorConfig::default());
        let mounts = MountTable::with_defaults();

        assert!(coordinator.commit(&mounts).is_some());
        assert!(coordinator.commit(&mounts).is_none());
        assert_eq!(coordinator.engine().live_map_count(), 1);
    }

    #[test]
    fn test_commit_picks_up_late_mount() {
        let mut coordinator =
            SplitViewCoordinator::new(HeadlessEngine::new(), CoordinatorConfig::default());
        let mut mounts = MountTable::new();
        mounts.set_default_mounted(MountSlot::Primary, true);

        let report = coordinator.toggle_split_view(&mounts);
        assert_eq!(report.skipped, vec![MountSlot::Secondary]);
        assert!(coordinator.commit(&mounts).is_none());

        mounts.set_default_mounted(MountSlot::Secondary, true);
        let report = coordinator.commit(&mounts).unwrap();
        assert_eq!(report.created.len(), 2);
        assert_eq!(coordinator.engine().live_map_count(), 2);
    }

    #[test]
    fn test_unmount_then_commit_rebuilds() {
        let mut coordinator =
            SplitViewCoordinator::new(HeadlessEngine::new(), CoordinatorConfig::default());
        let mounts = MountTable::with_defaults();
        coordinator.toggle_split_view(&mounts);

        coordinator.unmount();
        assert_eq!(coordinator.engine().live_map_count(), 0);
        assert_eq!(coordinator.engine().live_interaction_count(), 0);

        coordinator.commit(&mounts).unwrap();
        assert_eq!(coordinator.engine().live_map_count(), 2);
    }

    #[test]
    fn test_controls_follow_state() {
        let mut coordinator =
            SplitViewCoordinator::new(HeadlessEngine::new(), CoordinatorConfig::default());
        let mounts = MountTable::with_defaults();
        assert_eq!(coordinator.controls().overlay_label, None);
        assert_eq!(coordinator.layout(), SlotLayout::FullWidth);

        coordinator.toggle_split_view(&mounts);
        assert_eq!(coordinator.controls().overlay_label, Some("Circle"));
        assert_eq!(coordinator.layout(), SlotLayout::SideBySide);
    }
}
