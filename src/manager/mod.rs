//! Reconciles live map instances against the view state.
//!
//! Each slot owns at most one map, one pointer interaction and one overlay
//! layer, plus an overlay feature that outlives them all. A pass disposes
//! every live instance before creating any new one, so no pointer event can
//! reach a half-built set and no listener is registered twice.

mod slot;

pub use slot::SlotResources;

use instant::Instant;

use crate::{
    core::{
        config::{CoordinatorConfig, OverlayStrategy},
        slot::MountSlot,
        view_state::ViewState,
    },
    engine::{LayerHandle, MapEngine, MapHandle, MapSpec, OverlayLayerSpec},
    input::events::PointerHandler,
    mount::{MountPoint, MountRegistry},
    overlay::{feature::OverlayFeature, sync::PointerSync},
    Result,
};

/// What a reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Slots whose instances were torn down
    pub disposed: Vec<MountSlot>,
    /// Slots that received a new instance
    pub created: Vec<MountSlot>,
    /// Desired slots left without an instance (not mounted, or the engine
    /// refused); retried on the next pass
    pub skipped: Vec<MountSlot>,
    /// Slots whose overlay visibility was flipped in place
    pub restyled: Vec<MountSlot>,
}

impl ReconcileReport {
    pub fn rebuilt(&self) -> bool {
        !self.disposed.is_empty() || !self.created.is_empty()
    }
}

pub struct MapInstanceManager<E: MapEngine> {
    engine: E,
    config: CoordinatorConfig,
    slots: [SlotResources; 2],
    handler: PointerHandler,
    applied: Option<ViewState>,
}

impl<E: MapEngine> MapInstanceManager<E> {
    pub fn new(engine: E, config: CoordinatorConfig) -> Self {
        let slots = [SlotResources::new(), SlotResources::new()];
        let handler = PointerSync::new(slots.iter().map(|s| &s.feature)).handler();

        Self {
            engine,
            config,
            slots,
            handler,
            applied: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// State the live set was last reconciled against.
    pub fn applied_state(&self) -> Option<ViewState> {
        self.applied
    }

    /// The handler registered on every live interaction.
    pub fn pointer_handler(&self) -> PointerHandler {
        self.handler.clone()
    }

    pub fn feature(&self, slot: MountSlot) -> &OverlayFeature {
        &self.slots[slot.index()].feature
    }

    pub fn map_handle(&self, slot: MountSlot) -> Option<MapHandle> {
        self.slots[slot.index()].map
    }

    pub fn overlay_layer(&self, slot: MountSlot) -> Option<LayerHandle> {
        self.slots[slot.index()].overlay_layer
    }

    pub fn mount_point(&self, slot: MountSlot) -> Option<&MountPoint> {
        self.slots[slot.index()].mount.as_ref()
    }

    pub fn is_live(&self, slot: MountSlot) -> bool {
        self.slots[slot.index()].is_live()
    }

    pub fn live_slots(&self) -> Vec<MountSlot> {
        MountSlot::ALL
            .into_iter()
            .filter(|slot| self.is_live(*slot))
            .collect()
    }

    /// True if every slot `state` wants has a live instance.
    pub fn is_complete_for(&self, state: ViewState) -> bool {
        state.desired_slots().iter().all(|slot| self.is_live(*slot))
    }

    /// Brings the live set in line with `state`.
    pub fn reconcile(&mut self, state: ViewState, mounts: &dyn MountRegistry) -> ReconcileReport {
        let started = Instant::now();

        let report = if self.can_restyle(state, mounts) {
            self.restyle(state)
        } else {
            self.rebuild(state, mounts)
        };
        self.applied = Some(state);

        log::debug!(
            "reconciled split={} overlay={} in {:?}: disposed {:?}, created {:?}, \
             skipped {:?}, restyled {:?}",
            state.split_view,
            state.overlay_visible,
            started.elapsed(),
            report.disposed,
            report.created,
            report.skipped,
            report.restyled
        );
        report
    }

    /// Only overlay visibility changed, every instance is already there and
    /// still bound to the mount point the registry reports.
    fn can_restyle(&self, state: ViewState, mounts: &dyn MountRegistry) -> bool {
        self.config.overlay_strategy == OverlayStrategy::ToggleVisibility
            && self.applied.is_some_and(|applied| {
                applied.split_view == state.split_view
                    && applied.overlay_visible != state.overlay_visible
            })
            && self.live_slots() == state.desired_slots()
            && state
                .desired_slots()
                .iter()
                .all(|slot| self.slots[slot.index()].mount == mounts.mount_point(*slot))
    }

    fn restyle(&mut self, state: ViewState) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for slot in state.desired_slots() {
            let resources = &self.slots[slot.index()];
            if let (Some(map), Some(layer)) = (resources.map, resources.overlay_layer) {
                self.engine.set_layer_visible(map, layer, state.overlay_visible);
                report.restyled.push(*slot);
            }
        }
        report
    }

    fn rebuild(&mut self, state: ViewState, mounts: &dyn MountRegistry) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        // Old set goes away completely before anything new is registered.
        for slot in MountSlot::ALL {
            if self.teardown_slot(slot) {
                report.disposed.push(slot);
            }
        }

        for &slot in state.desired_slots() {
            let Some(mount) = mounts.mount_point(slot) else {
                log::debug!("{} slot not mounted yet, deferring", slot);
                report.skipped.push(slot);
                continue;
            };

            match self.build_slot(slot, mount, state) {
                Ok(()) => report.created.push(slot),
                Err(e) => {
                    log::warn!("failed to create {} map instance: {}", slot, e);
                    self.teardown_slot(slot);
                    report.skipped.push(slot);
                }
            }
        }

        report
    }

    fn build_slot(&mut self, slot: MountSlot, mount: MountPoint, state: ViewState) -> Result<()> {
        let spec = MapSpec {
            mount: mount.clone(),
            view: self.config.view,
            base_tiles: self.config.base_tiles.clone(),
        };

        let map = self.engine.create_map(&spec)?;
        let resources = &mut self.slots[slot.index()];
        resources.map = Some(map);
        resources.mount = Some(mount);

        let attach_overlay = match self.config.overlay_strategy {
            OverlayStrategy::Attach => state.overlay_visible,
            OverlayStrategy::ToggleVisibility => true,
        };
        if attach_overlay {
            let layer = self.engine.add_overlay_layer(
                map,
                OverlayLayerSpec {
                    feature: self.slots[slot.index()].feature.clone(),
                    style: self.config.overlay,
                    visible: state.overlay_visible,
                },
            )?;
            self.slots[slot.index()].overlay_layer = Some(layer);
        }

        let interaction = self.engine.add_interaction(map, self.handler.clone())?;
        self.slots[slot.index()].interaction = Some(interaction);
        Ok(())
    }

    /// Releases everything `slot` holds except its overlay feature. Returns
    /// true if anything was released; calling it again is a no-op.
    pub fn teardown_slot(&mut self, slot: MountSlot) -> bool {
        let resources = &mut self.slots[slot.index()];
        let interaction = resources.interaction.take();
        let map = resources.map.take();
        resources.overlay_layer = None;
        resources.mount = None;

        if let Some(interaction) = interaction {
            self.engine.dispose_interaction(interaction);
        }
        if let Some(map) = map {
            self.engine.dispose_map(map);
        }
        interaction.is_some() || map.is_some()
    }

    /// Tears down every slot. Used on unmount and by `Drop`.
    pub fn dispose_all(&mut self) -> Vec<MountSlot> {
        let disposed: Vec<_> = MountSlot::ALL
            .into_iter()
            .filter(|slot| self.teardown_slot(*slot))
            .collect();
        self.applied = None;
        if !disposed.is_empty() {
            log::debug!("disposed all map instances: {:?}", disposed);
        }
        disposed
    }
}

impl<E: MapEngine> Drop for MapInstanceManager<E> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::Point,
        engine::{headless::EngineEvent, HeadlessEngine},
        mount::MountTable,
    };
    use std::rc::Rc;

    fn manager(strategy: OverlayStrategy) -> MapInstanceManager<HeadlessEngine> {
        MapInstanceManager::new(
            HeadlessEngine::new(),
            CoordinatorConfig::default().with_overlay_strategy(strategy),
        )
    }

    #[test]
    fn test_single_view_creates_primary_only() {
        let mut manager = manager(OverlayStrategy::Attach);
        let report = manager.reconcile(ViewState::default(), &MountTable::with_defaults());

        assert_eq!(report.created, vec![MountSlot::Primary]);
        assert!(report.disposed.is_empty());
        assert_eq!(manager.live_slots(), vec![MountSlot::Primary]);
        assert_eq!(manager.engine().live_map_count(), 1);
        assert_eq!(manager.engine().live_interaction_count(), 1);
        assert!(manager.overlay_layer(MountSlot::Primary).is_none());
    }

    #[test]
    fn test_missing_mount_is_deferred() {
        let mut manager = manager(OverlayStrategy::Attach);
        let mut mounts = MountTable::new();
        mounts.mount(MountSlot::Primary, MountPoint::new("map1"));

        let split = ViewState::new(true, false);
        let report = manager.reconcile(split, &mounts);
        assert_eq!(report.skipped, vec![MountSlot::Secondary]);
        assert!(!manager.is_complete_for(split));

        mounts.mount(MountSlot::Secondary, MountPoint::new("map2"));
        let report = manager.reconcile(split, &mounts);
        assert_eq!(report.created, vec![MountSlot::Primary, MountSlot::Secondary]);
        assert!(manager.is_complete_for(split));
        assert_eq!(
            manager.mount_point(MountSlot::Secondary),
            Some(&MountPoint::new("map2"))
        );
    }

    #[test]
    fn test_disposal_precedes_creation() {
        let mut manager = manager(OverlayStrategy::Attach);
        let mounts = MountTable::with_defaults();
        manager.reconcile(ViewState::new(true, false), &mounts);
        manager.engine_mut().take_events();

        manager.reconcile(ViewState::new(true, true), &mounts);
        let events = manager.engine().events();
        let last_dispose = events
            .iter()
            .rposition(|e| matches!(e, EngineEvent::MapDisposed { .. }))
            .unwrap();
        let first_create = events
            .iter()
            .position(|e| matches!(e, EngineEvent::MapCreated { .. }))
            .unwrap();
        assert!(last_dispose < first_create);
        assert_eq!(manager.engine().peak_live_maps(), 2);
    }

    #[test]
    fn test_engine_failure_skips_slot() {
        let mut manager = manager(OverlayStrategy::Attach);
        manager.engine_mut().fail_next_create();

        let report = manager.reconcile(ViewState::new(true, false), &MountTable::with_defaults());
        assert_eq!(report.skipped, vec![MountSlot::Primary]);
        assert_eq!(report.created, vec![MountSlot::Secondary]);
        assert_eq!(manager.engine().live_map_count(), 1);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut manager = manager(OverlayStrategy::Attach);
        manager.reconcile(ViewState::default(), &MountTable::with_defaults());

        assert!(manager.teardown_slot(MountSlot::Primary));
        assert!(!manager.teardown_slot(MountSlot::Primary));
        assert!(!manager.teardown_slot(MountSlot::Secondary));
        assert_eq!(manager.engine().live_map_count(), 0);
        assert_eq!(manager.engine().live_interaction_count(), 0);
    }

    #[test]
    fn test_features_survive_rebuilds() {
        let mut manager = manager(OverlayStrategy::Attach);
        let mounts = MountTable::with_defaults();
        manager.reconcile(ViewState::new(true, true), &mounts);
        manager.feature(MountSlot::Primary).set_coordinate(Point::new(3.0, 4.0));

        manager.reconcile(ViewState::new(true, false), &mounts);
        manager.reconcile(ViewState::new(true, true), &mounts);

        let map = manager.map_handle(MountSlot::Primary).unwrap();
        let layer = manager.overlay_layer(MountSlot::Primary).unwrap();
        let attached = manager.engine().overlay_feature(map, layer).unwrap();
        assert!(attached.ptr_eq(manager.feature(MountSlot::Primary)));
        assert_eq!(attached.coordinate(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_toggle_visibility_restyles_in_place() {
        let mut manager = manager(OverlayStrategy::ToggleVisibility);
        let mounts = MountTable::with_defaults();
        manager.reconcile(ViewState::new(true, false), &mounts);
        let before = manager.map_handle(MountSlot::Secondary);

        let report = manager.reconcile(ViewState::new(true, true), &mounts);
        assert!(!report.rebuilt());
        assert_eq!(report.restyled, vec![MountSlot::Primary, MountSlot::Secondary]);
        assert_eq!(manager.map_handle(MountSlot::Secondary), before);

        let map = before.unwrap();
        assert_eq!(manager.engine().visible_overlay_count(map), 1);
        assert_eq!(manager.engine().overlay_layers(map).len(), 1);
    }

    #[test]
    fn test_moved_mount_rebuilds_under_either_strategy() {
        for strategy in [OverlayStrategy::Attach, OverlayStrategy::ToggleVisibility] {
            let mut manager = manager(strategy);
            let mut mounts = MountTable::with_defaults();
            let state = ViewState::new(true, true);
            manager.reconcile(state, &mounts);

            mounts.mount(MountSlot::Primary, MountPoint::new("moved"));
            let report = manager.reconcile(state, &mounts);
            assert!(report.restyled.is_empty(), "{:?}", strategy);
            assert_eq!(report.created, vec![MountSlot::Primary, MountSlot::Secondary]);

            let map = manager.map_handle(MountSlot::Primary).unwrap();
            let spec = manager.engine().map_spec(map).unwrap();
            assert_eq!(spec.mount, MountPoint::new("moved"));
            assert_eq!(manager.engine().visible_overlay_count(map), 1);
        }
    }

    #[test]
    fn test_unchanged_overlay_does_not_restyle() {
        let mut manager = manager(OverlayStrategy::ToggleVisibility);
        let mounts = MountTable::with_defaults();
        let state = ViewState::new(true, false);
        manager.reconcile(state, &mounts);

        let report = manager.reconcile(state, &mounts);
        assert!(report.restyled.is_empty());
        assert!(report.rebuilt());
        assert_eq!(manager.applied_state(), Some(state));
    }

    #[test]
    fn test_every_interaction_shares_one_handler() {
        let mut manager = manager(OverlayStrategy::Attach);
        manager.reconcile(ViewState::new(true, true), &MountTable::with_defaults());

        let shared = manager.pointer_handler();
        for slot in MountSlot::ALL {
            let map = manager.map_handle(slot).unwrap();
            let handlers = manager.engine().handlers_on(map);
            assert_eq!(handlers.len(), 1);
            assert!(Rc::ptr_eq(&handlers[0], &shared));
        }

        manager.dispose_all();
        assert_eq!(manager.applied_state(), None);
    }

    #[test]
    fn test_drop_disposes_everything() {
        use std::cell::RefCell;

        // Engine wrapper that outlives the manager so the count can be read.
        struct Shared(Rc<RefCell<HeadlessEngine>>);

        impl MapEngine for Shared {
            fn create_map(&mut self, spec: &MapSpec) -> Result<MapHandle> {
                self.0.borrow_mut().create_map(spec)
            }
            fn add_overlay_layer(
                &mut self,
                map: MapHandle,
                layer: OverlayLayerSpec,
            ) -> Result<LayerHandle> {
                self.0.borrow_mut().add_overlay_layer(map, layer)
            }
            fn set_layer_visible(&mut self, map: MapHandle, layer: LayerHandle, visible: bool) {
                self.0.borrow_mut().set_layer_visible(map, layer, visible)
            }
            fn add_interaction(
                &mut self,
                map: MapHandle,
                handler: PointerHandler,
            ) -> Result<crate::engine::InteractionHandle> {
                self.0.borrow_mut().add_interaction(map, handler)
            }
            fn dispose_interaction(&mut self, interaction: crate::engine::InteractionHandle) {
                self.0.borrow_mut().dispose_interaction(interaction)
            }
            fn dispose_map(&mut self, map: MapHandle) {
                self.0.borrow_mut().dispose_map(map)
            }
        }

        let engine = Rc::new(RefCell::new(HeadlessEngine::new()));
        {
            let mut manager =
                MapInstanceManager::new(Shared(engine.clone()), CoordinatorConfig::default());
            manager.reconcile(ViewState::new(true, true), &MountTable::with_defaults());
            assert_eq!(engine.borrow().live_map_count(), 2);
        }
        assert_eq!(engine.borrow().live_map_count(), 0);
        assert_eq!(engine.borrow().live_interaction_count(), 0);
    }
}
