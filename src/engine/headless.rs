//! In-memory engine that renders nothing and records everything.
//!
//! Used by tests, the headless demo and hosts that only need the lifecycle
//! bookkeeping. It tracks live and peak instance counts and keeps an ordered
//! log of every native call so ordering guarantees can be asserted.

use crate::{
    core::geo::Point,
    engine::{
        InteractionHandle, LayerHandle, MapEngine, MapHandle, MapSpec, OverlayLayerSpec,
    },
    input::events::{PointerHandler, PointerMoveEvent},
    mount::MountPoint,
    overlay::feature::OverlayFeature,
    prelude::HashMap,
    Result, TwinMapError,
};

/// One native call as seen by the headless engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    MapCreated { map: MapHandle, mount: MountPoint },
    LayerAdded { map: MapHandle, layer: LayerHandle, visible: bool },
    LayerVisibility { map: MapHandle, layer: LayerHandle, visible: bool },
    InteractionAdded { map: MapHandle, interaction: InteractionHandle },
    InteractionDisposed { interaction: InteractionHandle },
    MapDisposed { map: MapHandle },
}

struct HeadlessMap {
    spec: MapSpec,
    overlays: Vec<(LayerHandle, OverlayLayerSpec)>,
}

struct HeadlessInteraction {
    map: MapHandle,
    handler: PointerHandler,
    /// Cleared when the owning map is disposed first.
    attached: bool,
}

#[derive(Default)]
pub struct HeadlessEngine {
    next_id: u64,
    maps: HashMap<MapHandle, HeadlessMap>,
    interactions: HashMap<InteractionHandle, HeadlessInteraction>,
    events: Vec<EngineEvent>,
    peak_live_maps: usize,
    peak_live_interactions: usize,
    fail_next_create: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Makes the next `create_map` call fail once.
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    pub fn live_map_count(&self) -> usize {
        self.maps.len()
    }

    pub fn live_interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Highest number of simultaneously live maps since the last reset.
    pub fn peak_live_maps(&self) -> usize {
        self.peak_live_maps
    }

    pub fn peak_live_interactions(&self) -> usize {
        self.peak_live_interactions
    }

    pub fn reset_peaks(&mut self) {
        self.peak_live_maps = self.maps.len();
        self.peak_live_interactions = self.interactions.len();
    }

    pub fn is_live(&self, map: MapHandle) -> bool {
        self.maps.contains_key(&map)
    }

    pub fn maps_on(&self, mount: &MountPoint) -> Vec<MapHandle> {
        let mut maps: Vec<_> = self
            .maps
            .iter()
            .filter(|(_, m)| &m.spec.mount == mount)
            .map(|(handle, _)| *handle)
            .collect();
        maps.sort();
        maps
    }

    pub fn map_spec(&self, map: MapHandle) -> Option<&MapSpec> {
        self.maps.get(&map).map(|m| &m.spec)
    }

    /// Overlay layers attached to `map` with their visibility.
    pub fn overlay_layers(&self, map: MapHandle) -> Vec<(LayerHandle, bool)> {
        self.maps
            .get(&map)
            .map(|m| m.overlays.iter().map(|(h, l)| (*h, l.visible)).collect())
            .unwrap_or_default()
    }

    pub fn visible_overlay_count(&self, map: MapHandle) -> usize {
        self.overlay_layers(map)
            .into_iter()
            .filter(|(_, visible)| *visible)
            .count()
    }

    pub fn overlay_feature(&self, map: MapHandle, layer: LayerHandle) -> Option<OverlayFeature> {
        self.maps.get(&map).and_then(|m| {
            m.overlays
                .iter()
                .find(|(h, _)| *h == layer)
                .map(|(_, l)| l.feature.clone())
        })
    }

    /// Interactions currently receiving events from `map`.
    pub fn interactions_on(&self, map: MapHandle) -> usize {
        self.interactions
            .values()
            .filter(|i| i.attached && i.map == map)
            .count()
    }

    /// Handlers registered on the interactions attached to `map`.
    pub fn handlers_on(&self, map: MapHandle) -> Vec<PointerHandler> {
        self.interactions
            .values()
            .filter(|i| i.attached && i.map == map)
            .map(|i| i.handler.clone())
            .collect()
    }

    /// Delivers a pointer move to every interaction attached to `map`.
    /// Returns the number of handlers invoked.
    pub fn dispatch_pointer_move(&self, map: MapHandle, coordinate: Point) -> usize {
        let Some(source) = self.maps.get(&map).map(|m| m.spec.mount.clone()) else {
            return 0;
        };
        let handlers = self.handlers_on(map);

        let event = PointerMoveEvent::new(source, coordinate);
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn record_peaks(&mut self) {
        self.peak_live_maps = self.peak_live_maps.max(self.maps.len());
        self.peak_live_interactions = self.peak_live_interactions.max(self.interactions.len());
    }
}

impl MapEngine for HeadlessEngine {
    fn create_map(&mut self, spec: &MapSpec) -> Result<MapHandle> {
        if std::mem::take(&mut self.fail_next_create) {
            return Err(TwinMapError::Engine(format!(
                "refused to create map on {}",
                spec.mount
            )));
        }

        let map = MapHandle::from_raw(self.next_id());
        self.maps.insert(
            map,
            HeadlessMap {
                spec: spec.clone(),
                overlays: Vec::new(),
            },
        );
        self.events.push(EngineEvent::MapCreated {
            map,
            mount: spec.mount.clone(),
        });
        self.record_peaks();
        Ok(map)
    }

    fn add_overlay_layer(
        &mut self,
        map: MapHandle,
        layer: OverlayLayerSpec,
    ) -> Result<LayerHandle> {
        if !self.maps.contains_key(&map) {
            return Err(TwinMapError::Engine(format!("unknown map {:?}", map)));
        }
        let handle = LayerHandle::from_raw(self.next_id());
        let visible = layer.visible;
        if let Some(m) = self.maps.get_mut(&map) {
            m.overlays.push((handle, layer));
        }
        self.events.push(EngineEvent::LayerAdded {
            map,
            layer: handle,
            visible,
        });
        Ok(handle)
    }

    fn set_layer_visible(&mut self, map: MapHandle, layer: LayerHandle, visible: bool) {
        let Some(entry) = self
            .maps
            .get_mut(&map)
            .and_then(|m| m.overlays.iter_mut().find(|(h, _)| *h == layer))
        else {
            return;
        };
        entry.1.visible = visible;
        self.events.push(EngineEvent::LayerVisibility {
            map,
            layer,
            visible,
        });
    }

    fn add_interaction(
        &mut self,
        map: MapHandle,
        handler: PointerHandler,
    ) -> Result<InteractionHandle> {
        if !self.maps.contains_key(&map) {
            return Err(TwinMapError::Engine(format!("unknown map {:?}", map)));
        }
        let interaction = InteractionHandle::from_raw(self.next_id());
        self.interactions.insert(
            interaction,
            HeadlessInteraction {
                map,
                handler,
                attached: true,
            },
        );
        self.events.push(EngineEvent::InteractionAdded { map, interaction });
        self.record_peaks();
        Ok(interaction)
    }

    fn dispose_interaction(&mut self, interaction: InteractionHandle) {
        if self.interactions.remove(&interaction).is_some() {
            self.events.push(EngineEvent::InteractionDisposed { interaction });
        }
    }

    fn dispose_map(&mut self, map: MapHandle) {
        if self.maps.remove(&map).is_none() {
            return;
        }
        for interaction in self.interactions.values_mut().filter(|i| i.map == map) {
            interaction.attached = false;
        }
        self.events.push(EngineEvent::MapDisposed { map });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::{TileSourceConfig, ViewConfig},
        overlay::style::OverlayStyle,
    };
    use std::{cell::Cell, rc::Rc};

    fn spec(id: &str) -> MapSpec {
        MapSpec {
            mount: MountPoint::new(id),
            view: ViewConfig::default(),
            base_tiles: TileSourceConfig::default(),
        }
    }

    #[test]
    fn test_create_and_dispose() {
        let mut engine = HeadlessEngine::new();
        let map = engine.create_map(&spec("map1")).unwrap();
        assert_eq!(engine.live_map_count(), 1);
        assert_eq!(engine.maps_on(&MountPoint::new("map1")), vec![map]);

        engine.dispose_map(map);
        assert_eq!(engine.live_map_count(), 0);
        assert_eq!(engine.peak_live_maps(), 1);
    }

    #[test]
    fn test_double_dispose_is_noop() {
        let mut engine = HeadlessEngine::new();
        let map = engine.create_map(&spec("map1")).unwrap();
        let interaction = engine
            .add_interaction(map, Rc::new(|_: &PointerMoveEvent| {}))
            .unwrap();

        engine.dispose_interaction(interaction);
        engine.dispose_interaction(interaction);
        engine.dispose_map(map);
        engine.dispose_map(map);
        engine.dispose_map(MapHandle::from_raw(999));

        let disposals = engine
            .events()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    EngineEvent::MapDisposed { .. } | EngineEvent::InteractionDisposed { .. }
                )
            })
            .count();
        assert_eq!(disposals, 2);
    }

    #[test]
    fn test_disposed_map_stops_dispatching() {
        let mut engine = HeadlessEngine::new();
        let map = engine.create_map(&spec("map1")).unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        engine
            .add_interaction(
                map,
                Rc::new(move |_: &PointerMoveEvent| counter.set(counter.get() + 1)),
            )
            .unwrap();

        assert_eq!(engine.dispatch_pointer_move(map, Point::new(1.0, 1.0)), 1);
        engine.dispose_map(map);
        assert_eq!(engine.interactions_on(map), 0);
        assert_eq!(engine.dispatch_pointer_move(map, Point::new(1.0, 1.0)), 0);
        assert_eq!(calls.get(), 1);
        // Detached but not yet disposed.
        assert_eq!(engine.live_interaction_count(), 1);
    }

    #[test]
    fn test_overlay_layers_and_visibility() {
        let mut engine = HeadlessEngine::new();
        let map = engine.create_map(&spec("map1")).unwrap();
        let layer = engine
            .add_overlay_layer(
                map,
                OverlayLayerSpec {
                    feature: OverlayFeature::default(),
                    style: OverlayStyle::default(),
                    visible: false,
                },
            )
            .unwrap();

        assert_eq!(engine.overlay_layers(map), vec![(layer, false)]);
        engine.set_layer_visible(map, layer, true);
        assert_eq!(engine.visible_overlay_count(map), 1);
        assert!(engine.overlay_feature(map, layer).is_some());
    }

    #[test]
    fn test_injected_failure() {
        let mut engine = HeadlessEngine::new();
        engine.fail_next_create();
        assert!(matches!(
            engine.create_map(&spec("map1")),
            Err(TwinMapError::Engine(_))
        ));
        assert!(engine.create_map(&spec("map1")).is_ok());
    }
}
