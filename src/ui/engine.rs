//! egui-backed map engine.
//!
//! Each map instance is painted into the screen region currently assigned
//! to its mount point. The base layer is a plain backdrop with a graticule
//! and the tile attribution; fetching the tiles themselves is left to a full
//! mapping engine. Overlay layers draw the spotlight at their feature.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use crate::{
    core::{
        config::ViewConfig,
        geo::{resolution_at, LatLng, Point, MERCATOR_EXTENT},
    },
    engine::{
        InteractionHandle, LayerHandle, MapEngine, MapHandle, MapSpec, OverlayLayerSpec,
    },
    input::events::{PointerHandler, PointerMoveEvent},
    mount::MountPoint,
    prelude::HashMap,
    Result, TwinMapError,
};

const GRATICULE_STEP_DEG: f64 = 30.0;

struct EguiMap {
    spec: MapSpec,
    overlays: Vec<(LayerHandle, OverlayLayerSpec)>,
}

struct EguiInteraction {
    map: MapHandle,
    handler: PointerHandler,
}

/// Style of the backdrop painted in place of tiles
#[derive(Debug, Clone, Copy)]
struct BackdropStyle {
    background: Color32,
    world: Color32,
    graticule: Stroke,
    attribution: Color32,
}

impl Default for BackdropStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(170, 211, 223),
            world: Color32::from_rgb(242, 239, 233),
            graticule: Stroke::new(1.0, Color32::from_rgba_unmultiplied(0, 0, 0, 40)),
            attribution: Color32::from_rgba_unmultiplied(0, 0, 0, 180),
        }
    }
}

#[derive(Default)]
pub struct EguiEngine {
    next_id: u64,
    maps: HashMap<MapHandle, EguiMap>,
    interactions: HashMap<InteractionHandle, EguiInteraction>,
    regions: HashMap<MountPoint, Rect>,
    backdrop: BackdropStyle,
}

impl EguiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Assigns the screen region a mount point occupies this frame.
    pub fn set_region(&mut self, mount: &MountPoint, rect: Rect) {
        self.regions.insert(mount.clone(), rect);
    }

    pub fn clear_regions(&mut self) {
        self.regions.clear();
    }

    pub fn region(&self, mount: &MountPoint) -> Option<Rect> {
        self.regions.get(mount).copied()
    }

    pub fn live_map_count(&self) -> usize {
        self.maps.len()
    }

    pub fn live_interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Screen position to map-space coordinate for a view shown in `rect`.
    pub fn screen_to_map(view: &ViewConfig, rect: Rect, pos: Pos2) -> Point {
        let resolution = resolution_at(view.zoom);
        let offset = pos - rect.center();
        Point::new(
            view.center.x + offset.x as f64 * resolution,
            view.center.y - offset.y as f64 * resolution,
        )
    }

    pub fn map_to_screen(view: &ViewConfig, rect: Rect, point: Point) -> Pos2 {
        let resolution = resolution_at(view.zoom);
        let center = rect.center();
        Pos2::new(
            center.x + ((point.x - view.center.x) / resolution) as f32,
            center.y - ((point.y - view.center.y) / resolution) as f32,
        )
    }

    /// Delivers a pointer move at `pos` to the interactions of whichever map
    /// is shown there. Returns the number of handlers invoked.
    pub fn pointer_moved(&self, pos: Pos2) -> usize {
        let Some((map, rect, spec)) = self.maps.iter().find_map(|(handle, m)| {
            self.regions
                .get(&m.spec.mount)
                .filter(|rect| rect.contains(pos))
                .map(|rect| (*handle, *rect, &m.spec))
        }) else {
            return 0;
        };

        let coordinate = Self::screen_to_map(&spec.view, rect, pos);
        let pixel = pos - rect.min;
        let event = PointerMoveEvent::new(spec.mount.clone(), coordinate)
            .with_pixel(Point::new(pixel.x as f64, pixel.y as f64));

        let handlers: Vec<PointerHandler> = self
            .interactions
            .values()
            .filter(|i| i.map == map)
            .map(|i| i.handler.clone())
            .collect();
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Paints every live map that has a region.
    pub fn paint(&self, painter: &Painter) {
        let mut maps: Vec<_> = self.maps.iter().collect();
        maps.sort_by_key(|(handle, _)| **handle);

        for (_, map) in maps {
            if let Some(rect) = self.regions.get(&map.spec.mount) {
                self.paint_map(&painter.with_clip_rect(*rect), *rect, map);
            }
        }
    }

    fn paint_map(&self, painter: &Painter, rect: Rect, map: &EguiMap) {
        let view = &map.spec.view;
        painter.rect_filled(rect, 0.0, self.backdrop.background);

        let world = Rect::from_two_pos(
            Self::map_to_screen(view, rect, Point::new(-MERCATOR_EXTENT, -MERCATOR_EXTENT)),
            Self::map_to_screen(view, rect, Point::new(MERCATOR_EXTENT, MERCATOR_EXTENT)),
        );
        painter.rect_filled(world, 0.0, self.backdrop.world);

        let mut lng = -180.0;
        while lng <= 180.0 {
            let top = LatLng::new(85.0, lng).to_mercator();
            let bottom = LatLng::new(-85.0, lng).to_mercator();
            painter.line_segment(
                [
                    Self::map_to_screen(view, rect, top),
                    Self::map_to_screen(view, rect, bottom),
                ],
                self.backdrop.graticule,
            );
            lng += GRATICULE_STEP_DEG;
        }
        let mut lat = -60.0;
        while lat <= 60.0 {
            let west = LatLng::new(lat, -180.0).to_mercator();
            let east = LatLng::new(lat, 180.0).to_mercator();
            painter.line_segment(
                [
                    Self::map_to_screen(view, rect, west),
                    Self::map_to_screen(view, rect, east),
                ],
                self.backdrop.graticule,
            );
            lat += GRATICULE_STEP_DEG;
        }

        for (_, overlay) in map.overlays.iter().filter(|(_, o)| o.visible) {
            let style = &overlay.style;
            painter.circle(
                Self::map_to_screen(view, rect, overlay.feature.coordinate()),
                style.radius,
                style.fill.to_color32(),
                Stroke::new(style.stroke_width, style.stroke.to_color32()),
            );
        }

        let attribution = &map.spec.base_tiles.attribution;
        if !attribution.is_empty() {
            painter.text(
                rect.right_bottom() + egui::vec2(-4.0, -4.0),
                Align2::RIGHT_BOTTOM,
                attribution,
                FontId::proportional(11.0),
                self.backdrop.attribution,
            );
        }
    }
}

impl MapEngine for EguiEngine {
    fn create_map(&mut self, spec: &MapSpec) -> Result<MapHandle> {
        let map = MapHandle::from_raw(self.next_id());
        self.maps.insert(
            map,
            EguiMap {
                spec: spec.clone(),
                overlays: Vec::new(),
            },
        );
        log::debug!("egui map {:?} created on {}", map, spec.mount);
        Ok(map)
    }

    fn add_overlay_layer(
        &mut self,
        map: MapHandle,
        layer: OverlayLayerSpec,
    ) -> Result<LayerHandle> {
        let handle = LayerHandle::from_raw(self.next_id());
        let entry = self
            .maps
            .get_mut(&map)
            .ok_or_else(|| TwinMapError::Engine(format!("unknown map {:?}", map)))?;
        entry.overlays.push((handle, layer));
        Ok(handle)
    }

    fn set_layer_visible(&mut self, map: MapHandle, layer: LayerHandle, visible: bool) {
        if let Some((_, overlay)) = self
            .maps
            .get_mut(&map)
            .and_then(|m| m.overlays.iter_mut().find(|(h, _)| *h == layer))
        {
            overlay.visible = visible;
        }
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
        self.interactions.insert(interaction, EguiInteraction { map, handler });
        Ok(interaction)
    }

    fn dispose_interaction(&mut self, interaction: InteractionHandle) {
        self.interactions.remove(&interaction);
    }

    fn dispose_map(&mut self, map: MapHandle) {
        if self.maps.remove(&map).is_some() {
            log::debug!("egui map {:?} disposed", map);
        }
    }
}
