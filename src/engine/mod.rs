//! The mapping engine seam.
//!
//! Everything that actually draws tiles, projects coordinates or dispatches
//! native pointer events lives behind `MapEngine`. The coordinator only asks
//! it to create, decorate and dispose instances and treats the returned
//! handles as opaque.

pub mod headless;

use crate::{
    core::config::{TileSourceConfig, ViewConfig},
    input::events::PointerHandler,
    mount::MountPoint,
    overlay::{feature::OverlayFeature, style::OverlayStyle},
    Result,
};

pub use headless::HeadlessEngine;

macro_rules! engine_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub fn raw(self) -> u64 {
                self.0
            }
        }
    };
}

engine_handle!(
    /// A live map instance owned by the engine.
    MapHandle
);
engine_handle!(
    /// A layer attached to a map instance.
    LayerHandle
);
engine_handle!(
    /// A pointer interaction registered on a map instance.
    InteractionHandle
);

/// Everything needed to construct a map instance with its base tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSpec {
    pub mount: MountPoint,
    pub view: ViewConfig,
    pub base_tiles: TileSourceConfig,
}

/// A vector layer holding one overlay feature drawn as a circle.
#[derive(Debug, Clone)]
pub struct OverlayLayerSpec {
    pub feature: OverlayFeature,
    pub style: OverlayStyle,
    pub visible: bool,
}

pub trait MapEngine {
    /// Creates an instance bound to `spec.mount` with a base tile layer.
    fn create_map(&mut self, spec: &MapSpec) -> Result<MapHandle>;

    /// Attaches an overlay layer on top of the map's existing layers.
    fn add_overlay_layer(&mut self, map: MapHandle, layer: OverlayLayerSpec)
        -> Result<LayerHandle>;

    /// No-op for unknown maps or layers.
    fn set_layer_visible(&mut self, map: MapHandle, layer: LayerHandle, visible: bool);

    /// Registers a pointer-move interaction whose callback is `handler`.
    fn add_interaction(
        &mut self,
        map: MapHandle,
        handler: PointerHandler,
    ) -> Result<InteractionHandle>;

    /// Releases the interaction. Must be a no-op if already disposed.
    fn dispose_interaction(&mut self, interaction: InteractionHandle);

    /// Releases the instance, its layers and its listeners. Must be a no-op
    /// if already disposed.
    fn dispose_map(&mut self, map: MapHandle);
}
