use crate::{
    engine::{InteractionHandle, LayerHandle, MapHandle},
    mount::MountPoint,
    overlay::feature::OverlayFeature,
};

/// Native resources held for one mount slot.
///
/// The map, interaction and overlay layer live and die together; the feature
/// stays for the lifetime of the manager.
#[derive(Debug, Default)]
pub struct SlotResources {
    pub mount: Option<MountPoint>,
    pub map: Option<MapHandle>,
    pub interaction: Option<InteractionHandle>,
    pub overlay_layer: Option<LayerHandle>,
    pub feature: OverlayFeature,
}

impl SlotResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        self.map.is_some()
    }
}
