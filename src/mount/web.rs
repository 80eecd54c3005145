//! DOM-backed mount registry for browser hosts.

use crate::{
    core::slot::MountSlot,
    mount::{MountPoint, MountRegistry},
};

/// Resolves slots to DOM elements by id. A slot is mounted while an element
/// with its id is present in the document.
#[derive(Debug, Clone)]
pub struct DomMountRegistry {
    ids: [String; 2],
}

impl Default for DomMountRegistry {
    fn default() -> Self {
        Self::new(
            MountSlot::Primary.default_mount_id(),
            MountSlot::Secondary.default_mount_id(),
        )
    }
}

impl DomMountRegistry {
    pub fn new(primary_id: impl Into<String>, secondary_id: impl Into<String>) -> Self {
        Self {
            ids: [primary_id.into(), secondary_id.into()],
        }
    }

    pub fn element(&self, slot: MountSlot) -> Option<web_sys::Element> {
        web_sys::window()?
            .document()?
            .get_element_by_id(&self.ids[slot.index()])
    }
}

impl MountRegistry for DomMountRegistry {
    fn mount_point(&self, slot: MountSlot) -> Option<MountPoint> {
        self.element(slot)
            .map(|_| MountPoint::new(self.ids[slot.index()].clone()))
    }
}

/// Routes panics to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
