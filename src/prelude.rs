//! Prelude module for common twinmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use twinmap::prelude::*;`

pub use crate::core::{
    config::{
        CoordinatorConfig, CoordinatorProfile, OverlayStrategy, TileSourceConfig, ViewConfig,
    },
    geo::{LatLng, Point},
    slot::{MountSlot, SlotLayout},
    view_state::{ControlSurface, ViewModeController, ViewState},
};

pub use crate::coordinator::SplitViewCoordinator;

pub use crate::engine::{
    headless::{EngineEvent, HeadlessEngine},
    InteractionHandle, LayerHandle, MapEngine, MapHandle, MapSpec, OverlayLayerSpec,
};

pub use crate::manager::{MapInstanceManager, ReconcileReport};

pub use crate::mount::{MountPoint, MountRegistry, MountTable};

pub use crate::overlay::{OverlayFeature, OverlayStyle, PointerSync, Rgba};

pub use crate::input::{PointerHandler, PointerMoveEvent};

#[cfg(feature = "egui")]
pub use crate::ui::{engine::EguiEngine, shell::SplitViewShell};

pub use crate::{Error as TwinMapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
