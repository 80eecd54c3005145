//! # TwinMap
//!
//! One or two synchronized map viewports with a pointer-linked spotlight.
//!
//! The crate coordinates the lifecycle of map instances owned by an external
//! mapping engine: how many exist, where they mount, and how one shared
//! pointer handler keeps every viewport's overlay feature on the same
//! coordinate. Drawing tiles is the engine's job.

pub mod coordinator;
pub mod core;
pub mod engine;
pub mod input;
pub mod manager;
pub mod mount;
pub mod overlay;
pub mod prelude;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use coordinator::SplitViewCoordinator;

pub use crate::core::{
    config::{CoordinatorConfig, CoordinatorProfile, OverlayStrategy},
    geo::{LatLng, Point},
    slot::{MountSlot, SlotLayout},
    view_state::{ControlSurface, ViewModeController, ViewState},
};

pub use engine::{HeadlessEngine, MapEngine};

pub use manager::{MapInstanceManager, ReconcileReport};

pub use mount::{MountPoint, MountRegistry, MountTable};

pub use overlay::{OverlayFeature, OverlayStyle, PointerSync};

pub use input::{PointerHandler, PointerMoveEvent};

#[cfg(feature = "egui")]
pub use ui::{engine::EguiEngine, shell::SplitViewShell};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TwinMapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TwinMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = TwinMapError;

/// Installs `env_logger` honouring `RUST_LOG`. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_debug_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
