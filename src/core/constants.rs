//! Core constants for the split-view coordinator.
//! Keeping them in a single place makes it easier to tweak the defaults.

/// Initial view centre of every map instance, in map-space metres.
pub const DEFAULT_CENTER: [f64; 2] = [0.0, 0.0];

/// Initial zoom level of every map instance.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Zoom range accepted by configuration validation.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 28.0;

/// Base tile source used when none is configured.
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Spotlight circle radius in screen pixels.
pub const SPOTLIGHT_RADIUS: f32 = 50.0;

/// Spotlight fill, RGBA with unit alpha.
pub const SPOTLIGHT_FILL: (u8, u8, u8, f32) = (0, 0, 0, 0.5);

/// Spotlight outline colour and width.
pub const SPOTLIGHT_STROKE: (u8, u8, u8, f32) = (0, 0, 0, 1.0);
pub const SPOTLIGHT_STROKE_WIDTH: f32 = 2.0;

/// Control labels. Each label names the mode the button switches *to*.
pub const LABEL_SPLIT: &str = "Two";
pub const LABEL_MERGE: &str = "One";
pub const LABEL_SHOW_SPOTLIGHT: &str = "Circle";
pub const LABEL_SHOW_CURSOR: &str = "Cursor";

/// Mount point ids used by hosts that do not supply their own.
pub const PRIMARY_MOUNT_ID: &str = "map1";
pub const SECONDARY_MOUNT_ID: &str = "map2";
