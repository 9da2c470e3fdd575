//! Fixed visual parameters. Colors are packed `0xRRGGBBAA`.

/// World-space footprint of a node; also the half-extent of its spatial
/// index entry. Hit testing accepts pointers within half this value.
pub const NODE_SIZE: f32 = 4.0;

pub const BASE_NODE_COLOR: u32 = 0x90F8FCFF;
pub const BASE_LINK_COLOR: u32 = 0xFFFFFF20;

pub const FOCUS_NODE_COLOR: u32 = 0xBF2172FF;
pub const NEIGHBOR_NODE_COLOR: u32 = 0x90EE90FF;
pub const HIGHLIGHT_LINK_COLOR: u32 = 0xFFFFFFFF;

pub const CLEAR_COLOR: u32 = 0x0C2952FF;

pub const BASE_LINE_WIDTH: f32 = 1.0;
pub const HIGHLIGHT_LINE_WIDTH: f32 = 6.0;

/// Focused nodes are drawn this much larger than their base record.
pub const FOCUS_SIZE_SCALE: f32 = 1.2;

/// Half-width of the initial view box around the origin.
pub const INITIAL_VIEW_EXTENT: f32 = 200.0;

/// Half-width of the view box after recentering on a focused node.
pub const FOCUS_VIEW_MARGIN: f32 = 20.0;

/// Prefix for per-node image references surfaced by the detail query.
pub const IMAGE_ENDPOINT: &str = "assets/nodes/";
