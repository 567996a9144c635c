//! # Configuration
//!
//! This module defines the configuration struct for the Canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Configuration parameters for the Canvas.
///
/// These settings allow the host application to tune the feel of the canvas
/// interactions. Document-level settings (paper size, orientation) live in
/// [`crate::persistence::ProjectSettings`] instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Multiplier for zoom speed. Default: 0.1 per scroll click.
    pub zoom_speed: f32,
    /// Distance in screen pixels for snapping wire ends to anchors. Default: 10.0.
    pub snap_threshold: f32,
    /// Trailing-edge delay in seconds before the live transform is published
    /// to the durable state. Default: 0.15.
    pub publish_debounce: f32,
    /// Approximate unscaled size of a node, used for hit testing, marquee
    /// selection and page coverage. Default: 200x150.
    pub base_node_size: Vec2,
    /// Inset from the visible paper-space edge when placing new nodes.
    /// Default: 40.0.
    pub spawn_margin: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 0.1,
            snap_threshold: 10.0,
            publish_debounce: 0.15,
            base_node_size: Vec2::new(200.0, 150.0),
            spawn_margin: 40.0,
        }
    }
}
