//! # Viewport System
//!
//! This module handles the "infinite canvas" mathematics.
//! It provides utilities to transform between Paper Space (the zoom-independent
//! coordinate system nodes live in) and Screen Space (window pixels), plus the
//! debounced publishing of high-frequency transform updates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Rect;

/// Lower bound for the zoom factor.
pub const MIN_ZOOM: f32 = 0.05;
/// Upper bound for the zoom factor.
pub const MAX_ZOOM: f32 = 8.0;

/// Represents the current camera state: where we are looking (Pan) and how close (Zoom).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// The translation offset of the canvas, in screen pixels relative to the
    /// viewport origin. A positive value moves the canvas right/down.
    pub pan: Vec2,
    /// The scale factor.
    /// - 1.0 = 100% scale.
    /// - Greater than 1.0 = Zoomed In.
    /// - Less than 1.0 = Zoomed Out.
    pub zoom: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// The View struct combines the Transform with the viewport placement and size.
/// It serves as the single source of truth for coordinate conversions.
///
/// The transform held here is the *live*, low-latency value mutated directly by
/// interaction handlers; [`TransformPublisher`] mirrors it into the durable
/// state after a debounce.
pub struct View {
    /// Top-left corner of the canvas viewport in window coordinates.
    pub origin: Vec2,
    /// The camera transform.
    pub transform: Transform,
    /// The size of the visible area in pixels.
    pub viewport_size: Vec2,
}

impl View {
    /// Creates a new View system.
    pub fn new(transform: Transform, viewport_size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            transform,
            viewport_size,
        }
    }

    /// Converts a point from **Paper Space** to **Screen Space** (window pixels).
    ///
    /// Formula: `Screen = (Paper * Zoom) + Pan + Origin`
    pub fn paper_to_screen(&self, paper_pos: Vec2) -> Vec2 {
        (paper_pos * self.transform.zoom) + self.transform.pan + self.origin
    }

    /// Converts a point from **Screen Space** (window pixels) to **Paper Space**.
    ///
    /// Formula: `Paper = (Screen - Origin - Pan) / Zoom`
    pub fn screen_to_paper(&self, screen_pos: Vec2) -> Vec2 {
        (screen_pos - self.origin - self.transform.pan) / self.transform.zoom
    }

    /// Applies `new_zoom` (already clamped by the caller) such that the paper
    /// point under `screen_pos` stays visually fixed.
    pub fn zoom_at(&mut self, screen_pos: Vec2, new_zoom: f32) {
        let local = screen_pos - self.origin;
        let old_zoom = self.transform.zoom;
        self.transform.pan = local - ((local - self.transform.pan) / old_zoom) * new_zoom;
        self.transform.zoom = new_zoom;
    }

    /// Translates the canvas by a delta in screen pixels. No clamping.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.transform.pan += screen_delta;
    }

    /// Fits `rect` (paper space) into the viewport with the given relative
    /// padding on each side, centering its centroid. Zoom is clamped to
    /// [`MIN_ZOOM`]..[`MAX_ZOOM`].
    pub fn center_on(&mut self, rect: Rect, padding: f32) {
        let size = rect.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let pad = 1.0 + 2.0 * padding;
        let zoom = (self.viewport_size.x / (size.x * pad))
            .min(self.viewport_size.y / (size.y * pad))
            .clamp(MIN_ZOOM, MAX_ZOOM);
        self.transform.zoom = zoom;
        self.transform.pan = self.viewport_size * 0.5 - rect.center() * zoom;
    }

    /// The paper-space rectangle currently visible in the viewport.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_corners(
            self.screen_to_paper(self.origin),
            self.screen_to_paper(self.origin + self.viewport_size),
        )
    }
}

/// Debounced bridge between the live transform and the durable/observable one.
///
/// Wheel zoom and drag pan mutate [`View::transform`] directly every pointer
/// event; this type re-arms a trailing-edge timer on each mutation and hands
/// the settled value back to the host once input pauses (or immediately on
/// pointer release via [`TransformPublisher::flush`]).
pub struct TransformPublisher {
    published: Transform,
    debounce: f32,
    pending: Option<f32>,
}

impl TransformPublisher {
    pub fn new(initial: Transform, debounce: f32) -> Self {
        Self {
            published: initial,
            debounce,
            pending: None,
        }
    }

    /// The last value handed to the durable state.
    pub fn published(&self) -> Transform {
        self.published
    }

    /// Re-arms the debounce timer. Call after every direct transform mutation.
    pub fn touch(&mut self) {
        self.pending = Some(self.debounce);
    }

    /// Advances the timer by `dt` seconds. Returns the live transform when the
    /// debounce elapses, exactly once per settled burst.
    pub fn tick(&mut self, dt: f32, live: Transform) -> Option<Transform> {
        let remaining = self.pending? - dt;
        if remaining > 0.0 {
            self.pending = Some(remaining);
            return None;
        }
        self.pending = None;
        self.published = live;
        Some(live)
    }

    /// Publishes immediately (pointer release / explicit commit point).
    /// Returns `None` if nothing was pending.
    pub fn flush(&mut self, live: Transform) -> Option<Transform> {
        self.pending.take()?;
        self.published = live;
        Some(live)
    }

    /// Drops any pending publish. Call on component teardown so no write lands
    /// after unmount.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
