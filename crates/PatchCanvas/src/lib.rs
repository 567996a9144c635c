//! # PatchCanvas
//!
//! `patch_canvas` is a headless, retained-mode engine for patch-diagram
//! editors: device nodes with typed input/output ports, wires between
//! anchors, an infinite pannable/zoomable canvas, and print-page tiling.
//! It owns state, mathematics, and logic, while delegating all rendering to
//! the host application.
//!
//! ## Core Architecture
//! - **Model (`src/model.rs`)**: Stores the graph state in flat arenas (SlotMap).
//! - **View (`src/view.rs`)**: Coordinate transforms (Paper <-> Screen) and
//!   the debounced transform publisher.
//! - **Anchors (`src/anchors.rs`)**: Tracks per-node anchor offsets and
//!   batch-resolves absolute positions.
//! - **Wires (`src/wires.rs`)**: Derives wire colors by source tracing and
//!   produces wire geometry.
//! - **Pages (`src/pages.rs`)**: Sparse page-cell computation for export.

pub mod anchors;
pub mod config;
pub mod history;
pub mod input;
pub mod interaction;
pub mod math;
pub mod model;
pub mod pages;
pub mod persistence;
pub mod view;
pub mod wires;

use glam::Vec2;

use anchors::{AnchorRegistry, Measurer};
use input::InputState;
use math::Rect;
use model::{GraphState, NodeFlags, NodeId, NodeTemplate};
use pages::PageGrid;
use persistence::{Project, ProjectSettings};
use view::{MAX_ZOOM, MIN_ZOOM, Transform, TransformPublisher, View};
use wires::{ColorCache, WirePath};

// Re-exports for convenience
pub use config::CanvasConfig;
pub use interaction::{InteractionMode, LogicEvent};

/// The main entry point for the library.
///
/// The `Canvas` struct holds the transient state of the editor (viewport,
/// interaction state, derived caches) and generic configuration. It is
/// intended to be instantiated once and reused.
pub struct Canvas {
    /// Configuration settings.
    pub config: CanvasConfig,
    /// The Viewport system handling coordinate transforms. Mutated directly
    /// by high-frequency input; see `publisher`.
    pub view: View,
    /// Debounced bridge from the live transform to the durable state.
    pub publisher: TransformPublisher,
    /// Current interaction mode.
    pub interaction_mode: InteractionMode,
    /// Anchor offset registry and batch resolver.
    pub anchors: AnchorRegistry,
    /// Per-connection derived wire colors.
    pub colors: ColorCache,
    /// Occupied print pages.
    pub pages: PageGrid,
    /// Document settings applied from the loaded project.
    pub settings: ProjectSettings,
    content_override: Option<Vec2>,
}

impl Canvas {
    /// Creates a new Canvas instance with the given configuration.
    pub fn new(config: CanvasConfig) -> Self {
        let settings = ProjectSettings::default();
        let publisher = TransformPublisher::new(Transform::default(), config.publish_debounce);
        Self {
            config,
            view: View::new(Transform::default(), Vec2::new(800.0, 600.0)),
            publisher,
            interaction_mode: InteractionMode::Idle,
            anchors: AnchorRegistry::new(),
            colors: ColorCache::new(),
            pages: PageGrid::new(settings.page_size()),
            settings,
            content_override: None,
        }
    }

    /// Updates the viewport size (e.g., on window resize).
    pub fn update_viewport_size(&mut self, size: Vec2) {
        self.view.viewport_size = size;
    }

    /// The core update loop.
    ///
    /// Call every frame (or on event). Handles interactions, advances the
    /// publish debounce, and refreshes the derived caches (anchor positions,
    /// wire colors, page grid) if the graph changed. Returns the logic
    /// events for the host to act on.
    pub fn update(
        &mut self,
        input: &InputState,
        dt: f32,
        graph: &mut GraphState,
    ) -> Vec<LogicEvent> {
        self.view.viewport_size = input.screen_size;

        let mut events = Vec::new();
        interaction::handle_interactions(
            &mut self.interaction_mode,
            &mut self.view,
            &mut self.publisher,
            &self.config,
            input,
            graph,
            &self.anchors,
            &mut events,
        );

        if let Some(t) = self.publisher.tick(dt, self.view.transform) {
            events.push(LogicEvent::TransformPublished(t));
        }

        self.anchors.refresh(graph);
        self.colors.refresh(graph);
        if self.settings.paper_enabled {
            self.pages.refresh(graph, self.config.base_node_size);
        }

        events
    }

    /// Runs the measurement pass: registers every node's anchor offsets from
    /// the host's measurer and re-resolves absolute positions.
    ///
    /// Call once synchronously after the host's layout reflects the latest
    /// state (before the next paint), not during event handlers.
    pub fn settle(&mut self, graph: &GraphState, measurer: &impl Measurer) {
        for (_, node) in &graph.nodes {
            for (anchor, offset) in measurer.anchor_offsets(node) {
                self.anchors.register(anchor, offset);
            }
        }
        self.content_override = measurer.content_bounds();
        self.anchors.refresh(graph);
    }

    /// Geometry and derived color for one wire, or `None` when an endpoint
    /// cannot be resolved (the wire is simply not drawn).
    pub fn wire_path(&self, graph: &GraphState, id: model::ConnectionId) -> Option<WirePath> {
        wires::wire_path(graph, &self.anchors, &self.colors, id)
    }

    /// Spawns a node from a template at a random position within the visible
    /// area, inset by the configured margin.
    pub fn spawn_node(&mut self, graph: &mut GraphState, template: &NodeTemplate) -> NodeId {
        let margin = self.config.spawn_margin / self.view.transform.zoom;
        let area = self.view.visible_rect().inset(margin);
        graph.spawn_node(template, area)
    }

    /// Deletes every selected wire and every selected, unlocked node
    /// (cascading to their connections and anchors). Selection is cleared
    /// only after all deletes succeeded. Returns the number of entities
    /// removed.
    pub fn delete_selection(&mut self, graph: &mut GraphState) -> usize {
        let mut removed = 0;
        for id in graph.selected_connections() {
            if graph.delete_connection(id) {
                removed += 1;
            }
        }
        for id in graph.selected_nodes() {
            if graph
                .nodes
                .get(id)
                .is_some_and(|n| n.flags.contains(NodeFlags::LOCKED))
            {
                continue;
            }
            self.anchors.remove_node(id);
            if graph.delete_node(id) {
                removed += 1;
            }
        }
        graph.clear_selection();
        removed
    }

    /// Cursor-anchored zoom by a multiplicative factor, clamped.
    pub fn zoom_at(&mut self, screen_pos: Vec2, factor: f32) {
        let old_zoom = self.view.transform.zoom;
        let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - old_zoom).abs() > f32::EPSILON {
            self.view.zoom_at(screen_pos, new_zoom);
            self.publisher.touch();
        }
    }

    /// Discrete zoom-level selection (e.g. "100%"): the same anchored
    /// recompute, centered on the viewport, published synchronously.
    pub fn set_zoom(&mut self, zoom: f32) -> Option<Transform> {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let center = self.view.origin + self.view.viewport_size * 0.5;
        self.view.zoom_at(center, zoom);
        self.publisher.touch();
        self.publisher.flush(self.view.transform)
    }

    /// Pans by a screen-space delta and re-arms the publish debounce.
    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.view.pan_by(screen_delta);
        self.publisher.touch();
    }

    /// Fits all content into the viewport with relative padding and publishes
    /// immediately.
    pub fn center_content(&mut self, graph: &GraphState, padding: f32) -> Option<Transform> {
        let rect = self.content_rect(graph)?;
        self.view.center_on(rect, padding);
        self.publisher.touch();
        self.publisher.flush(self.view.transform)
    }

    /// Bounds of all content: the externally measured override when paper
    /// layout is disabled and a measurement was supplied (anchored at the
    /// paper origin), otherwise the union of node bounding boxes.
    pub fn content_rect(&self, graph: &GraphState) -> Option<Rect> {
        if !self.settings.paper_enabled
            && let Some(size) = self.content_override
        {
            return Some(Rect::new(Vec2::ZERO, size));
        }
        graph.content_bounds(self.config.base_node_size)
    }

    /// Replaces the whole document from a project object. Selection and
    /// interaction state are reset; the page grid adopts the project's paper
    /// settings.
    pub fn load_project(&mut self, graph: &mut GraphState, project: &Project) {
        self.settings = project.apply(graph);
        self.interaction_mode = InteractionMode::Idle;
        self.content_override = None;
        // The fresh graph restarts its revision counters, so every derived
        // cache starts over with it.
        self.anchors = AnchorRegistry::new();
        self.colors = ColorCache::new();
        self.pages = PageGrid::new(self.settings.page_size());
        self.view.transform = Transform {
            pan: Vec2::ZERO,
            zoom: self.settings.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        };
        self.publisher = TransformPublisher::new(self.view.transform, self.config.publish_debounce);
    }

    /// Serializes the current document, carrying the live zoom into the
    /// settings.
    pub fn save_project(&self, graph: &GraphState, name: impl Into<String>) -> Project {
        let mut settings = self.settings.clone();
        settings.zoom = self.view.transform.zoom;
        Project::capture(name, settings, graph)
    }

    /// Resets to an empty document, keeping configuration.
    pub fn reset(&mut self, graph: &mut GraphState) {
        *graph = GraphState::default();
        self.interaction_mode = InteractionMode::Idle;
        self.anchors = AnchorRegistry::new();
        self.colors = ColorCache::new();
        self.pages = PageGrid::new(self.settings.page_size());
        self.content_override = None;
    }

    /// Cancels any pending debounced publish. Call on component teardown so
    /// no write lands after unmount.
    pub fn teardown(&mut self) {
        self.publisher.cancel();
    }
}
