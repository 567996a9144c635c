//! # Wire Geometry & Color Derivation
//!
//! A wire's color is not stored on the wire: it is derived by walking the
//! graph backward from the wire's source anchor to the nearest device that
//! declares a [`SignalColor`]. The walk is guarded against cycles with a
//! visited set and memoized per connection in [`ColorCache`], since many
//! downstream wires share upstream topology and re-evaluation happens on
//! every drag frame.

use std::collections::HashSet;

use glam::Vec2;
use slotmap::SecondaryMap;

use crate::anchors::AnchorRegistry;
use crate::math;
use crate::model::{ConnectionId, Direction, GraphState, PortId, SignalColor};

/// Walks backward from `anchor` to the originating signal source.
///
/// Terminates at a node with an explicit color, a dead end (no incoming
/// connection), a dangling anchor, or a detected cycle; the latter three all
/// yield `None`.
pub fn trace_source_color(graph: &GraphState, anchor: PortId) -> Option<SignalColor> {
    let mut visited = HashSet::new();
    trace(graph, anchor, &mut visited)
}

fn trace(
    graph: &GraphState,
    anchor: PortId,
    visited: &mut HashSet<PortId>,
) -> Option<SignalColor> {
    if !visited.insert(anchor) {
        return None;
    }
    let port = graph.ports.get(anchor)?;
    let node = graph.nodes.get(port.node)?;
    if let Some(color) = node.signal_color {
        return Some(color);
    }

    let upstream = match port.direction {
        // An input anchor has at most one incoming wire.
        Direction::In => graph.connections.values().find(|c| c.to == anchor),
        // From an output anchor the walk continues through the owning device:
        // the first connected input in section order feeds it.
        Direction::Out => node
            .input_section
            .ports
            .iter()
            .find_map(|&input| graph.connections.values().find(|c| c.to == input)),
    }?;
    trace(graph, upstream.from, visited)
}

/// Per-connection memo of traced colors, rebuilt whenever nodes or
/// connections change (keyed off the graph's topology revision, so node drags
/// never invalidate it).
pub struct ColorCache {
    colors: SecondaryMap<ConnectionId, Option<SignalColor>>,
    built_rev: Option<u64>,
}

impl Default for ColorCache {
    fn default() -> Self {
        Self {
            colors: SecondaryMap::new(),
            built_rev: None,
        }
    }
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the memo if topology changed since the last build.
    pub fn refresh(&mut self, graph: &GraphState) {
        if self.built_rev == Some(graph.topology_revision) {
            return;
        }
        self.colors.clear();
        for (id, conn) in &graph.connections {
            self.colors.insert(id, trace_source_color(graph, conn.from));
        }
        self.built_rev = Some(graph.topology_revision);
    }

    /// O(1) lookup of a connection's derived color.
    pub fn color_of(&self, id: ConnectionId) -> Option<SignalColor> {
        self.colors.get(id).copied().flatten()
    }
}

/// Renderable geometry of one wire: a cubic Bezier in paper space plus the
/// derived color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WirePath {
    pub start: Vec2,
    pub cp1: Vec2,
    pub cp2: Vec2,
    pub end: Vec2,
    pub color: Option<SignalColor>,
}

/// Builds the path for a connection, or `None` when either endpoint cannot be
/// resolved (unregistered or deleted anchor); the wire is simply not drawn.
pub fn wire_path(
    graph: &GraphState,
    anchors: &AnchorRegistry,
    colors: &ColorCache,
    id: ConnectionId,
) -> Option<WirePath> {
    let conn = graph.connections.get(id)?;
    let start = anchors.resolve(conn.from)?;
    let end = anchors.resolve(conn.to)?;
    let (cp1, cp2) = math::calculate_bezier_points(start, end);
    Some(WirePath {
        start,
        cp1,
        cp2,
        end,
        color: colors.color_of(id),
    })
}
