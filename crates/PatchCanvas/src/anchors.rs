//! # Anchor Registry
//!
//! Tracks where each port's anchor sits *within* its owning node (a local,
//! unscaled offset) and resolves the full set to absolute paper-space
//! positions in a single derived pass. Wire rendering consumes the whole set
//! every frame during a drag, so resolution is batched rather than per-anchor
//! on demand.
//!
//! Offsets are supplied by the rendering collaborator once real layout has
//! settled; headless hosts and tests use [`EstimatedMeasurer`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

use crate::model::{Direction, GraphState, Node, NodeId, PortId, SectionFlags, Side};

/// Position of an anchor relative to its owning node's unscaled origin.
///
/// Absolute position = `node.position + local * node.scale`; the viewport zoom
/// is never baked into stored coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorOffset {
    /// Owning node, stored explicitly.
    pub node: NodeId,
    /// Offset from the node's unscaled top-left corner.
    pub local: Vec2,
    /// Signal direction of the anchor.
    pub direction: Direction,
}

/// Supplies anchor offsets (and optionally overall content bounds) for a node.
///
/// The rendering collaborator implements this against real measured layout;
/// the canvas calls it synchronously after the tree reflects the latest
/// state. The offsets are opaque to the canvas.
pub trait Measurer {
    /// Anchor offsets for one node, in node-local unscaled units.
    fn anchor_offsets(&self, node: &Node) -> Vec<(PortId, AnchorOffset)>;

    /// Measured bounds of all rendered content, used in place of the page
    /// grid when paper layout is disabled.
    fn content_bounds(&self) -> Option<Vec2> {
        None
    }
}

/// Fallback measurer that spaces anchors evenly along the node's sides,
/// honoring the layout descriptor's anchor sides and collapse flags.
pub struct EstimatedMeasurer {
    pub base_size: Vec2,
}

impl EstimatedMeasurer {
    pub fn new(base_size: Vec2) -> Self {
        Self { base_size }
    }

    fn side_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.base_size.x,
        }
    }
}

impl Measurer for EstimatedMeasurer {
    fn anchor_offsets(&self, node: &Node) -> Vec<(PortId, AnchorOffset)> {
        let sections = [
            (
                &node.input_section,
                Direction::In,
                node.layout.input_side,
                node.layout.collapsed.contains(SectionFlags::INPUTS_COLLAPSED),
            ),
            (
                &node.output_section,
                Direction::Out,
                node.layout.output_side,
                node.layout.collapsed.contains(SectionFlags::OUTPUTS_COLLAPSED),
            ),
        ];

        let mut out = Vec::new();
        for (section, direction, side, collapsed) in sections {
            let x = self.side_x(side);
            let spacing = self.base_size.y / (section.ports.len() as f32 + 1.0);
            for (i, &port) in section.ports.iter().enumerate() {
                // A collapsed section funnels all its anchors to mid-height.
                let y = if collapsed {
                    self.base_size.y * 0.5
                } else {
                    spacing * (i as f32 + 1.0)
                };
                out.push((
                    port,
                    AnchorOffset {
                        node: node.id,
                        local: Vec2::new(x, y),
                        direction,
                    },
                ));
            }
        }
        out
    }
}

/// Maps anchors to registered offsets and batch-resolved absolute positions.
pub struct AnchorRegistry {
    offsets: SecondaryMap<PortId, AnchorOffset>,
    resolved: SecondaryMap<PortId, Vec2>,
    offsets_rev: u64,
    built_graph_rev: Option<u64>,
    built_offsets_rev: u64,
    generation: u64,
}

impl Default for AnchorRegistry {
    fn default() -> Self {
        Self {
            offsets: SecondaryMap::new(),
            resolved: SecondaryMap::new(),
            offsets_rev: 0,
            built_graph_rev: None,
            built_offsets_rev: 0,
            generation: 0,
        }
    }
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) an anchor offset. Idempotent: a call with
    /// an offset equal field-wise to the stored one is a no-op and does not
    /// trigger downstream recomputation. Returns whether anything changed.
    pub fn register(&mut self, anchor: PortId, offset: AnchorOffset) -> bool {
        if self.offsets.get(anchor) == Some(&offset) {
            return false;
        }
        self.offsets.insert(anchor, offset);
        self.offsets_rev = self.offsets_rev.wrapping_add(1);
        true
    }

    /// Drops a single anchor.
    pub fn remove(&mut self, anchor: PortId) {
        if self.offsets.remove(anchor).is_some() {
            self.offsets_rev = self.offsets_rev.wrapping_add(1);
        }
    }

    /// Drops every anchor owned by `node`.
    pub fn remove_node(&mut self, node: NodeId) {
        let before = self.offsets.len();
        self.offsets.retain(|_, off| off.node != node);
        if self.offsets.len() != before {
            self.offsets_rev = self.offsets_rev.wrapping_add(1);
        }
    }

    /// Recomputes the absolute position of every registered anchor, as one
    /// pass. Skipped entirely (map identity preserved) when neither the node
    /// map nor the offset map changed since the last build.
    pub fn refresh(&mut self, graph: &GraphState) {
        if self.built_graph_rev == Some(graph.revision)
            && self.built_offsets_rev == self.offsets_rev
        {
            return;
        }

        // Offsets whose owning node is gone are pruned here rather than left
        // to resolve as stale positions.
        self.offsets.retain(|_, off| graph.nodes.contains_key(off.node));

        self.resolved.clear();
        for (anchor, off) in &self.offsets {
            if let Some(node) = graph.nodes.get(off.node) {
                self.resolved
                    .insert(anchor, node.position + off.local * node.scale);
            }
        }
        self.built_graph_rev = Some(graph.revision);
        self.built_offsets_rev = self.offsets_rev;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Absolute paper-space position of an anchor, or `None` if it was never
    /// registered or its owner is gone. Callers treat `None` as "do not
    /// render", not an error.
    pub fn resolve(&self, anchor: PortId) -> Option<Vec2> {
        self.resolved.get(anchor).copied()
    }

    /// Iterates all resolved anchors with their directions.
    pub fn resolved(&self) -> impl Iterator<Item = (PortId, Vec2, Direction)> + '_ {
        self.resolved.iter().filter_map(|(anchor, &pos)| {
            let off = self.offsets.get(anchor)?;
            Some((anchor, pos, off.direction))
        })
    }

    /// Bumped once per actual rebuild of the resolved map. Lets tests and
    /// hosts observe that redundant `register` calls cause no recomputation.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
