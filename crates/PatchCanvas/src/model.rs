//! # Core Data Models
//!
//! This module defines the fundamental data model for the patch diagram.
//! It uses `SlotMap` for efficient, safe, and stable entity storage without
//! pointers: devices (nodes), their ports, and the wires (connections)
//! between them all live in flat arenas.
//!
//! Positions are stored in Paper Space and are independent of the viewport
//! zoom; a node additionally carries its own `scale` factor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use slotmap::new_key_type;
use std::collections::HashMap;

use crate::math::Rect;

pub use uuid::Uuid;

new_key_type! {
    /// Unique identifier for a Node.
    pub struct NodeId;
    /// Unique identifier for a Port. A port exposes exactly one anchor, so
    /// this also identifies the anchor.
    pub struct PortId;
    /// Unique identifier for a Connection.
    pub struct ConnectionId;
}

/// Lower bound for a node's own scale factor.
pub const MIN_NODE_SCALE: f32 = 0.5;
/// Upper bound for a node's own scale factor.
pub const MAX_NODE_SCALE: f32 = 2.0;

use bitflags::bitflags;

bitflags! {
    /// Bitflags representing various boolean states of a Node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node cannot be moved or deleted.
        const LOCKED = 1 << 0;
        /// The node is not rendered.
        const HIDDEN = 1 << 1;
        /// The node is currently selected by the user.
        const SELECTED = 1 << 2;
    }
}

bitflags! {
    /// Bitflags representing various boolean states of a Connection.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ConnectionFlags: u8 {
        /// The connection is currently selected by the user.
        const SELECTED = 1 << 0;
    }
}

bitflags! {
    /// Collapse state of a node's layout sections.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SectionFlags: u8 {
        const INPUTS_COLLAPSED = 1 << 0;
        const SYSTEM_COLLAPSED = 1 << 1;
        const OUTPUTS_COLLAPSED = 1 << 2;
    }
}

// Manual Serialize/Deserialize implementations so the flags persist as plain
// integers.
macro_rules! serde_bitflags {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_u8(self.bits())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = u8::deserialize(deserializer)?;
                Ok(Self::from_bits_truncate(bits))
            }
        }
    };
}

serde_bitflags!(NodeFlags);
serde_bitflags!(ConnectionFlags);
serde_bitflags!(SectionFlags);

/// Which way signal flows through an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

/// Named color a signal source declares. Wires derive their color by tracing
/// back to the nearest node carrying one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalColor {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Violet,
    Magenta,
}

/// Physical connector of a port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Connector {
    #[default]
    Hdmi,
    DisplayPort,
    Sdi,
    Dvi,
    Vga,
    UsbC,
    Rj45,
    Fiber,
}

/// Video resolution carried by a port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Hd720,
    #[default]
    Hd1080,
    Qhd1440,
    Uhd4k,
    Uhd8k,
}

/// Refresh rate carried by a port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefreshRate {
    Hz24,
    Hz30,
    #[default]
    Hz60,
    Hz120,
    Hz144,
}

/// The column kinds a port section can display, unique and reorderable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Connector,
    Resolution,
    Rate,
}

/// The three vertical sections of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Inputs,
    System,
    Outputs,
}

/// Which side of the node a section's anchors sit on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Node-local presentation schema. Not geometry: it only affects where within
/// a node an anchor is computed to sit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Vertical ordering of the node's sections.
    pub section_order: Vec<SectionKind>,
    /// Side the input anchors attach to.
    pub input_side: Side,
    /// Side the output anchors attach to.
    pub output_side: Side,
    /// Collapse flags per section.
    pub collapsed: SectionFlags,
}

impl Default for LayoutDescriptor {
    fn default() -> Self {
        Self {
            section_order: vec![SectionKind::Inputs, SectionKind::System, SectionKind::Outputs],
            input_side: Side::Left,
            output_side: Side::Right,
            collapsed: SectionFlags::empty(),
        }
    }
}

/// The device description shown in a node's middle section.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemBlock {
    /// Device or system name (e.g. "Matrix 16x16").
    pub name: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A Port on a Node.
///
/// Ports are the anchors for Connections. Ownership is explicit: each port
/// stores its owning `NodeId`, so node-to-anchor lookup never has to parse
/// identifier strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Port {
    /// Self-reference ID.
    pub id: PortId,
    /// ID of the Node this port belongs to.
    pub node: NodeId,
    /// Signal direction of this port's anchor.
    pub direction: Direction,
    /// 1-based position within the owning section. Renumbered on every
    /// deletion so it always equals `index + 1`.
    pub number: u32,
    pub connector: Connector,
    pub resolution: Resolution,
    pub refresh_rate: RefreshRate,
}

/// One of a node's two port sections (inputs or outputs).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortSection {
    /// Display title of the section's first column.
    pub column_name: String,
    /// Ordered, unique column kinds shown for each port row.
    pub column_order: Vec<ColumnKind>,
    /// Ordered port list. `Port::number` mirrors the index here.
    pub ports: Vec<PortId>,
}

impl PortSection {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            column_order: vec![ColumnKind::Connector, ColumnKind::Resolution, ColumnKind::Rate],
            ports: Vec::new(),
        }
    }
}

/// A Node in the graph: one device in the patch diagram.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Self-reference ID.
    pub id: NodeId,
    /// Stable UUID for persistence.
    pub uuid: Uuid,
    /// Display title.
    pub title: String,
    /// Declared signal color, if this device originates a signal.
    pub signal_color: Option<SignalColor>,
    /// Paper-space position of the top-left corner (zoom-independent).
    pub position: Vec2,
    /// Per-node scale factor, clamped to
    /// [`MIN_NODE_SCALE`]..[`MAX_NODE_SCALE`]. Distinct from the global zoom.
    pub scale: f32,
    /// Presentation schema (section order, anchor sides, collapse flags).
    pub layout: LayoutDescriptor,
    /// The device description.
    pub system: SystemBlock,
    pub input_section: PortSection,
    pub output_section: PortSection,
    /// State flags.
    pub flags: NodeFlags,
}

/// A Connection (wire) between two anchors.
///
/// Directed: `from` is always the output-side anchor and `to` the input-side
/// anchor, established at creation time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Connection {
    /// Self-reference ID.
    pub id: ConnectionId,
    /// Output-side anchor.
    pub from: PortId,
    /// Input-side anchor.
    pub to: PortId,
    /// Optional wire label.
    pub label: Option<String>,
    /// Marks a premium/enhanced cable run.
    pub enhanced: bool,
    /// Optional dash pattern token understood by the renderer.
    pub dash_pattern: Option<String>,
    /// State flags.
    pub flags: ConnectionFlags,
}

/// Why [`GraphState::add_connection`] rejected a wire.
///
/// All of these are normal interactive outcomes, not failures; the canvas
/// surfaces no error for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    #[error("cannot connect an anchor to itself")]
    SelfLoop,
    #[error("a connection must join an output anchor to an input anchor")]
    SameDirection,
    #[error("an identical connection already exists")]
    Duplicate,
    #[error("the input anchor already has an incoming connection")]
    InputOccupied,
    #[error("unknown anchor")]
    UnknownAnchor,
}

/// Partial update for a node. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct NodePatch {
    pub title: Option<String>,
    /// `Some(None)` clears the declared color.
    pub signal_color: Option<Option<SignalColor>>,
    pub position: Option<Vec2>,
    pub scale: Option<f32>,
    pub layout: Option<LayoutDescriptor>,
    pub system: Option<SystemBlock>,
}

/// Partial update for a port.
#[derive(Clone, Debug, Default)]
pub struct PortPatch {
    pub connector: Option<Connector>,
    pub resolution: Option<Resolution>,
    pub refresh_rate: Option<RefreshRate>,
}

/// Template for one port in a [`NodeTemplate`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PortTemplate {
    pub connector: Connector,
    pub resolution: Resolution,
    pub refresh_rate: RefreshRate,
}

/// Template for a port section in a [`NodeTemplate`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub column_name: String,
    pub column_order: Vec<ColumnKind>,
    pub ports: Vec<PortTemplate>,
}

impl SectionTemplate {
    pub fn new(column_name: impl Into<String>, port_count: usize) -> Self {
        Self {
            column_name: column_name.into(),
            column_order: vec![ColumnKind::Connector, ColumnKind::Resolution, ColumnKind::Rate],
            ports: vec![PortTemplate::default(); port_count],
        }
    }
}

/// Blueprint a node is spawned from, either the built-in default or a preset
/// from the library. Port lists are remapped to fresh ids and sequential
/// numbers on spawn; nothing from the template is shared by reference.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub title: String,
    pub signal_color: Option<SignalColor>,
    pub scale: f32,
    pub layout: LayoutDescriptor,
    pub system: SystemBlock,
    pub inputs: SectionTemplate,
    pub outputs: SectionTemplate,
}

impl Default for NodeTemplate {
    fn default() -> Self {
        Self {
            title: "Device".to_string(),
            signal_color: None,
            scale: 1.0,
            layout: LayoutDescriptor::default(),
            system: SystemBlock::default(),
            inputs: SectionTemplate::new("Inputs", 1),
            outputs: SectionTemplate::new("Outputs", 1),
        }
    }
}

/// The entire state of the Graph.
///
/// This struct holds all entities (Nodes, Ports, Connections) in flat Arenas
/// (`SlotMap`). It is responsible for data storage and referential integrity,
/// but not for rendering or interaction logic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphState {
    /// Arena for Nodes.
    pub nodes: SlotMap<NodeId, Node>,
    /// Arena for Ports.
    pub ports: SlotMap<PortId, Port>,
    /// Arena for Connections.
    pub connections: SlotMap<ConnectionId, Connection>,
    /// Draw order cache.
    /// Lower index = Background/Bottom.
    /// Higher index = Foreground/Top.
    pub draw_order: Vec<NodeId>,
    /// Index for O(1) UUID to NodeId lookup.
    #[serde(default, skip)]
    pub uuid_index: HashMap<Uuid, NodeId>,
    /// Bumped on every mutation. Geometry caches (anchors, pages) key off it.
    #[serde(default, skip)]
    pub revision: u64,
    /// Bumped when topology or declared colors change. The wire color cache
    /// keys off it; node drags do not invalidate it.
    #[serde(default, skip)]
    pub topology_revision: u64,
}

impl Default for GraphState {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            ports: SlotMap::with_key(),
            connections: SlotMap::with_key(),
            draw_order: Vec::new(),
            uuid_index: HashMap::new(),
            revision: 0,
            topology_revision: 0,
        }
    }
}

impl GraphState {
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn touch_topology(&mut self) {
        self.touch();
        self.topology_revision = self.topology_revision.wrapping_add(1);
    }

    /// Inserts a fully-formed node and updates the UUID index. Prefer
    /// [`GraphState::spawn_node`] for interactive creation.
    pub fn insert_node(&mut self, mut node: Node) -> NodeId {
        let id = self.nodes.insert_with_key(|key| {
            node.id = key;
            node
        });
        let uuid = self.nodes[id].uuid;
        self.uuid_index.insert(uuid, id);
        self.draw_order.push(id);
        self.touch_topology();
        id
    }

    /// Creates a node from a template, remapping its port lists to fresh ids
    /// and sequential numbers, at a random position inside `area`.
    pub fn spawn_node(&mut self, template: &NodeTemplate, area: Rect) -> NodeId {
        let mut rng = rand::thread_rng();
        let size = area.size();
        let position = Vec2::new(
            if size.x > 0.0 {
                area.min.x + rng.gen_range(0.0..size.x)
            } else {
                area.min.x
            },
            if size.y > 0.0 {
                area.min.y + rng.gen_range(0.0..size.y)
            } else {
                area.min.y
            },
        );

        let id = self.insert_node(Node {
            id: NodeId::default(),
            uuid: Uuid::new_v4(),
            title: template.title.clone(),
            signal_color: template.signal_color,
            position,
            scale: template.scale.clamp(MIN_NODE_SCALE, MAX_NODE_SCALE),
            layout: template.layout.clone(),
            system: template.system.clone(),
            input_section: PortSection::new(template.inputs.column_name.clone()),
            output_section: PortSection::new(template.outputs.column_name.clone()),
            flags: NodeFlags::default(),
        });

        // Column orders come from the template, port rows get fresh identities.
        self.nodes[id].input_section.column_order = template.inputs.column_order.clone();
        self.nodes[id].output_section.column_order = template.outputs.column_order.clone();
        for port in &template.inputs.ports {
            self.add_port_from(id, Direction::In, port);
        }
        for port in &template.outputs.ports {
            self.add_port_from(id, Direction::Out, port);
        }

        tracing::debug!(node = ?id, title = %self.nodes[id].title, "spawned node");
        id
    }

    /// Shallow-merges `patch` into the node. No-op if the node is absent.
    /// `scale` is clamped on every write.
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let mut topology_changed = false;
        if let Some(title) = patch.title {
            node.title = title;
        }
        if let Some(color) = patch.signal_color {
            topology_changed = node.signal_color != color;
            node.signal_color = color;
        }
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(scale) = patch.scale {
            node.scale = scale.clamp(MIN_NODE_SCALE, MAX_NODE_SCALE);
        }
        if let Some(layout) = patch.layout {
            node.layout = layout;
        }
        if let Some(system) = patch.system {
            node.system = system;
        }
        if topology_changed {
            self.touch_topology();
        } else {
            self.touch();
        }
    }

    /// Removes a node, every connection touching one of its ports, and its
    /// ports. Returns false if the node did not exist.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }

        let doomed: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|(_, c)| {
                self.ports.get(c.from).is_some_and(|p| p.node == id)
                    || self.ports.get(c.to).is_some_and(|p| p.node == id)
            })
            .map(|(cid, _)| cid)
            .collect();
        for cid in doomed {
            self.connections.remove(cid);
        }

        let Some(node) = self.nodes.remove(id) else {
            return false;
        };
        for pid in node
            .input_section
            .ports
            .iter()
            .chain(node.output_section.ports.iter())
        {
            self.ports.remove(*pid);
        }
        self.uuid_index.remove(&node.uuid);
        self.draw_order.retain(|&n| n != id);
        self.touch_topology();
        tracing::debug!(node = ?id, title = %node.title, "deleted node");
        true
    }

    /// Creates a wire between two anchors. The pair is normalized so `from`
    /// is the output-side anchor regardless of argument order.
    ///
    /// Rejections (same anchor, same direction, duplicate pair, occupied
    /// input) are normal interactive outcomes; no state changes on `Err`.
    pub fn add_connection(&mut self, a: PortId, b: PortId) -> Result<ConnectionId, ConnectError> {
        if a == b {
            return Err(ConnectError::SelfLoop);
        }
        let dir_a = self.ports.get(a).ok_or(ConnectError::UnknownAnchor)?.direction;
        let dir_b = self.ports.get(b).ok_or(ConnectError::UnknownAnchor)?.direction;
        let (from, to) = match (dir_a, dir_b) {
            (Direction::Out, Direction::In) => (a, b),
            (Direction::In, Direction::Out) => (b, a),
            _ => return Err(ConnectError::SameDirection),
        };
        if self
            .connections
            .values()
            .any(|c| c.from == from && c.to == to)
        {
            return Err(ConnectError::Duplicate);
        }
        if self.connections.values().any(|c| c.to == to) {
            return Err(ConnectError::InputOccupied);
        }

        let id = self.connections.insert_with_key(|key| Connection {
            id: key,
            from,
            to,
            label: None,
            enhanced: false,
            dash_pattern: None,
            flags: ConnectionFlags::default(),
        });
        self.touch_topology();
        tracing::debug!(connection = ?id, from = ?from, to = ?to, "added connection");
        Ok(id)
    }

    /// Removes a connection. Selection state goes with it since it lives on
    /// the connection itself.
    pub fn delete_connection(&mut self, id: ConnectionId) -> bool {
        let removed = self.connections.remove(id).is_some();
        if removed {
            self.touch_topology();
        }
        removed
    }

    fn add_port_from(&mut self, node: NodeId, direction: Direction, template: &PortTemplate) -> Option<PortId> {
        if !self.nodes.contains_key(node) {
            return None;
        }
        let pid = self.ports.insert_with_key(|key| Port {
            id: key,
            node,
            direction,
            number: 0, // assigned below
            connector: template.connector,
            resolution: template.resolution,
            refresh_rate: template.refresh_rate,
        });
        let Some(section) = self.section_mut(node, direction) else {
            self.ports.remove(pid);
            return None;
        };
        section.ports.push(pid);
        let number = section.ports.len() as u32;
        self.ports[pid].number = number;
        self.touch_topology();
        Some(pid)
    }

    /// Appends a port with default attributes to the given section.
    pub fn add_port(&mut self, node: NodeId, direction: Direction) -> Option<PortId> {
        self.add_port_from(node, direction, &PortTemplate::default())
    }

    /// Removes a port, its connections, and renumbers the remaining ports of
    /// the section so `number` stays `index + 1`.
    pub fn delete_port(&mut self, id: PortId) -> bool {
        let Some(port) = self.ports.get(id) else {
            return false;
        };
        let (node, direction) = (port.node, port.direction);

        let doomed: Vec<ConnectionId> = self
            .connections
            .iter()
            .filter(|(_, c)| c.from == id || c.to == id)
            .map(|(cid, _)| cid)
            .collect();
        for cid in doomed {
            self.connections.remove(cid);
        }

        let mut remaining = Vec::new();
        if let Some(section) = self.section_mut(node, direction) {
            section.ports.retain(|&p| p != id);
            remaining = section.ports.clone();
        }
        for (idx, pid) in remaining.into_iter().enumerate() {
            if let Some(p) = self.ports.get_mut(pid) {
                p.number = idx as u32 + 1;
            }
        }
        self.ports.remove(id);
        self.touch_topology();
        true
    }

    /// Shallow-merges `patch` into the port. No-op if the port is absent.
    pub fn update_port(&mut self, id: PortId, patch: PortPatch) {
        let Some(port) = self.ports.get_mut(id) else {
            return;
        };
        if let Some(connector) = patch.connector {
            port.connector = connector;
        }
        if let Some(resolution) = patch.resolution {
            port.resolution = resolution;
        }
        if let Some(rate) = patch.refresh_rate {
            port.refresh_rate = rate;
        }
        self.touch();
    }

    /// Moves a column token within a section's column order.
    pub fn move_column(&mut self, node: NodeId, direction: Direction, from: usize, to: usize) {
        let Some(section) = self.section_mut(node, direction) else {
            return;
        };
        if from >= section.column_order.len() || to >= section.column_order.len() {
            return;
        }
        let kind = section.column_order.remove(from);
        section.column_order.insert(to, kind);
        self.touch();
    }

    pub fn section(&self, node: NodeId, direction: Direction) -> Option<&PortSection> {
        self.nodes.get(node).map(|n| match direction {
            Direction::In => &n.input_section,
            Direction::Out => &n.output_section,
        })
    }

    pub fn section_mut(&mut self, node: NodeId, direction: Direction) -> Option<&mut PortSection> {
        self.nodes.get_mut(node).map(|n| match direction {
            Direction::In => &mut n.input_section,
            Direction::Out => &mut n.output_section,
        })
    }

    /// Approximate paper-space bounding box of a node (`base * scale` anchored
    /// at `position`).
    pub fn node_rect(&self, id: NodeId, base_size: Vec2) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        Some(Rect::new(node.position, base_size * node.scale))
    }

    /// Union of all node bounding boxes, or `None` for an empty graph.
    pub fn content_bounds(&self, base_size: Vec2) -> Option<Rect> {
        let mut iter = self.nodes.keys();
        let first = self.node_rect(iter.next()?, base_size)?;
        Some(iter.filter_map(|id| self.node_rect(id, base_size)).fold(
            first,
            |acc, r| acc.union(&r),
        ))
    }

    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.flags.contains(NodeFlags::SELECTED))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn selected_connections(&self) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .filter(|(_, c)| c.flags.contains(ConnectionFlags::SELECTED))
            .map(|(id, _)| id)
            .collect()
    }

    /// Clears node and wire selection.
    pub fn clear_selection(&mut self) {
        for (_, node) in &mut self.nodes {
            node.flags.remove(NodeFlags::SELECTED);
        }
        for (_, conn) in &mut self.connections {
            conn.flags.remove(ConnectionFlags::SELECTED);
        }
    }

    /// Click selection for a wire: toggles membership when `additive`,
    /// otherwise makes it the sole selection.
    pub fn select_connection(&mut self, id: ConnectionId, additive: bool) {
        if !self.connections.contains_key(id) {
            return;
        }
        if additive {
            self.connections[id].flags.toggle(ConnectionFlags::SELECTED);
        } else {
            self.clear_selection();
            self.connections[id].flags.insert(ConnectionFlags::SELECTED);
        }
    }
}
