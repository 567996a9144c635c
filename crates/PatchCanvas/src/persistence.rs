//! # Project Persistence
//!
//! Serializable representations of the whole document. Transient `SlotMap`
//! keys never leave the process: nodes are identified by stable UUIDs and
//! ports by their index within their section, so a project survives
//! round-trips through the host's import/export collaborator.
//!
//! The core accepts a [`Project`] wholesale (replacing its entire
//! node/connection/selection state) and performs no validation beyond
//! applying documented defaults for absent settings; structural validation
//! is the persistence collaborator's concern.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{
    Connection, ConnectionFlags, Direction, GraphState, LayoutDescriptor, Node, NodeFlags,
    NodeId, NodeTemplate, PortSection, PortTemplate, SectionTemplate, SignalColor, SystemBlock,
};

/// Supported paper sizes for print tiling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A5,
    #[default]
    A4,
    A3,
    Letter,
    Tabloid,
}

impl PaperSize {
    /// Page dimensions in paper units (CSS pixels at 96 dpi), portrait.
    fn portrait(&self) -> Vec2 {
        match self {
            PaperSize::A5 => Vec2::new(559.0, 794.0),
            PaperSize::A4 => Vec2::new(794.0, 1123.0),
            PaperSize::A3 => Vec2::new(1123.0, 1587.0),
            PaperSize::Letter => Vec2::new(816.0, 1056.0),
            PaperSize::Tabloid => Vec2::new(1056.0, 1632.0),
        }
    }

    pub fn dimensions(&self, orientation: Orientation) -> Vec2 {
        let p = self.portrait();
        match orientation {
            Orientation::Portrait => p,
            Orientation::Landscape => Vec2::new(p.y, p.x),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Document-level settings. Every field has a documented default so projects
/// written by older versions load without them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub zoom: f32,
    pub paper_enabled: bool,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            orientation: Orientation::default(),
            zoom: 1.0,
            paper_enabled: true,
        }
    }
}

impl ProjectSettings {
    /// The page cell size implied by paper size and orientation.
    pub fn page_size(&self) -> Vec2 {
        self.paper_size.dimensions(self.orientation)
    }
}

/// A serializable representation of a Node.
///
/// Port rows reuse the template shape: `number` is implicit in the list
/// order and reassigned on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedNode {
    pub uuid: Uuid,
    pub title: String,
    pub signal_color: Option<SignalColor>,
    pub position: Vec2,
    pub scale: f32,
    pub layout: LayoutDescriptor,
    pub system: SystemBlock,
    pub inputs: SectionTemplate,
    pub outputs: SectionTemplate,
    pub flags: NodeFlags,
}

/// A serializable representation of a Connection.
///
/// Endpoints are stable node UUIDs plus the port's index within its section.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedConnection {
    pub from_node: Uuid,
    pub from_port_index: usize,
    pub to_node: Uuid,
    pub to_port_index: usize,
    pub label: Option<String>,
    pub enhanced: bool,
    pub dash_pattern: Option<String>,
}

/// A library preset: a named node blueprint. Spawning from a preset remaps
/// ports to fresh ids and numbers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub node: NodeTemplate,
}

/// The whole document as exchanged with the persistence collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub version: u32,
    #[serde(default)]
    pub settings: ProjectSettings,
    pub nodes: Vec<SavedNode>,
    pub connections: Vec<SavedConnection>,
    #[serde(default)]
    pub presets: Vec<Preset>,
}

fn section_template(graph: &GraphState, section: &PortSection) -> SectionTemplate {
    SectionTemplate {
        column_name: section.column_name.clone(),
        column_order: section.column_order.clone(),
        ports: section
            .ports
            .iter()
            .filter_map(|&pid| graph.ports.get(pid))
            .map(|p| PortTemplate {
                connector: p.connector,
                resolution: p.resolution,
                refresh_rate: p.refresh_rate,
            })
            .collect(),
    }
}

impl Project {
    /// Serializes the current graph state (selection stripped) together with
    /// the given settings.
    pub fn capture(
        name: impl Into<String>,
        settings: ProjectSettings,
        graph: &GraphState,
    ) -> Self {
        let mut nodes = Vec::new();
        // Draw order doubles as a stable serialization order.
        for &id in &graph.draw_order {
            let Some(node) = graph.nodes.get(id) else {
                continue;
            };
            nodes.push(SavedNode {
                uuid: node.uuid,
                title: node.title.clone(),
                signal_color: node.signal_color,
                position: node.position,
                scale: node.scale,
                layout: node.layout.clone(),
                system: node.system.clone(),
                inputs: section_template(graph, &node.input_section),
                outputs: section_template(graph, &node.output_section),
                flags: node.flags.difference(NodeFlags::SELECTED),
            });
        }

        let mut connections = Vec::new();
        for (_, conn) in &graph.connections {
            // Dangling endpoints are skipped rather than serialized.
            let Some(from_port) = graph.ports.get(conn.from) else {
                continue;
            };
            let Some(to_port) = graph.ports.get(conn.to) else {
                continue;
            };
            let Some(from_node) = graph.nodes.get(from_port.node) else {
                continue;
            };
            let Some(to_node) = graph.nodes.get(to_port.node) else {
                continue;
            };
            let Some(from_idx) = from_node
                .output_section
                .ports
                .iter()
                .position(|&p| p == conn.from)
            else {
                continue;
            };
            let Some(to_idx) = to_node.input_section.ports.iter().position(|&p| p == conn.to)
            else {
                continue;
            };
            connections.push(SavedConnection {
                from_node: from_node.uuid,
                from_port_index: from_idx,
                to_node: to_node.uuid,
                to_port_index: to_idx,
                label: conn.label.clone(),
                enhanced: conn.enhanced,
                dash_pattern: conn.dash_pattern.clone(),
            });
        }

        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            version: 1,
            settings,
            nodes,
            connections,
            presets: Vec::new(),
        }
    }

    /// Loads the project into `graph`, REPLACING the current state. Selection
    /// does not survive a load. Returns the settings for the canvas to apply.
    pub fn apply(&self, graph: &mut GraphState) -> ProjectSettings {
        *graph = GraphState::default();

        for saved in &self.nodes {
            let id = graph.insert_node(Node {
                id: NodeId::default(), // overwritten by insert
                uuid: saved.uuid,
                title: saved.title.clone(),
                signal_color: saved.signal_color,
                position: saved.position,
                scale: saved.scale.clamp(crate::model::MIN_NODE_SCALE, crate::model::MAX_NODE_SCALE),
                layout: saved.layout.clone(),
                system: saved.system.clone(),
                input_section: PortSection::new(saved.inputs.column_name.clone()),
                output_section: PortSection::new(saved.outputs.column_name.clone()),
                flags: saved.flags.difference(NodeFlags::SELECTED),
            });
            graph.nodes[id].input_section.column_order = saved.inputs.column_order.clone();
            graph.nodes[id].output_section.column_order = saved.outputs.column_order.clone();
            for port in &saved.inputs.ports {
                let template = PortTemplate {
                    connector: port.connector,
                    resolution: port.resolution,
                    refresh_rate: port.refresh_rate,
                };
                let _ = graph_add_port(graph, id, Direction::In, &template);
            }
            for port in &saved.outputs.ports {
                let template = PortTemplate {
                    connector: port.connector,
                    resolution: port.resolution,
                    refresh_rate: port.refresh_rate,
                };
                let _ = graph_add_port(graph, id, Direction::Out, &template);
            }
        }

        for saved in &self.connections {
            let from = self.port_at(graph, saved.from_node, Direction::Out, saved.from_port_index);
            let to = self.port_at(graph, saved.to_node, Direction::In, saved.to_port_index);
            if let (Some(from), Some(to)) = (from, to) {
                graph.connections.insert_with_key(|key| Connection {
                    id: key,
                    from,
                    to,
                    label: saved.label.clone(),
                    enhanced: saved.enhanced,
                    dash_pattern: saved.dash_pattern.clone(),
                    flags: ConnectionFlags::default(),
                });
            }
            // Connections referencing unknown nodes or out-of-range ports are
            // dropped; the document stays renderable.
        }

        tracing::info!(
            nodes = graph.nodes.len(),
            connections = graph.connections.len(),
            project = %self.name,
            "project loaded"
        );
        self.settings.clone()
    }

    fn port_at(
        &self,
        graph: &GraphState,
        node_uuid: Uuid,
        direction: Direction,
        index: usize,
    ) -> Option<crate::model::PortId> {
        let node_id = *graph.uuid_index.get(&node_uuid)?;
        graph
            .section(node_id, direction)?
            .ports
            .get(index)
            .copied()
    }
}

fn graph_add_port(
    graph: &mut GraphState,
    node: NodeId,
    direction: Direction,
    template: &PortTemplate,
) -> Option<crate::model::PortId> {
    let pid = graph.add_port(node, direction)?;
    graph.update_port(
        pid,
        crate::model::PortPatch {
            connector: Some(template.connector),
            resolution: Some(template.resolution),
            refresh_rate: Some(template.refresh_rate),
        },
    );
    Some(pid)
}
