use glam::Vec2;
use std::collections::HashMap;

use crate::anchors::AnchorRegistry;
use crate::config::CanvasConfig;
use crate::input::{self, InputState};
use crate::model::{self, Direction, GraphState, NodeFlags, NodeId, NodePatch};
use crate::view::{self, Transform, TransformPublisher, View};

/// Events emitted by the Canvas logic to the host application.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// Request to connect two anchors. The host applies it through
    /// [`GraphState::add_connection`], which normalizes direction and rejects
    /// invalid pairs.
    Connect {
        from: model::PortId,
        to: model::PortId,
    },
    /// Request to delete selected nodes and wires.
    DeleteSelection,
    /// A selection of nodes was moved.
    NodesMoved {
        ids: Vec<model::NodeId>,
        /// The delta applied in Paper Space.
        delta: Vec2,
    },
    /// The debounced transform settled; the host should persist it into the
    /// durable state tree.
    TransformPublished(Transform),
    /// The graph visual state has changed, requiring a repaint.
    RepaintNeeded,
}

/// The current state of user interaction.
#[derive(Clone, Debug)]
pub enum InteractionMode {
    /// No active interaction.
    Idle,
    /// User is panning the canvas (middle click).
    Panning {
        /// Pointer position at start of drag (Screen Space).
        start_drag: Vec2,
        /// Transform at start of drag.
        initial_transform: Transform,
    },
    /// User is moving a selection of nodes. The drag consumes pointer
    /// move/up globally until release.
    DraggingNodes {
        /// The list of nodes being dragged.
        nodes: Vec<NodeId>,
        /// Initial positions of the nodes when drag started (Paper Space).
        initial_positions: HashMap<NodeId, Vec2>,
        /// Pointer position when drag started (Paper Space).
        start_mouse_paper: Vec2,
    },
    /// User is creating a wire.
    Linking {
        /// The anchor where the wire started.
        source: model::PortId,
        /// Current temporary endpoint of the wire (Paper Space).
        curr_pos_paper: Vec2,
    },
    /// User is drawing a marquee on empty canvas space.
    BoxSelecting {
        /// Start of the marquee (Paper Space).
        start_pos_paper: Vec2,
        /// Current end of the marquee (Paper Space).
        current_pos_paper: Vec2,
    },
}

/// Handles user interactions and updates the graph/view state.
///
/// This function acts as the central state machine for the Canvas. It
/// processes input based on the current `InteractionMode`, transitions
/// between states, and emits `LogicEvent`s when significant actions occur.
/// High-frequency pan/zoom writes go straight to `view`; `publisher` is
/// re-armed so the durable state catches up after the debounce.
#[allow(clippy::too_many_arguments)]
pub fn handle_interactions(
    mode: &mut InteractionMode,
    view: &mut View,
    publisher: &mut TransformPublisher,
    config: &CanvasConfig,
    input: &InputState,
    graph: &mut GraphState,
    anchors: &AnchorRegistry,
    events: &mut Vec<LogicEvent>,
) {
    // Zooming via scroll, anchored at the cursor.
    if input.scroll_delta != 0.0 {
        let old_zoom = view.transform.zoom;
        let factor = 1.0 + (input.scroll_delta * config.zoom_speed);
        let new_zoom = (old_zoom * factor).clamp(view::MIN_ZOOM, view::MAX_ZOOM);

        if (new_zoom - old_zoom).abs() > f32::EPSILON {
            view.zoom_at(input.mouse_pos, new_zoom);
            publisher.touch();
            events.push(LogicEvent::RepaintNeeded);
        }
    }

    // Keyboard Shortcuts
    if !input.event_consumed_by_content {
        for key in &input.pressed_keys {
            match key {
                input::Key::Delete | input::Key::Backspace => {
                    events.push(LogicEvent::DeleteSelection);
                    events.push(LogicEvent::RepaintNeeded);
                }
                input::Key::A => {
                    if input.modifiers.ctrl || input.modifiers.meta {
                        for (_, node) in &mut graph.nodes {
                            node.flags.insert(NodeFlags::SELECTED);
                        }
                        events.push(LogicEvent::RepaintNeeded);
                    }
                }
            }
        }
    }

    let next_mode = match mode {
        InteractionMode::Idle => handle_idle(view, config, input, graph, anchors, events),
        InteractionMode::Panning {
            start_drag,
            initial_transform,
        } => handle_panning(view, publisher, input, *start_drag, *initial_transform, events),
        InteractionMode::DraggingNodes {
            nodes,
            initial_positions,
            start_mouse_paper,
        } => handle_dragging_nodes(
            view,
            input,
            graph,
            nodes,
            initial_positions,
            *start_mouse_paper,
            events,
        ),
        InteractionMode::Linking {
            source,
            curr_pos_paper,
        } => handle_linking(
            view,
            config,
            input,
            graph,
            anchors,
            *source,
            curr_pos_paper,
            events,
        ),
        InteractionMode::BoxSelecting {
            start_pos_paper,
            current_pos_paper,
        } => handle_box_selecting(
            view,
            config,
            input,
            graph,
            *start_pos_paper,
            current_pos_paper,
            events,
        ),
    };

    if let Some(new_mode) = next_mode {
        *mode = new_mode;
    }
}

/// Finds the nearest compatible anchor to `paper_pos` within `radius`.
///
/// Compatible means: not the source itself, opposite direction if a source is
/// given, owner not hidden, and the input side of the would-be pair not
/// already occupied.
fn nearest_anchor(
    graph: &GraphState,
    anchors: &AnchorRegistry,
    paper_pos: Vec2,
    radius: f32,
    source: Option<model::PortId>,
) -> Option<model::PortId> {
    let source_dir = source.and_then(|s| graph.ports.get(s)).map(|p| p.direction);
    let mut best = None;
    let mut best_dist = radius;

    for (anchor, pos, direction) in anchors.resolved() {
        if Some(anchor) == source {
            continue;
        }
        if let Some(sd) = source_dir {
            if direction == sd {
                continue;
            }
            // The input end of the pair must still be free.
            let input_end = if direction == Direction::In { anchor } else { source.unwrap_or(anchor) };
            if graph.connections.values().any(|c| c.to == input_end) {
                continue;
            }
        }
        let hidden = graph
            .ports
            .get(anchor)
            .and_then(|p| graph.nodes.get(p.node))
            .is_none_or(|n| n.flags.contains(NodeFlags::HIDDEN));
        if hidden {
            continue;
        }
        let dist = pos.distance(paper_pos);
        if dist < best_dist {
            best_dist = dist;
            best = Some(anchor);
        }
    }
    best
}

/// Handles the `Idle` state interactions.
///
/// This checks for inputs to transition into:
/// - `Panning` (middle click)
/// - `Linking` (clicking an anchor)
/// - `DraggingNodes` (clicking a node)
/// - `BoxSelecting` (clicking empty space)
fn handle_idle(
    view: &View,
    config: &CanvasConfig,
    input: &InputState,
    graph: &mut GraphState,
    anchors: &AnchorRegistry,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if input.mouse_buttons.middle && !input.event_consumed_by_content {
        return Some(InteractionMode::Panning {
            start_drag: input.mouse_pos,
            initial_transform: view.transform,
        });
    } else if input.mouse_buttons.left && !input.event_consumed_by_content {
        let paper_mouse = view.screen_to_paper(input.mouse_pos);

        // Hit test anchors FIRST (priority over the node body).
        let hit_radius = (config.snap_threshold / view.transform.zoom).max(5.0);
        if let Some(anchor) = nearest_anchor(graph, anchors, paper_mouse, hit_radius, None) {
            return Some(InteractionMode::Linking {
                source: anchor,
                curr_pos_paper: paper_mouse,
            });
        }

        // Hit test nodes, in reverse draw order (front to back).
        let mut hit_node = None;
        for &node_id in graph.draw_order.iter().rev() {
            if let Some(node) = graph.nodes.get(node_id)
                && !node.flags.contains(NodeFlags::HIDDEN)
                && let Some(rect) = graph.node_rect(node_id, config.base_node_size)
                && rect.contains(paper_mouse)
            {
                hit_node = Some(node_id);
                break;
            }
        }

        if let Some(node_id) = hit_node {
            if input.modifiers.shift {
                // Toggle membership; a shift-click that deselects starts no drag.
                if let Some(node) = graph.nodes.get_mut(node_id) {
                    node.flags.toggle(NodeFlags::SELECTED);
                    if !node.flags.contains(NodeFlags::SELECTED) {
                        events.push(LogicEvent::RepaintNeeded);
                        return Some(InteractionMode::Idle);
                    }
                }
            } else if let Some(node) = graph.nodes.get(node_id)
                && !node.flags.contains(NodeFlags::SELECTED)
            {
                // Singleton selection.
                graph.clear_selection();
                if let Some(node) = graph.nodes.get_mut(node_id) {
                    node.flags.insert(NodeFlags::SELECTED);
                }
            }

            // Bring to front
            graph.draw_order.retain(|&id| id != node_id);
            graph.draw_order.push(node_id);
            events.push(LogicEvent::RepaintNeeded);

            // Transition to dragging everything selected (locked nodes stay put).
            let mut initial_positions = HashMap::new();
            let mut selected_nodes = Vec::new();
            for (id, node) in &graph.nodes {
                if node.flags.contains(NodeFlags::SELECTED)
                    && !node.flags.contains(NodeFlags::LOCKED)
                {
                    selected_nodes.push(id);
                    initial_positions.insert(id, node.position);
                }
            }

            return Some(InteractionMode::DraggingNodes {
                nodes: selected_nodes,
                initial_positions,
                start_mouse_paper: paper_mouse,
            });
        } else {
            // Clicked empty canvas: clear node and wire selection unless adding.
            if !input.modifiers.shift {
                graph.clear_selection();
            }

            return Some(InteractionMode::BoxSelecting {
                start_pos_paper: paper_mouse,
                current_pos_paper: paper_mouse,
            });
        }
    }
    None
}

/// Handles the `Panning` state interactions.
///
/// Updates the view's pan offset from the pointer delta, re-arming the
/// publish debounce each move. Flushes the publisher and returns to `Idle`
/// on release.
fn handle_panning(
    view: &mut View,
    publisher: &mut TransformPublisher,
    input: &InputState,
    start_drag: Vec2,
    initial_transform: Transform,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.mouse_buttons.middle {
        if let Some(t) = publisher.flush(view.transform) {
            events.push(LogicEvent::TransformPublished(t));
        }
        Some(InteractionMode::Idle)
    } else {
        let delta = input.mouse_pos - start_drag;
        view.transform.pan = initial_transform.pan + delta;
        publisher.touch();
        events.push(LogicEvent::RepaintNeeded);
        None
    }
}

/// Handles the `DraggingNodes` state interactions.
///
/// Updates the position of all dragged nodes from the pointer delta.
/// Emits `NodesMoved` and returns to `Idle` on release.
fn handle_dragging_nodes(
    view: &View,
    input: &InputState,
    graph: &mut GraphState,
    nodes: &[NodeId],
    initial_positions: &HashMap<NodeId, Vec2>,
    start_mouse_paper: Vec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.mouse_buttons.left {
        // Report the movement that was actually applied, taken from any
        // dragged node's displacement.
        let delta = nodes
            .iter()
            .find_map(|id| {
                let initial = initial_positions.get(id)?;
                let node = graph.nodes.get(*id)?;
                Some(node.position - *initial)
            })
            .unwrap_or(Vec2::ZERO);
        if delta != Vec2::ZERO {
            events.push(LogicEvent::NodesMoved {
                ids: nodes.to_vec(),
                delta,
            });
        }
        Some(InteractionMode::Idle)
    } else {
        let current_mouse_paper = view.screen_to_paper(input.mouse_pos);
        let delta = current_mouse_paper - start_mouse_paper;
        for node_id in nodes.iter() {
            if let Some(initial_pos) = initial_positions.get(node_id) {
                graph.update_node(
                    *node_id,
                    NodePatch {
                        position: Some(*initial_pos + delta),
                        ..NodePatch::default()
                    },
                );
            }
        }
        events.push(LogicEvent::RepaintNeeded);
        None
    }
}

/// Handles the `Linking` state interactions.
///
/// Updates the temporary wire endpoint and snaps to valid anchors.
/// Emits `LogicEvent::Connect` on release over a valid target.
#[allow(clippy::too_many_arguments)]
fn handle_linking(
    view: &View,
    config: &CanvasConfig,
    input: &InputState,
    graph: &GraphState,
    anchors: &AnchorRegistry,
    source: model::PortId,
    curr_pos_paper: &mut Vec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    let paper_mouse = view.screen_to_paper(input.mouse_pos);
    *curr_pos_paper = paper_mouse;
    events.push(LogicEvent::RepaintNeeded);

    let snap_radius = config.snap_threshold / view.transform.zoom;
    let snap_target = nearest_anchor(graph, anchors, paper_mouse, snap_radius, Some(source));

    if let Some(target) = snap_target
        && let Some(pos) = anchors.resolve(target)
    {
        *curr_pos_paper = pos; // Snap visual
    }

    if !input.mouse_buttons.left {
        if let Some(target) = snap_target {
            events.push(LogicEvent::Connect {
                from: source,
                to: target,
            });
            events.push(LogicEvent::RepaintNeeded);
        }
        return Some(InteractionMode::Idle);
    }
    None
}

/// Handles the `BoxSelecting` (marquee) state interactions.
///
/// On release, selects every visible node whose bounding-box *center* lies
/// inside the normalized marquee rectangle; matches are unioned into the
/// existing selection (which was already replaced at press time unless the
/// modifier was held).
fn handle_box_selecting(
    view: &View,
    config: &CanvasConfig,
    input: &InputState,
    graph: &mut GraphState,
    start_pos_paper: Vec2,
    current_pos_paper: &mut Vec2,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    let paper_mouse = view.screen_to_paper(input.mouse_pos);
    *current_pos_paper = paper_mouse;
    events.push(LogicEvent::RepaintNeeded);

    if !input.mouse_buttons.left {
        let marquee = crate::math::Rect::from_corners(start_pos_paper, *current_pos_paper);

        for (_, node) in &mut graph.nodes {
            if node.flags.contains(NodeFlags::HIDDEN) {
                continue;
            }
            let center = node.position + config.base_node_size * node.scale * 0.5;
            if marquee.contains(center) {
                node.flags.insert(NodeFlags::SELECTED);
            }
        }
        events.push(LogicEvent::RepaintNeeded);

        return Some(InteractionMode::Idle);
    }
    None
}
