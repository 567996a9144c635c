use glam::Vec2;
use patch_canvas::anchors::EstimatedMeasurer;
use patch_canvas::input::{InputState, Key, ModifiersState, MouseButtons};
use patch_canvas::math::Rect;
use patch_canvas::model::{GraphState, NodeFlags, NodeId, NodeTemplate};
use patch_canvas::{Canvas, CanvasConfig, InteractionMode, LogicEvent};

fn spawn_at(graph: &mut GraphState, pos: Vec2) -> NodeId {
    graph.spawn_node(&NodeTemplate::default(), Rect::new(pos, Vec2::ZERO))
}

#[test]
fn test_panning() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();

    assert_eq!(canvas.view.transform.pan, Vec2::ZERO);

    // Start pan (middle click).
    let mut input = InputState {
        mouse_pos: Vec2::new(100.0, 100.0),
        mouse_buttons: MouseButtons {
            middle: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);
    match canvas.interaction_mode {
        InteractionMode::Panning { .. } => {}
        _ => panic!("Should be in Panning state"),
    }

    // Move mouse (still middle click).
    input.mouse_pos = Vec2::new(150.0, 120.0); // +50, +20
    canvas.update(&input, 0.016, &mut graph);
    assert_eq!(canvas.view.transform.pan, Vec2::new(50.0, 20.0));

    // Release: returns to Idle and publishes the settled transform at once.
    input.mouse_buttons.middle = false;
    let events = canvas.update(&input, 0.016, &mut graph);
    match canvas.interaction_mode {
        InteractionMode::Idle => {}
        _ => panic!("Should return to Idle"),
    }
    assert!(events.iter().any(|e| matches!(
        e,
        LogicEvent::TransformPublished(t) if t.pan == Vec2::new(50.0, 20.0)
    )));
    assert_eq!(canvas.publisher.published().pan, Vec2::new(50.0, 20.0));
}

#[test]
fn test_zooming_keeps_cursor_fixed() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();

    assert_eq!(canvas.view.transform.zoom, 1.0);

    // Mouse at (100, 100), scroll in. Zoom speed 0.1 -> factor 1.1.
    let input = InputState {
        mouse_pos: Vec2::new(100.0, 100.0),
        scroll_delta: 1.0,
        ..Default::default()
    };
    let before = canvas.view.screen_to_paper(Vec2::new(100.0, 100.0));
    canvas.update(&input, 0.016, &mut graph);

    assert!((canvas.view.transform.zoom - 1.1).abs() < 0.001);

    // Cursor-fixed-point invariant: the paper point under the cursor is
    // unchanged by the zoom.
    let after = canvas.view.screen_to_paper(Vec2::new(100.0, 100.0));
    assert!((after.x - before.x).abs() < 0.001);
    assert!((after.y - before.y).abs() < 0.001);

    // Pan = Screen - Paper * Zoom = 100 - 110 = -10.
    assert!((canvas.view.transform.pan.x - -10.0).abs() < 0.001);
    assert!((canvas.view.transform.pan.y - -10.0).abs() < 0.001);
}

#[test]
fn test_zoom_clamping() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();

    let input = InputState {
        scroll_delta: 1000.0,
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);
    assert_eq!(canvas.view.transform.zoom, 8.0);

    let input = InputState {
        scroll_delta: -100.0,
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);
    assert_eq!(canvas.view.transform.zoom, 0.05);
}

#[test]
fn test_selection_and_z_ordering() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();

    let node_1 = spawn_at(&mut graph, Vec2::new(100.0, 100.0));
    let node_2 = spawn_at(&mut graph, Vec2::new(150.0, 150.0));
    assert_eq!(graph.draw_order, vec![node_1, node_2]);

    // Click at (110, 110): inside node 1 only (node 2 starts at 150).
    let input = InputState {
        mouse_pos: Vec2::new(110.0, 110.0),
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);

    assert!(graph.nodes[node_1].flags.contains(NodeFlags::SELECTED));
    assert!(!graph.nodes[node_2].flags.contains(NodeFlags::SELECTED));

    // Node 1 moved to the end of draw_order (front).
    assert_eq!(graph.draw_order, vec![node_2, node_1]);

    match canvas.interaction_mode {
        InteractionMode::DraggingNodes { .. } => {}
        _ => panic!("Should be dragging"),
    }
}

#[test]
fn test_dragging() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();
    let node_id = spawn_at(&mut graph, Vec2::new(100.0, 100.0));

    let mut input = InputState {
        mouse_pos: Vec2::new(110.0, 110.0),
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);

    input.mouse_pos = Vec2::new(120.0, 120.0); // +10, +10
    canvas.update(&input, 0.016, &mut graph);
    assert_eq!(graph.nodes[node_id].position, Vec2::new(110.0, 110.0));

    // Release emits the final move event.
    input.mouse_buttons.left = false;
    let events = canvas.update(&input, 0.016, &mut graph);
    assert!(events.iter().any(|e| matches!(
        e,
        LogicEvent::NodesMoved { ids, delta }
            if ids == &vec![node_id] && *delta == Vec2::new(10.0, 10.0)
    )));
}

#[test]
fn test_locked_node_does_not_drag() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();
    let node_id = spawn_at(&mut graph, Vec2::new(100.0, 100.0));
    graph.nodes[node_id].flags.insert(NodeFlags::LOCKED);

    let mut input = InputState {
        mouse_pos: Vec2::new(110.0, 110.0),
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);
    input.mouse_pos = Vec2::new(200.0, 200.0);
    canvas.update(&input, 0.016, &mut graph);

    assert_eq!(graph.nodes[node_id].position, Vec2::new(100.0, 100.0));
}

#[test]
fn test_linking() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();

    let a = spawn_at(&mut graph, Vec2::new(0.0, 0.0));
    let b = spawn_at(&mut graph, Vec2::new(400.0, 0.0));
    let a_out = graph.nodes[a].output_section.ports[0];
    let b_in = graph.nodes[b].input_section.ports[0];

    canvas.settle(&graph, &EstimatedMeasurer::new(canvas.config.base_node_size));

    // Click the output anchor of A at (200, 75).
    let input_click = InputState {
        mouse_pos: Vec2::new(200.0, 75.0),
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let events = canvas.update(&input_click, 0.016, &mut graph);
    assert!(!events.iter().any(|e| matches!(e, LogicEvent::Connect { .. })));
    match canvas.interaction_mode {
        InteractionMode::Linking { source, .. } => assert_eq!(source, a_out),
        _ => panic!("Should be in Linking state"),
    }

    // Drag to the input anchor of B at (400, 75) and release.
    let input_drag = InputState {
        mouse_pos: Vec2::new(400.0, 75.0),
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input_drag, 0.016, &mut graph);

    let input_release = InputState {
        mouse_pos: Vec2::new(400.0, 75.0),
        ..Default::default()
    };
    let events = canvas.update(&input_release, 0.016, &mut graph);

    let connect = events
        .iter()
        .find(|e| matches!(e, LogicEvent::Connect { .. }))
        .expect("Connect event on release over an anchor");
    match connect {
        LogicEvent::Connect { from, to } => {
            assert_eq!(*from, a_out);
            assert_eq!(*to, b_in);
        }
        _ => unreachable!(),
    }
    match canvas.interaction_mode {
        InteractionMode::Idle => {}
        _ => panic!("Should be Idle"),
    }

    // The host applies the request through the store.
    graph.add_connection(a_out, b_in).expect("valid connection");
    assert_eq!(graph.connections.len(), 1);
}

#[test]
fn test_marquee_center_point_selection() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();

    // Base 200x150 at scale 1 -> center at (200, 175).
    let node_id = spawn_at(&mut graph, Vec2::new(100.0, 100.0));

    // Marquee (150,150)-(250,200) contains the center.
    canvas.interaction_mode = InteractionMode::BoxSelecting {
        start_pos_paper: Vec2::new(150.0, 150.0),
        current_pos_paper: Vec2::new(150.0, 150.0),
    };
    let release = InputState {
        mouse_pos: Vec2::new(250.0, 200.0),
        ..Default::default()
    };
    canvas.update(&release, 0.016, &mut graph);
    assert!(graph.nodes[node_id].flags.contains(NodeFlags::SELECTED));

    // Marquee (0,0)-(50,50) does not, even though it overlaps nothing less
    // than the box's corner region.
    graph.clear_selection();
    canvas.interaction_mode = InteractionMode::BoxSelecting {
        start_pos_paper: Vec2::new(0.0, 0.0),
        current_pos_paper: Vec2::new(0.0, 0.0),
    };
    let release = InputState {
        mouse_pos: Vec2::new(50.0, 50.0),
        ..Default::default()
    };
    canvas.update(&release, 0.016, &mut graph);
    assert!(!graph.nodes[node_id].flags.contains(NodeFlags::SELECTED));
}

#[test]
fn test_marquee_drag_from_empty_space() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();
    let near = spawn_at(&mut graph, Vec2::new(400.0, 400.0));
    let far = spawn_at(&mut graph, Vec2::new(2000.0, 2000.0));

    // Press on empty canvas, drag over the first node's center, release.
    let mut input = InputState {
        mouse_pos: Vec2::new(350.0, 350.0),
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input, 0.016, &mut graph);
    match canvas.interaction_mode {
        InteractionMode::BoxSelecting { .. } => {}
        _ => panic!("Should be BoxSelecting"),
    }

    input.mouse_pos = Vec2::new(650.0, 600.0);
    canvas.update(&input, 0.016, &mut graph);

    input.mouse_buttons.left = false;
    canvas.update(&input, 0.016, &mut graph);

    assert!(graph.nodes[near].flags.contains(NodeFlags::SELECTED));
    assert!(!graph.nodes[far].flags.contains(NodeFlags::SELECTED));
}

#[test]
fn test_shift_click_toggles_membership() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();
    let a = spawn_at(&mut graph, Vec2::new(0.0, 0.0));
    let b = spawn_at(&mut graph, Vec2::new(1000.0, 0.0));

    let click = |pos: Vec2, shift: bool| InputState {
        mouse_pos: pos,
        mouse_buttons: MouseButtons {
            left: true,
            ..Default::default()
        },
        modifiers: ModifiersState {
            shift,
            ..Default::default()
        },
        ..Default::default()
    };
    let release = InputState::default();

    // Plain click selects A.
    canvas.update(&click(Vec2::new(10.0, 10.0), false), 0.016, &mut graph);
    canvas.update(&release, 0.016, &mut graph);
    // Shift-click adds B.
    canvas.update(&click(Vec2::new(1010.0, 10.0), true), 0.016, &mut graph);
    canvas.update(&release, 0.016, &mut graph);
    assert!(graph.nodes[a].flags.contains(NodeFlags::SELECTED));
    assert!(graph.nodes[b].flags.contains(NodeFlags::SELECTED));

    // Shift-click on B again removes it, leaving A.
    canvas.update(&click(Vec2::new(1010.0, 10.0), true), 0.016, &mut graph);
    canvas.update(&release, 0.016, &mut graph);
    assert!(graph.nodes[a].flags.contains(NodeFlags::SELECTED));
    assert!(!graph.nodes[b].flags.contains(NodeFlags::SELECTED));

    // Plain click on A collapses to a singleton and empty-canvas click clears.
    canvas.update(&click(Vec2::new(10.0, 10.0), false), 0.016, &mut graph);
    canvas.update(&release, 0.016, &mut graph);
    canvas.update(&click(Vec2::new(5000.0, 5000.0), false), 0.016, &mut graph);
    canvas.update(&release, 0.016, &mut graph);
    assert!(graph.selected_nodes().is_empty());
}

#[test]
fn test_shortcuts() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();
    let node_id = spawn_at(&mut graph, Vec2::new(100.0, 100.0));
    graph.nodes[node_id].flags.insert(NodeFlags::SELECTED);

    // Delete requests deletion of the selection.
    let input_delete = InputState {
        pressed_keys: vec![Key::Delete],
        ..Default::default()
    };
    let events = canvas.update(&input_delete, 0.016, &mut graph);
    assert_eq!(events[0], LogicEvent::DeleteSelection);
    assert_eq!(events[1], LogicEvent::RepaintNeeded);

    // Ctrl+A selects all.
    graph.nodes[node_id].flags.remove(NodeFlags::SELECTED);
    let input_select_all = InputState {
        pressed_keys: vec![Key::A],
        modifiers: ModifiersState {
            ctrl: true,
            ..Default::default()
        },
        ..Default::default()
    };
    canvas.update(&input_select_all, 0.016, &mut graph);
    assert!(graph.nodes[node_id].flags.contains(NodeFlags::SELECTED));
}

#[test]
fn test_batch_delete_clears_selection_after_all_deletes() {
    let mut canvas = Canvas::new(CanvasConfig::default());
    let mut graph = GraphState::default();
    let a = spawn_at(&mut graph, Vec2::new(0.0, 0.0));
    let b = spawn_at(&mut graph, Vec2::new(500.0, 0.0));
    let c = spawn_at(&mut graph, Vec2::new(1000.0, 0.0));

    graph.nodes[a].flags.insert(NodeFlags::SELECTED);
    graph.nodes[b].flags.insert(NodeFlags::SELECTED);

    let removed = canvas.delete_selection(&mut graph);
    assert_eq!(removed, 2);
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.nodes.contains_key(c));
    assert!(graph.selected_nodes().is_empty());
}
