use glam::Vec2;
use patch_canvas::math::Rect;
use patch_canvas::model::{GraphState, NodeId, NodePatch, NodeTemplate, SignalColor};
use patch_canvas::wires::{ColorCache, trace_source_color};

fn spawn_at(graph: &mut GraphState, pos: Vec2) -> NodeId {
    graph.spawn_node(&NodeTemplate::default(), Rect::new(pos, Vec2::ZERO))
}

fn set_color(graph: &mut GraphState, id: NodeId, color: SignalColor) {
    graph.update_node(
        id,
        NodePatch {
            signal_color: Some(Some(color)),
            ..NodePatch::default()
        },
    );
}

/// A -> B -> C chain with default one-in/one-out nodes.
fn chain(graph: &mut GraphState) -> (NodeId, NodeId, NodeId) {
    let a = spawn_at(graph, Vec2::new(0.0, 0.0));
    let b = spawn_at(graph, Vec2::new(400.0, 0.0));
    let c = spawn_at(graph, Vec2::new(800.0, 0.0));
    let a_out = graph.nodes[a].output_section.ports[0];
    let b_in = graph.nodes[b].input_section.ports[0];
    let b_out = graph.nodes[b].output_section.ports[0];
    let c_in = graph.nodes[c].input_section.ports[0];
    graph.add_connection(a_out, b_in).expect("valid");
    graph.add_connection(b_out, c_in).expect("valid");
    (a, b, c)
}

#[test]
fn test_color_propagates_through_passthrough_devices() {
    let mut graph = GraphState::default();
    let (a, b, c) = chain(&mut graph);
    set_color(&mut graph, a, SignalColor::Teal);

    // The wire into C traces back through B to A's declared color.
    let b_out = graph.nodes[b].output_section.ports[0];
    let c_in = graph.nodes[c].input_section.ports[0];
    assert_eq!(trace_source_color(&graph, b_out), Some(SignalColor::Teal));
    assert_eq!(trace_source_color(&graph, c_in), Some(SignalColor::Teal));
}

#[test]
fn test_explicit_color_short_circuits() {
    let mut graph = GraphState::default();
    let (a, b, _c) = chain(&mut graph);
    set_color(&mut graph, a, SignalColor::Teal);
    set_color(&mut graph, b, SignalColor::Magenta);

    // B declares its own color, so the downstream wire never reaches A.
    let b_out = graph.nodes[b].output_section.ports[0];
    assert_eq!(trace_source_color(&graph, b_out), Some(SignalColor::Magenta));
}

#[test]
fn test_dead_end_yields_no_color() {
    let mut graph = GraphState::default();
    let (_a, _b, c) = chain(&mut graph);

    // Nothing upstream declares a color.
    let c_in = graph.nodes[c].input_section.ports[0];
    assert_eq!(trace_source_color(&graph, c_in), None);
}

#[test]
fn test_three_cycle_terminates_with_none() {
    let mut graph = GraphState::default();
    let a = spawn_at(&mut graph, Vec2::new(0.0, 0.0));
    let b = spawn_at(&mut graph, Vec2::new(400.0, 0.0));
    let c = spawn_at(&mut graph, Vec2::new(800.0, 0.0));

    // A -> B -> C -> A, none with an explicit color.
    let out = |g: &GraphState, n: NodeId| g.nodes[n].output_section.ports[0];
    let inp = |g: &GraphState, n: NodeId| g.nodes[n].input_section.ports[0];
    graph.add_connection(out(&graph, a), inp(&graph, b)).expect("valid");
    graph.add_connection(out(&graph, b), inp(&graph, c)).expect("valid");
    graph.add_connection(out(&graph, c), inp(&graph, a)).expect("valid");

    for n in [a, b, c] {
        assert_eq!(trace_source_color(&graph, out(&graph, n)), None);
        assert_eq!(trace_source_color(&graph, inp(&graph, n)), None);
    }
}

#[test]
fn test_dangling_anchor_yields_no_color() {
    let mut graph = GraphState::default();
    let a = spawn_at(&mut graph, Vec2::ZERO);
    let a_out = graph.nodes[a].output_section.ports[0];
    graph.delete_node(a);

    assert_eq!(trace_source_color(&graph, a_out), None);
}

#[test]
fn test_color_cache_rebuilds_on_topology_change_only() {
    let mut graph = GraphState::default();
    let (a, b, _c) = chain(&mut graph);
    set_color(&mut graph, a, SignalColor::Blue);
    let b_out_wire = {
        let b_out = graph.nodes[b].output_section.ports[0];
        graph
            .connections
            .iter()
            .find(|(_, conn)| conn.from == b_out)
            .map(|(id, _)| id)
            .expect("wire exists")
    };

    let mut cache = ColorCache::new();
    cache.refresh(&graph);
    assert_eq!(cache.color_of(b_out_wire), Some(SignalColor::Blue));

    // A pure move does not bump the topology revision; the memo stays valid
    // without a rebuild and keeps answering in O(1).
    let rev_before = graph.topology_revision;
    graph.update_node(
        a,
        NodePatch {
            position: Some(Vec2::new(50.0, 50.0)),
            ..NodePatch::default()
        },
    );
    assert_eq!(graph.topology_revision, rev_before);
    cache.refresh(&graph);
    assert_eq!(cache.color_of(b_out_wire), Some(SignalColor::Blue));

    // A color change is a topology-relevant mutation and invalidates.
    set_color(&mut graph, a, SignalColor::Red);
    assert_ne!(graph.topology_revision, rev_before);
    cache.refresh(&graph);
    assert_eq!(cache.color_of(b_out_wire), Some(SignalColor::Red));
}
