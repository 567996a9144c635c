use glam::Vec2;
use patch_canvas::math::Rect;
use patch_canvas::model::{GraphState, NodeId, NodePatch, NodeTemplate};
use patch_canvas::pages::PageGrid;

const PAGE: Vec2 = Vec2::new(1123.0, 794.0); // A4 landscape
const BASE: Vec2 = Vec2::new(200.0, 150.0);

fn spawn_at(graph: &mut GraphState, pos: Vec2) -> NodeId {
    graph.spawn_node(&NodeTemplate::default(), Rect::new(pos, Vec2::ZERO))
}

#[test]
fn test_empty_graph_has_origin_page() {
    let graph = GraphState::default();
    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, BASE);

    assert_eq!(grid.pages().len(), 1);
    let page = &grid.pages()[0];
    assert_eq!((page.col, page.row), (0, 0));
    assert_eq!((page.x, page.y), (0.0, 0.0));
    assert_eq!(page.label, "Page 1");
}

#[test]
fn test_node_within_first_cell_yields_one_page() {
    let mut graph = GraphState::default();
    spawn_at(&mut graph, Vec2::new(100.0, 100.0));

    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, BASE);
    assert_eq!(grid.pages().len(), 1);
    assert_eq!((grid.pages()[0].col, grid.pages()[0].row), (0, 0));
}

#[test]
fn test_box_straddling_page_edge_yields_two_pages() {
    let mut graph = GraphState::default();
    // Box [page_w - 10, page_w + 10] x [0, 10].
    spawn_at(&mut graph, Vec2::new(PAGE.x - 10.0, 0.0));

    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, Vec2::new(20.0, 10.0));

    let cells: Vec<(i32, i32)> = grid.pages().iter().map(|p| (p.col, p.row)).collect();
    assert_eq!(cells, vec![(0, 0), (1, 0)]);
}

#[test]
fn test_origin_cell_always_included() {
    let mut graph = GraphState::default();
    spawn_at(&mut graph, Vec2::new(5000.0, 5000.0));

    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, BASE);

    let cells: Vec<(i32, i32)> = grid.pages().iter().map(|p| (p.col, p.row)).collect();
    assert!(cells.contains(&(0, 0)));
    assert!(cells.len() >= 2);
}

#[test]
fn test_negative_cells_and_scan_order_labels() {
    let mut graph = GraphState::default();
    // Box [-100, 100] x [-100, 50] covers four cells around the origin.
    spawn_at(&mut graph, Vec2::new(-100.0, -100.0));

    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, BASE);

    // Top-to-bottom then left-to-right, labeled sequentially in that order.
    let cells: Vec<(i32, i32)> = grid.pages().iter().map(|p| (p.col, p.row)).collect();
    assert_eq!(cells, vec![(-1, -1), (0, -1), (-1, 0), (0, 0)]);
    let labels: Vec<&str> = grid.pages().iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Page 1", "Page 2", "Page 3", "Page 4"]);

    // Geometry of a negative cell extends up/left from the origin.
    let first = &grid.pages()[0];
    assert_eq!((first.x, first.y), (-PAGE.x, -PAGE.y));
    assert_eq!((first.width, first.height), (PAGE.x, PAGE.y));
}

#[test]
fn test_output_is_stable_when_cells_unchanged() {
    let mut graph = GraphState::default();
    let a = spawn_at(&mut graph, Vec2::new(100.0, 100.0));

    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, BASE);
    let generation = grid.generation();

    // Moving within the same cell recomputes but does not rebuild the list.
    graph.update_node(
        a,
        NodePatch {
            position: Some(Vec2::new(150.0, 120.0)),
            ..NodePatch::default()
        },
    );
    grid.refresh(&graph, BASE);
    assert_eq!(grid.generation(), generation);

    // Crossing into another cell renumbers everything.
    graph.update_node(
        a,
        NodePatch {
            position: Some(Vec2::new(PAGE.x + 50.0, 100.0)),
            ..NodePatch::default()
        },
    );
    grid.refresh(&graph, BASE);
    assert_ne!(grid.generation(), generation);
    assert_eq!(grid.pages().len(), 2);
}

#[test]
fn test_scaled_node_coverage() {
    let mut graph = GraphState::default();
    // Scale 2 doubles the covered box: [800, 1200] x [0, 300] crosses the
    // first column boundary.
    let a = spawn_at(&mut graph, Vec2::new(800.0, 0.0));
    graph.update_node(
        a,
        NodePatch {
            scale: Some(2.0),
            ..NodePatch::default()
        },
    );

    let mut grid = PageGrid::new(PAGE);
    grid.refresh(&graph, BASE);
    let cells: Vec<(i32, i32)> = grid.pages().iter().map(|p| (p.col, p.row)).collect();
    assert_eq!(cells, vec![(0, 0), (1, 0)]);
}
