//! # Page Grid
//!
//! Partitions the unbounded canvas into fixed-size page cells for print
//! tiling. Cell `(0, 0)` covers paper-space `[0, page_w) x [0, page_h)`;
//! negative indices extend up/left. Only cells actually covered by a node's
//! bounding box are materialized (plus the origin cell, always), so the
//! canvas can grow in any direction without a dense grid.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::Serialize;

use crate::model::GraphState;

/// One occupied page cell. Derived, never authoritative: recomputed from node
/// bounds and only cached for render stability.
///
/// `label` is positional ("Page 1", "Page 2", ... in scan order), not a
/// stable identifier: a node moving to a new region can renumber all pages.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    pub col: i32,
    pub row: i32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
}

/// Sparse occupied-cell computation with a reference-stable output list.
pub struct PageGrid {
    page_size: Vec2,
    cells: BTreeSet<(i32, i32)>,
    pages: Vec<Page>,
    built_rev: Option<u64>,
    built_base: Vec2,
    generation: u64,
}

impl PageGrid {
    pub fn new(page_size: Vec2) -> Self {
        Self {
            page_size,
            cells: BTreeSet::new(),
            pages: Vec::new(),
            built_rev: None,
            built_base: Vec2::ZERO,
            generation: 0,
        }
    }

    pub fn page_size(&self) -> Vec2 {
        self.page_size
    }

    /// Changes the page cell size (paper size or orientation change).
    pub fn set_page_size(&mut self, size: Vec2) {
        if self.page_size != size {
            self.page_size = size;
            self.built_rev = None;
        }
    }

    /// Recomputes the occupied cells if the graph changed. The `pages` list
    /// keeps its identity (no rebuild, same `generation`) when the occupied
    /// set is unchanged, letting consumers skip re-render.
    pub fn refresh(&mut self, graph: &GraphState, base_node_size: Vec2) {
        if self.built_rev == Some(graph.revision) && self.built_base == base_node_size {
            return;
        }
        let cells = self.occupied_cells(graph, base_node_size);
        self.built_rev = Some(graph.revision);
        self.built_base = base_node_size;
        if cells == self.cells {
            return;
        }

        self.pages = cells
            .iter()
            .enumerate()
            .map(|(i, &(row, col))| Page {
                col,
                row,
                x: col as f32 * self.page_size.x,
                y: row as f32 * self.page_size.y,
                width: self.page_size.x,
                height: self.page_size.y,
                label: format!("Page {}", i + 1),
            })
            .collect();
        self.cells = cells;
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(pages = self.pages.len(), "page grid rebuilt");
    }

    // Keys are (row, col) so the BTreeSet iterates top-to-bottom then
    // left-to-right, which is exactly the label scan order.
    fn occupied_cells(&self, graph: &GraphState, base_node_size: Vec2) -> BTreeSet<(i32, i32)> {
        let mut cells = BTreeSet::new();
        cells.insert((0, 0));

        for id in graph.nodes.keys() {
            let Some(rect) = graph.node_rect(id, base_node_size) else {
                continue;
            };
            let col_start = (rect.min.x / self.page_size.x).floor() as i32;
            let col_end = ((rect.max.x - 1.0) / self.page_size.x).floor() as i32;
            let row_start = (rect.min.y / self.page_size.y).floor() as i32;
            let row_end = ((rect.max.y - 1.0) / self.page_size.y).floor() as i32;
            for row in row_start..=row_end.max(row_start) {
                for col in col_start..=col_end.max(col_start) {
                    cells.insert((row, col));
                }
            }
        }
        cells
    }

    /// The occupied pages, sorted top-to-bottom then left-to-right.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Bumped once per actual rebuild of the page list.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
