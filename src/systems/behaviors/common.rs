//! Shared query helpers used across material families: neighbor counting,
//! weighted random choice, radius scans and the plant-graph search.

use std::collections::HashSet;

use crate::core::random::next_f32;
use crate::domain::material::MaterialKind;
use crate::spatial::grid::PixelGrid;

/// 4-neighborhood offsets in probe order: up, down, left, right.
pub const CARDINALS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Count 4-neighbors whose kind satisfies `pred`. Out-of-range neighbors
/// simply do not count.
pub fn count_neighbors(
    grid: &PixelGrid,
    x: i32,
    y: i32,
    pred: impl Fn(MaterialKind) -> bool,
) -> usize {
    CARDINALS
        .iter()
        .filter(|(dx, dy)| grid.kind(x + dx, y + dy).is_some_and(&pred))
        .count()
}

/// Weighted random choice over `(value, weight)` pairs. Weights need not
/// sum to one; the draw is uniform over the total mass. `options` must be
/// non-empty.
pub fn weighted_pick<'a, T>(rng: &mut u32, options: &'a [(T, f32)]) -> &'a T {
    let total: f32 = options.iter().map(|(_, w)| w).sum();
    let mut roll = next_f32(rng) * total;
    for (value, weight) in options {
        roll -= weight;
        if roll <= 0.0 {
            return value;
        }
    }
    &options[0].0
}

/// True if any cell within the square of `radius` around `(x, y)` satisfies
/// `pred`. The center cell itself is included.
pub fn kind_in_radius(
    grid: &PixelGrid,
    x: i32,
    y: i32,
    radius: i32,
    pred: impl Fn(MaterialKind) -> bool,
) -> bool {
    for cy in (y - radius)..=(y + radius) {
        for cx in (x - radius)..=(x + radius) {
            if grid.kind(cx, cy).is_some_and(&pred) {
                return true;
            }
        }
    }
    false
}

/// Canopy isolation rule: a cell can hold a leaf only if all of its
/// in-range neighbors are Air or Leaf. `exempt` excuses the spawning stem.
pub fn leaf_can_settle(grid: &PixelGrid, x: i32, y: i32, exempt: Option<(i32, i32)>) -> bool {
    for (dx, dy) in CARDINALS {
        let (nx, ny) = (x + dx, y + dy);
        if exempt == Some((nx, ny)) {
            continue;
        }
        match grid.kind(nx, ny) {
            None => continue,
            Some(MaterialKind::Air) => continue,
            Some(k) if k.is_leaf() => continue,
            Some(_) => return false,
        }
    }
    true
}

/// Depth-first search over the plant graph.
///
/// The graph has no edge list: adjacency is the 4-neighborhood filtered to
/// root/stem kinds. Children are explored down, then left, then right; the
/// visited set guarantees termination on cyclic stem layouts. Returns the
/// first node for which `accept` holds. The accept check runs on every
/// reached node, including non-plant ones at the fringe, but only plant
/// nodes are expanded.
pub fn search_plant_graph(
    grid: &PixelGrid,
    start_x: i32,
    start_y: i32,
    accept: impl Fn(&PixelGrid, i32, i32) -> bool,
) -> Option<(i32, i32)> {
    const PRIORITY: [(i32, i32); 3] = [(0, 1), (-1, 0), (1, 0)];

    let mut visited: HashSet<(i32, i32)> = HashSet::new();
    let mut stack = vec![(start_x, start_y)];

    while let Some((x, y)) = stack.pop() {
        if !grid.in_bounds(x, y) || !visited.insert((x, y)) {
            continue;
        }
        if accept(grid, x, y) {
            return Some((x, y));
        }
        let Some(kind) = grid.kind(x, y) else { continue };
        if kind.is_plant() {
            // Reverse push so the first priority pops first.
            for (dx, dy) in PRIORITY.iter().rev() {
                stack.push((x + dx, y + dy));
            }
        }
    }
    None
}
