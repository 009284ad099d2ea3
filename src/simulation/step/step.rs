//! The tick scheduler.

use crate::systems::behaviors::{self, UpdateContext};

use super::WorldCore;

/// One tick: a single in-place pass over the grid, bottom row first and
/// left to right within each row.
///
/// The scan order is load-bearing. Bottom-to-top lets gravity cascade
/// within one tick: a stack of falling particles compacts together because
/// each cell below has already vacated when the one above is visited. The
/// asymmetries are deliberate too - a cell swapped downward lands in
/// already-scanned territory and rests until the next tick, while a wet
/// token handed upward reaches a not-yet-scanned row and may act again in
/// the same pass. The scheduler itself visits every coordinate exactly
/// once and has no failure mode.
pub(super) fn step(world: &mut WorldCore) {
    let (grid, rng) = world.parts_mut();
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    for y in (0..height).rev() {
        for x in 0..width {
            let mut ctx = UpdateContext { grid: &mut *grid, x, y, rng: &mut *rng };
            behaviors::update_cell(&mut ctx);
        }
    }
    world.advance_tick();
}
