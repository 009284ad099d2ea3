//! External mutation commands - the paint tool surface.

use crate::core::error::EngineError;

use super::WorldCore;

pub(super) fn paint(world: &mut WorldCore, x: i32, y: i32, id: &str) -> Result<(), EngineError> {
    let material = world.registry().create(id)?;
    world.grid_mut().set(x, y, material);
    Ok(())
}

pub(super) fn paint_radius(
    world: &mut WorldCore,
    cx: i32,
    cy: i32,
    radius: i32,
    id: &str,
) -> Result<(), EngineError> {
    // Resolve the id once; every cell gets its own fresh instance.
    world.registry().create(id)?;
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                paint(world, cx + dx, cy + dy, id)?;
            }
        }
    }
    Ok(())
}

pub(super) fn erase_radius(world: &mut WorldCore, cx: i32, cy: i32, radius: i32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                world.grid_mut().set(cx + dx, cy + dy, crate::domain::material::Material::Air);
            }
        }
    }
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid_mut().clear();
    world.reset_tick();
}
