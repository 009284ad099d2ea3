//! State codec - versioned sparse snapshots.
//!
//! A snapshot records the grid dimensions and one tuple per non-air cell:
//! coordinates, kind name and the kind-specific mutable fields. Static
//! attributes (name, base color, density, capability flags) are never
//! serialized - they are reconstructed from the catalog. Restoring builds a
//! fresh default instance per tuple and overlays the recorded fields, so
//! snapshots taken by older builds with fewer fields still load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::error::EngineError;
use crate::domain::material::{Material, MaterialKind};

use super::WorldCore;

pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub version: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<PixelRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelRecord {
    pub x: i32,
    pub y: i32,
    pub material: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub state: Value,
}

pub(super) fn capture(world: &WorldCore) -> WorldSnapshot {
    let grid = world.grid();
    let mut pixels = Vec::new();
    grid.for_each(|x, y, material| {
        if material.kind() == MaterialKind::Air {
            return;
        }
        pixels.push(PixelRecord {
            x,
            y,
            material: material.kind().name().to_string(),
            state: state_value(material),
        });
    });
    WorldSnapshot {
        version: SNAPSHOT_VERSION.to_string(),
        width: grid.width(),
        height: grid.height(),
        pixels,
    }
}

pub(super) fn restore(world: &mut WorldCore, snap: &WorldSnapshot) -> Result<(), EngineError> {
    // Validate everything before touching a single cell.
    if snap.version != SNAPSHOT_VERSION {
        return Err(EngineError::VersionMismatch { found: snap.version.clone() });
    }
    let (width, height) = (world.width(), world.height());
    if snap.width != width || snap.height != height {
        return Err(EngineError::DimensionMismatch {
            width,
            height,
            found_width: snap.width,
            found_height: snap.height,
        });
    }

    let grid = world.grid_mut();
    grid.clear();
    for record in &snap.pixels {
        let Some(kind) = MaterialKind::from_name(&record.material) else {
            warn!(kind = %record.material, x = record.x, y = record.y, "skipping unknown material kind");
            continue;
        };
        grid.set(record.x, record.y, materialize(kind, &record.state));
    }
    Ok(())
}

/// Kind-specific field snapshot, or null for stateless kinds.
fn state_value(material: &Material) -> Value {
    match material {
        Material::Air | Material::Badrock | Material::Stone | Material::Water => Value::Null,
        Material::WaterSource(st) => to_value(st),
        Material::EarthDry(st) => to_value(st),
        Material::EarthWet(st) => to_value(st),
        Material::Seed(st) => to_value(st),
        Material::RootDry(st) | Material::RootWet(st) => to_value(st),
        Material::StemDry(st) | Material::StemWet(st) => to_value(st),
        Material::LeafDry(st) | Material::LeafWet(st) => to_value(st),
        Material::Bloom(st) => to_value(st),
        Material::Flower(st) => to_value(st),
        Material::Cloud(st) => to_value(st),
    }
}

fn to_value<T: Serialize>(state: &T) -> Value {
    serde_json::to_value(state).unwrap_or(Value::Null)
}

/// Fresh default instance of `kind` with the recorded fields overlaid.
fn materialize(kind: MaterialKind, state: &Value) -> Material {
    match kind {
        MaterialKind::Air => Material::Air,
        MaterialKind::Badrock => Material::Badrock,
        MaterialKind::Stone => Material::Stone,
        MaterialKind::Water => Material::Water,
        MaterialKind::WaterSource => Material::WaterSource(overlay(state)),
        MaterialKind::EarthDry => Material::EarthDry(overlay(state)),
        MaterialKind::EarthWet => Material::EarthWet(overlay(state)),
        MaterialKind::Seed => Material::Seed(overlay(state)),
        MaterialKind::RootDry => Material::RootDry(overlay(state)),
        MaterialKind::RootWet => Material::RootWet(overlay(state)),
        MaterialKind::StemDry => Material::StemDry(overlay(state)),
        MaterialKind::StemWet => Material::StemWet(overlay(state)),
        MaterialKind::LeafDry => Material::LeafDry(overlay(state)),
        MaterialKind::LeafWet => Material::LeafWet(overlay(state)),
        MaterialKind::Bloom => Material::Bloom(overlay(state)),
        MaterialKind::Flower => Material::Flower(overlay(state)),
        MaterialKind::Cloud => Material::Cloud(overlay(state)),
    }
}

fn overlay<T: DeserializeOwned + Default>(state: &Value) -> T {
    if state.is_null() {
        return T::default();
    }
    match serde_json::from_value(state.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(%err, "unreadable state snapshot, using defaults");
            T::default()
        }
    }
}
