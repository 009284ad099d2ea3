//! Material catalog - kinds, static properties and per-cell state records.
//!
//! A material is a closed sum type: the kind tag selects the behavior, the
//! payload is a small `Copy` record of that kind's mutable fields (cooldowns,
//! counters, flags, biases). The record travels with its cell through swaps,
//! so a falling particle keeps its counters while in transit.

use serde::{Deserialize, Serialize};

/// Packed `0x00RRGGBB` display color.
pub type Color = u32;

pub const AIR_COLOR: Color = 0x000000;

const FLASH_COLOR: Color = 0xFFFF99;
const FLOWER_BLOOM_COLOR: Color = 0xFF69B4;
const FLOWER_FADED_COLOR: Color = 0x2F4F2F;

/// Sentinel density for materials that are never displaced and never fall.
pub const DENSITY_ANCHOR: i32 = 999;

/// Ticks between water source emissions.
pub const SOURCE_PERIOD: u16 = 16;

/// Flower countdown length and the point where the petal color turns.
pub const FLOWER_LIFETIME: i32 = 1000;
pub const FLOWER_MIDPOINT: i32 = 500;

/// Discrete material kind. Every cell holds exactly one; "empty" is `Air`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Air,
    Badrock,
    Stone,
    Water,
    WaterSource,
    EarthDry,
    EarthWet,
    Seed,
    RootDry,
    RootWet,
    StemDry,
    StemWet,
    LeafDry,
    LeafWet,
    Bloom,
    Flower,
    Cloud,
}

/// Static per-kind attributes. Density is a relative ordering, not a unit.
pub struct MaterialProps {
    pub name: &'static str,
    pub color: Color,
    pub density: i32,
    pub has_gravity: bool,
    pub is_solid: bool,
    pub can_flow: bool,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 17] = [
        MaterialKind::Air,
        MaterialKind::Badrock,
        MaterialKind::Stone,
        MaterialKind::Water,
        MaterialKind::WaterSource,
        MaterialKind::EarthDry,
        MaterialKind::EarthWet,
        MaterialKind::Seed,
        MaterialKind::RootDry,
        MaterialKind::RootWet,
        MaterialKind::StemDry,
        MaterialKind::StemWet,
        MaterialKind::LeafDry,
        MaterialKind::LeafWet,
        MaterialKind::Bloom,
        MaterialKind::Flower,
        MaterialKind::Cloud,
    ];

    pub fn props(self) -> &'static MaterialProps {
        match self {
            MaterialKind::Air => &MaterialProps { name: "Air", color: AIR_COLOR, density: 0, has_gravity: false, is_solid: false, can_flow: false },
            MaterialKind::Badrock => &MaterialProps { name: "Badrock", color: 0x222222, density: DENSITY_ANCHOR, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::Stone => &MaterialProps { name: "Stone", color: 0xAAAAAA, density: 5, has_gravity: true, is_solid: true, can_flow: false },
            MaterialKind::Water => &MaterialProps { name: "Water", color: 0x3FA9F5, density: 2, has_gravity: true, is_solid: false, can_flow: true },
            MaterialKind::WaterSource => &MaterialProps { name: "WaterSource", color: 0x3FA9F5, density: DENSITY_ANCHOR, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::EarthDry => &MaterialProps { name: "EarthDry", color: 0x8B5A2B, density: 4, has_gravity: true, is_solid: true, can_flow: false },
            MaterialKind::EarthWet => &MaterialProps { name: "EarthWet", color: 0x5B3B1F, density: 4, has_gravity: true, is_solid: true, can_flow: false },
            MaterialKind::Seed => &MaterialProps { name: "Seed", color: 0x9B7653, density: 3, has_gravity: true, is_solid: true, can_flow: false },
            MaterialKind::RootDry => &MaterialProps { name: "RootDry", color: 0xD2691E, density: 3, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::RootWet => &MaterialProps { name: "RootWet", color: 0xA0522D, density: 3, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::StemDry => &MaterialProps { name: "StemDry", color: 0x7CBA3D, density: 3, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::StemWet => &MaterialProps { name: "StemWet", color: 0x5A9A2D, density: 3, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::LeafDry => &MaterialProps { name: "LeafDry", color: 0x90EE90, density: 1, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::LeafWet => &MaterialProps { name: "LeafWet", color: 0x32CD32, density: 1, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::Bloom => &MaterialProps { name: "Bloom", color: FLOWER_BLOOM_COLOR, density: 3, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::Flower => &MaterialProps { name: "Flower", color: FLOWER_BLOOM_COLOR, density: 3, has_gravity: false, is_solid: true, can_flow: false },
            MaterialKind::Cloud => &MaterialProps { name: "Cloud", color: 0xCCCCCC, density: 0, has_gravity: false, is_solid: false, can_flow: false },
        }
    }

    pub fn name(self) -> &'static str {
        self.props().name
    }

    pub fn from_name(name: &str) -> Option<MaterialKind> {
        MaterialKind::ALL.iter().copied().find(|k| k.name() == name)
    }

    #[inline]
    pub fn is_root(self) -> bool {
        matches!(self, MaterialKind::RootDry | MaterialKind::RootWet)
    }

    #[inline]
    pub fn is_stem(self) -> bool {
        matches!(self, MaterialKind::StemDry | MaterialKind::StemWet)
    }

    #[inline]
    pub fn is_leaf(self) -> bool {
        matches!(self, MaterialKind::LeafDry | MaterialKind::LeafWet)
    }

    #[inline]
    pub fn is_earth(self) -> bool {
        matches!(self, MaterialKind::EarthDry | MaterialKind::EarthWet)
    }

    /// Kinds that form the traversable plant graph (roots and stems).
    #[inline]
    pub fn is_plant(self) -> bool {
        self.is_root() || self.is_stem()
    }
}

// === Per-kind state records ===
//
// All records are `Copy` and serde-round-trippable; every field defaults so a
// partial snapshot overlays cleanly onto a fresh instance.

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceState {
    /// Ticks until the next emission; the period restarts on every spawn.
    pub cooldown: u16,
}

impl Default for SourceState {
    fn default() -> Self {
        Self { cooldown: SOURCE_PERIOD }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthDryState {
    /// Set on the first tick the particle fails to fall.
    pub just_landed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthWetState {
    pub just_landed: bool,
    /// Moisture spreads to neighbors once per landing.
    pub has_spread: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedState {
    /// Flower-born seeds drift diagonally while falling.
    pub diagonal: bool,
    /// Drift direction, -1 left / +1 right; flips on obstruction.
    pub bias: i8,
}

impl Default for SeedState {
    fn default() -> Self {
        Self { diagonal: false, bias: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RootState {
    /// Gates absorption (dry) or token forwarding (wet).
    pub cooldown: u16,
    /// Gates spawning of new root cells; keeps ticking during cooldown.
    pub spawn_cooldown: u16,
}

/// Growth bias carried by stem cells and propagated to children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowDirection {
    #[default]
    Up,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StemState {
    pub cooldown: u16,
    pub preferred: GrowDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafState {
    pub cooldown: u16,
    /// Remaining ticks of the energized flash after a solar trigger.
    pub energy: u16,
    pub solar_cooldown: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomState {
    /// Incremented externally by adjacent wet stems feeding the bloom.
    pub water_counter: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowerState {
    pub timer: i32,
    /// Center of the bloom this petal was stamped from, for the fade gradient.
    pub center: Option<(i32, i32)>,
}

impl Default for FlowerState {
    fn default() -> Self {
        Self { timer: FLOWER_LIFETIME, center: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudState {
    /// Percentage chance to duplicate; decays and is shared with children.
    pub duplication_chance: f32,
    pub cooldown: u16,
}

impl Default for CloudState {
    fn default() -> Self {
        Self { duplication_chance: 100.0, cooldown: 0 }
    }
}

/// One cell's occupant: kind tag plus that kind's mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Air,
    Badrock,
    Stone,
    Water,
    WaterSource(SourceState),
    EarthDry(EarthDryState),
    EarthWet(EarthWetState),
    Seed(SeedState),
    RootDry(RootState),
    RootWet(RootState),
    StemDry(StemState),
    StemWet(StemState),
    LeafDry(LeafState),
    LeafWet(LeafState),
    Bloom(BloomState),
    Flower(FlowerState),
    Cloud(CloudState),
}

impl Material {
    /// Fresh instance of `kind` with constructor-default fields.
    pub fn default_of(kind: MaterialKind) -> Material {
        match kind {
            MaterialKind::Air => Material::Air,
            MaterialKind::Badrock => Material::Badrock,
            MaterialKind::Stone => Material::Stone,
            MaterialKind::Water => Material::Water,
            MaterialKind::WaterSource => Material::WaterSource(SourceState::default()),
            MaterialKind::EarthDry => Material::EarthDry(EarthDryState::default()),
            MaterialKind::EarthWet => Material::EarthWet(EarthWetState::default()),
            MaterialKind::Seed => Material::Seed(SeedState::default()),
            MaterialKind::RootDry => Material::RootDry(RootState::default()),
            MaterialKind::RootWet => Material::RootWet(RootState::default()),
            MaterialKind::StemDry => Material::StemDry(StemState::default()),
            MaterialKind::StemWet => Material::StemWet(StemState::default()),
            MaterialKind::LeafDry => Material::LeafDry(LeafState::default()),
            MaterialKind::LeafWet => Material::LeafWet(LeafState::default()),
            MaterialKind::Bloom => Material::Bloom(BloomState::default()),
            MaterialKind::Flower => Material::Flower(FlowerState::default()),
            MaterialKind::Cloud => Material::Cloud(CloudState::default()),
        }
    }

    #[inline]
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Air => MaterialKind::Air,
            Material::Badrock => MaterialKind::Badrock,
            Material::Stone => MaterialKind::Stone,
            Material::Water => MaterialKind::Water,
            Material::WaterSource(_) => MaterialKind::WaterSource,
            Material::EarthDry(_) => MaterialKind::EarthDry,
            Material::EarthWet(_) => MaterialKind::EarthWet,
            Material::Seed(_) => MaterialKind::Seed,
            Material::RootDry(_) => MaterialKind::RootDry,
            Material::RootWet(_) => MaterialKind::RootWet,
            Material::StemDry(_) => MaterialKind::StemDry,
            Material::StemWet(_) => MaterialKind::StemWet,
            Material::LeafDry(_) => MaterialKind::LeafDry,
            Material::LeafWet(_) => MaterialKind::LeafWet,
            Material::Bloom(_) => MaterialKind::Bloom,
            Material::Flower(_) => MaterialKind::Flower,
            Material::Cloud(_) => MaterialKind::Cloud,
        }
    }

    #[inline]
    pub fn props(&self) -> &'static MaterialProps {
        self.kind().props()
    }

    #[inline]
    pub fn density(&self) -> i32 {
        self.props().density
    }

    #[inline]
    pub fn has_gravity(&self) -> bool {
        self.props().has_gravity
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.props().is_solid
    }

    #[inline]
    pub fn can_flow(&self) -> bool {
        self.props().can_flow
    }

    /// Display color for the cell at `(x, y)`.
    ///
    /// Most kinds render their base color; energized leaves flash, and faded
    /// flowers darken with distance from their bloom center.
    pub fn color(&self, x: i32, y: i32) -> Color {
        match self {
            Material::LeafDry(st) | Material::LeafWet(st) if st.energy > 0 => FLASH_COLOR,
            Material::Flower(st) => flower_color(st, x, y),
            _ => self.props().color,
        }
    }
}

fn flower_color(st: &FlowerState, x: i32, y: i32) -> Color {
    if st.timer > FLOWER_MIDPOINT {
        return FLOWER_BLOOM_COLOR;
    }
    // Faded petals darken outward from the recorded bloom center.
    let dist = match st.center {
        Some((cx, cy)) => (((x - cx).pow(2) + (y - cy).pow(2)) as f32).sqrt(),
        None => 0.0,
    };
    let brightness = (1.0 - dist * 0.08).clamp(0.55, 1.0);
    scale_color(FLOWER_FADED_COLOR, brightness)
}

fn scale_color(color: Color, factor: f32) -> Color {
    let r = (((color >> 16) & 0xFF) as f32 * factor) as u32;
    let g = (((color >> 8) & 0xFF) as f32 * factor) as u32;
    let b = ((color & 0xFF) as f32 * factor) as u32;
    (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}
