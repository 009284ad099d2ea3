//! Material registry - id -> kind catalog for the input layer.
//!
//! The paint tool addresses materials by a short string id. The mapping is a
//! static table; unknown ids surface as `EngineError::UnknownMaterial`. The
//! registry also produces a JSON manifest of the paintable subset so a UI
//! can build its palette without hardcoding the catalog.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::error::EngineError;
use crate::domain::material::{Color, Material, MaterialKind};

struct RegistryEntry {
    id: &'static str,
    display_name: &'static str,
    kind: MaterialKind,
    /// Hidden entries are loadable/paintable by id but left off the palette.
    hidden: bool,
}

const ENTRIES: &[RegistryEntry] = &[
    RegistryEntry { id: "air", display_name: "Air (erase)", kind: MaterialKind::Air, hidden: false },
    RegistryEntry { id: "badrock", display_name: "Badrock", kind: MaterialKind::Badrock, hidden: false },
    RegistryEntry { id: "stone", display_name: "Stone", kind: MaterialKind::Stone, hidden: false },
    RegistryEntry { id: "water", display_name: "Water", kind: MaterialKind::Water, hidden: false },
    RegistryEntry { id: "water_source", display_name: "Water source", kind: MaterialKind::WaterSource, hidden: false },
    RegistryEntry { id: "earth", display_name: "Earth", kind: MaterialKind::EarthDry, hidden: false },
    RegistryEntry { id: "earth_dry", display_name: "Dry earth", kind: MaterialKind::EarthDry, hidden: true },
    RegistryEntry { id: "earth_wet", display_name: "Wet earth", kind: MaterialKind::EarthWet, hidden: true },
    RegistryEntry { id: "seed", display_name: "Seed", kind: MaterialKind::Seed, hidden: false },
    RegistryEntry { id: "cloud", display_name: "Cloud", kind: MaterialKind::Cloud, hidden: false },
    RegistryEntry { id: "root_dry", display_name: "Dry root", kind: MaterialKind::RootDry, hidden: true },
    RegistryEntry { id: "root_wet", display_name: "Wet root", kind: MaterialKind::RootWet, hidden: true },
    RegistryEntry { id: "stem_dry", display_name: "Dry stem", kind: MaterialKind::StemDry, hidden: true },
    RegistryEntry { id: "stem_wet", display_name: "Wet stem", kind: MaterialKind::StemWet, hidden: true },
    RegistryEntry { id: "leaf_dry", display_name: "Dry leaf", kind: MaterialKind::LeafDry, hidden: true },
    RegistryEntry { id: "leaf_wet", display_name: "Wet leaf", kind: MaterialKind::LeafWet, hidden: true },
    RegistryEntry { id: "bloom", display_name: "Bloom", kind: MaterialKind::Bloom, hidden: true },
    RegistryEntry { id: "flower", display_name: "Flower", kind: MaterialKind::Flower, hidden: true },
];

#[derive(Serialize)]
struct Manifest<'a> {
    format_version: u32,
    materials: &'a [ManifestEntry],
}

#[derive(Clone, Serialize)]
struct ManifestEntry {
    id: &'static str,
    name: &'static str,
    color: Color,
}

pub struct MaterialRegistry {
    by_id: HashMap<&'static str, MaterialKind>,
    manifest: Vec<ManifestEntry>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        let mut by_id = HashMap::with_capacity(ENTRIES.len());
        let mut manifest = Vec::new();
        for entry in ENTRIES {
            by_id.insert(entry.id, entry.kind);
            if !entry.hidden {
                manifest.push(ManifestEntry {
                    id: entry.id,
                    name: entry.display_name,
                    color: entry.kind.props().color,
                });
            }
        }
        Self { by_id, manifest }
    }

    pub fn kind_by_id(&self, id: &str) -> Option<MaterialKind> {
        self.by_id.get(id).copied()
    }

    /// Construct a fresh default instance of the material named by `id`.
    pub fn create(&self, id: &str) -> Result<Material, EngineError> {
        self.kind_by_id(id)
            .map(Material::default_of)
            .ok_or_else(|| EngineError::UnknownMaterial { id: id.to_string() })
    }

    /// Palette description for UI generation.
    pub fn manifest_json(&self) -> String {
        let out = Manifest { format_version: 1, materials: &self.manifest };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_default_instances_by_id() {
        let registry = MaterialRegistry::new();
        assert_eq!(registry.create("stone").unwrap().kind(), MaterialKind::Stone);
        assert_eq!(registry.create("earth").unwrap().kind(), MaterialKind::EarthDry);
        assert_eq!(registry.create("water_source").unwrap().kind(), MaterialKind::WaterSource);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = MaterialRegistry::new();
        let err = registry.create("plutonium").unwrap_err();
        assert!(matches!(err, EngineError::UnknownMaterial { .. }));
    }

    #[test]
    fn manifest_lists_only_palette_entries() {
        let registry = MaterialRegistry::new();
        let json = registry.manifest_json();
        assert!(json.contains("\"stone\""));
        assert!(json.contains("\"cloud\""));
        assert!(!json.contains("\"stem_wet\""));
    }
}
