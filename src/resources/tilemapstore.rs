//! Loaded scene maps.
//!
//! Maps are loaded once during setup, from `<maps_dir>/<scene>.json` when the
//! file exists and from the built-in layouts otherwise. Scene switches copy
//! the stored [`TileGrid`](super::tilemap::TileGrid) into the world as the
//! active collision grid.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::path::Path;

use super::scene::SceneId;
use super::tilemap::SceneMap;

/// Registry of loaded scene maps by scene.
#[derive(Resource, Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<SceneId, SceneMap>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TilemapStore {
            map: FxHashMap::default(),
        }
    }

    /// Store holding the built-in layout of every scene.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for scene in SceneId::ALL {
            store.insert(scene, scene.builtin_map());
        }
        store
    }

    /// Load every scene from `maps_dir`, falling back to the built-in layout
    /// for missing or invalid files.
    pub fn load_dir(maps_dir: &Path) -> Self {
        let mut store = Self::new();
        for scene in SceneId::ALL {
            let path = maps_dir.join(scene.file_name());
            let map = if path.is_file() {
                match SceneMap::load(&path) {
                    Ok(map) => {
                        info!("Loaded {:?} map from {}", scene, path.display());
                        map
                    }
                    Err(e) => {
                        warn!("{}; using the built-in {:?} map", e, scene);
                        scene.builtin_map()
                    }
                }
            } else {
                scene.builtin_map()
            };
            store.insert(scene, map);
        }
        store
    }

    /// Get a scene map.
    pub fn get(&self, scene: SceneId) -> Option<&SceneMap> {
        self.map.get(&scene)
    }

    /// Insert or replace the map of a scene.
    pub fn insert(&mut self, scene: SceneId, map: SceneMap) {
        self.map.insert(scene, map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::TileKind;

    #[test]
    fn test_builtin_store_has_every_scene() {
        let store = TilemapStore::builtin();
        for scene in SceneId::ALL {
            assert!(store.get(scene).is_some());
        }
    }

    #[test]
    fn test_load_dir_prefers_files_and_falls_back() {
        let dir = std::env::temp_dir().join(format!("neoncasino-maps-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("street.json"),
            r#"{ "tile_size": 8, "spawn": [8, 8], "rows": ["###", "#C#", "###"] }"#,
        )
        .unwrap();
        std::fs::write(dir.join("casino.json"), "not json").unwrap();

        let store = TilemapStore::load_dir(&dir);
        let street = store.get(SceneId::Street).unwrap();
        assert_eq!(street.grid.width(), 3);
        assert_eq!(street.grid.kind_at_cell(1, 1), Some(TileKind::Door));
        let casino = store.get(SceneId::Casino).unwrap();
        assert_eq!(casino.grid.width(), 32);

        std::fs::remove_dir_all(&dir).ok();
    }
}
