//! Which map the player is walking on.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

use super::tilemap::{SceneMap, builtin_casino, builtin_street};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Street,
    Casino,
}

impl SceneId {
    pub const ALL: [SceneId; 2] = [SceneId::Street, SceneId::Casino];

    pub fn file_name(self) -> &'static str {
        match self {
            SceneId::Street => "street.json",
            SceneId::Casino => "casino.json",
        }
    }

    pub fn builtin_map(self) -> SceneMap {
        match self {
            SceneId::Street => builtin_street(),
            SceneId::Casino => builtin_casino(),
        }
    }

    /// Whether returning to this scene puts the player back where they left
    /// it instead of at the map spawn.
    pub fn resumes_position(self) -> bool {
        matches!(self, SceneId::Street)
    }

    /// Hint shown at the top of the screen.
    pub fn hint(self) -> &'static str {
        match self {
            SceneId::Street => "Find the neon door and press [E] to enter.",
            SceneId::Casino => {
                "Walk to a blackjack table and press [Space]. Exit at the bottom with [E]."
            }
        }
    }
}

/// The active scene and where the player left the others.
#[derive(Resource, Debug, Clone)]
pub struct CurrentScene {
    pub id: SceneId,
    pub left_at: FxHashMap<SceneId, Vector2>,
}

impl CurrentScene {
    pub fn new(id: SceneId) -> Self {
        Self {
            id,
            left_at: FxHashMap::default(),
        }
    }

    /// Player position on arrival in `scene`.
    pub fn arrival_point(&self, scene: SceneId, map: &SceneMap) -> Vector2 {
        if scene.resumes_position() {
            if let Some(pos) = self.left_at.get(&scene) {
                return *pos;
            }
        }
        map.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_resumes_casino_restarts() {
        let mut current = CurrentScene::new(SceneId::Street);
        let street = SceneId::Street.builtin_map();
        let casino = SceneId::Casino.builtin_map();
        assert_eq!(current.arrival_point(SceneId::Street, &street), street.spawn);

        current.left_at.insert(SceneId::Street, Vector2::new(965.0, 642.0));
        current.left_at.insert(SceneId::Casino, Vector2::new(250.0, 350.0));
        let back = current.arrival_point(SceneId::Street, &street);
        assert_eq!((back.x, back.y), (965.0, 642.0));
        let inside = current.arrival_point(SceneId::Casino, &casino);
        assert_eq!((inside.x, inside.y), (casino.spawn.x, casino.spawn.y));
    }
}
