//! Scene switching.
//!
//! [`SwitchSceneEvent`] replaces the active map: scene actors are despawned,
//! the scene's [`TileGrid`] becomes the collision grid and the player and the
//! map's NPCs are spawned. Leaving a scene records where the player stood so
//! the street can be resumed from the same spot.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::inputcontrolled::InputControlled;
use crate::components::mapposition::MapPosition;
use crate::components::npc::{NPC_SIZE, Npc};
use crate::components::persistent::Persistent;
use crate::components::player::{PLAYER_HEIGHT, PLAYER_WIDTH, Player};
use crate::components::rigidbody::RigidBody;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamerng::GameRng;
use crate::resources::hudmessage::HudMessage;
use crate::resources::scene::{CurrentScene, SceneId};
use crate::resources::tilemapstore::TilemapStore;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchSceneEvent {
    pub scene: SceneId,
}

impl SwitchSceneEvent {
    pub fn new(scene: SceneId) -> Self {
        Self { scene }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn switch_scene_observer(
    trigger: On<SwitchSceneEvent>,
    mut commands: Commands,
    store: Option<Res<TilemapStore>>,
    mut current: ResMut<CurrentScene>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut hud: ResMut<HudMessage>,
    camera: Option<ResMut<Camera2DRes>>,
    players: Query<&MapPosition, With<Player>>,
    actors: Query<Entity, (With<MapPosition>, Without<Persistent>)>,
) {
    let scene = trigger.event().scene;
    let Some(map) = store.as_deref().and_then(|s| s.get(scene)) else {
        warn!("No map loaded for {:?}", scene);
        return;
    };

    if let Some(pos) = players.iter().next() {
        let from = current.id;
        current.left_at.insert(from, pos.pos);
    }
    for entity in actors.iter() {
        commands.entity(entity).despawn();
    }

    commands.insert_resource(map.grid.clone());

    let arrival = current.arrival_point(scene, map);
    commands.spawn((
        Player,
        MapPosition::from_vec(arrival),
        BoxCollider::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        RigidBody::new(),
        InputControlled::with_speed(config.player_speed),
    ));

    let half = NPC_SIZE / 2.0;
    for spawn in &map.npcs {
        let dialogue = match &spawn.dialogue {
            Some(line) => line.clone(),
            None => spawn.kind.default_dialogue(&mut rng.0),
        };
        commands.spawn((
            Npc::new(spawn.kind, dialogue),
            MapPosition::new(spawn.x - half, spawn.y - half),
            BoxCollider::new(NPC_SIZE, NPC_SIZE),
        ));
    }

    if let Some(mut camera) = camera {
        camera.0.zoom = map.zoom;
        camera.0.target = arrival + Vector2::new(PLAYER_WIDTH / 2.0, PLAYER_HEIGHT / 2.0);
    }
    hud.clear();
    current.id = scene;
    info!(
        "Entered {:?} at ({:.0}, {:.0}) with {} NPCs",
        scene,
        arrival.x,
        arrival.y,
        map.npcs.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tilemap::TileGrid;

    fn world_on_street() -> World {
        let mut world = World::new();
        world.insert_resource(TilemapStore::builtin());
        world.insert_resource(CurrentScene::new(SceneId::Street));
        world.insert_resource(GameConfig::new());
        world.insert_resource(GameRng::new(Some(1)));
        world.insert_resource(HudMessage::default());
        world.add_observer(switch_scene_observer);
        world.flush();
        world.trigger(SwitchSceneEvent::new(SceneId::Street));
        world.flush();
        world
    }

    fn player_pos(world: &mut World) -> Vector2 {
        let mut q = world.query_filtered::<&MapPosition, With<Player>>();
        let positions: Vec<Vector2> = q.iter(world).map(|p| p.pos).collect();
        assert_eq!(positions.len(), 1);
        positions[0]
    }

    #[test]
    fn test_switch_spawns_player_and_npcs() {
        let mut world = world_on_street();
        let street = TilemapStore::builtin().get(SceneId::Street).unwrap().clone();
        let pos = player_pos(&mut world);
        assert_eq!((pos.x, pos.y), (street.spawn.x, street.spawn.y));
        assert_eq!(world.resource::<TileGrid>().width(), 64);

        world.trigger(SwitchSceneEvent::new(SceneId::Casino));
        world.flush();
        assert_eq!(world.resource::<CurrentScene>().id, SceneId::Casino);
        assert_eq!(world.resource::<TileGrid>().width(), 32);
        let npcs = world.query::<&Npc>().iter(&world).count();
        let casino = TilemapStore::builtin().get(SceneId::Casino).unwrap().clone();
        assert_eq!(npcs, casino.npcs.len());
        player_pos(&mut world);
    }

    #[test]
    fn test_street_resumes_where_player_left() {
        let mut world = world_on_street();
        {
            let mut q = world.query_filtered::<&mut MapPosition, With<Player>>();
            for mut pos in q.iter_mut(&mut world) {
                pos.pos = Vector2::new(955.0, 620.0);
            }
        }
        world.trigger(SwitchSceneEvent::new(SceneId::Casino));
        world.flush();
        world.trigger(SwitchSceneEvent::new(SceneId::Street));
        world.flush();
        let pos = player_pos(&mut world);
        assert_eq!((pos.x, pos.y), (955.0, 620.0));
        assert_eq!(world.query::<&Npc>().iter(&world).count(), 0);
    }
}
