//! NPC behaviour.
//!
//! Patrons wander: each keeps a cardinal heading (or stands still) for one
//! to three seconds, then picks another. Their steps go through the same
//! tile collision as the player's.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::npc::Npc;
use crate::resources::gamerng::GameRng;
use crate::resources::tilemap::TileGrid;
use crate::resources::worldtime::WorldTime;
use crate::systems::movement::slide_move;

pub fn npc_wander_system(
    mut query: Query<(&mut Npc, &mut MapPosition, &BoxCollider)>,
    time: Res<WorldTime>,
    mut rng: ResMut<GameRng>,
    grid: Option<Res<TileGrid>>,
) {
    let Some(grid) = grid else {
        return;
    };
    for (mut npc, mut position, collider) in query.iter_mut() {
        if !npc.kind.wanders() {
            continue;
        }
        npc.move_timer -= time.delta;
        if npc.move_timer <= 0.0 {
            npc.choose_heading(&mut rng.0);
        }
        let step = npc.direction.scale_by(npc.speed * time.delta);
        if step.x != 0.0 || step.y != 0.0 {
            position.pos = slide_move(&grid, collider, position.pos, step);
        }
    }
}
