//! Exploring interactions.
//!
//! While walking around, `E` uses whatever the player stands on or next to:
//! the casino door on the street, the exit on the casino floor, or the
//! closest NPC in talking range. `Space` next to a blackjack table sits the
//! player down.
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::npc::{Npc, TALK_RANGE};
use crate::components::player::Player;
use crate::events::scene::SwitchSceneEvent;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::hudmessage::{DEFAULT_MESSAGE_SECS, HudMessage};
use crate::resources::input::InputState;
use crate::resources::scene::{CurrentScene, SceneId};
use crate::resources::tilemap::{TileGrid, TileKind};
use crate::resources::worldtime::WorldTime;

/// Scene reached through the door or exit the box `(min, max)` overlaps.
pub fn passage_destination(
    grid: &TileGrid,
    scene: SceneId,
    min: Vector2,
    max: Vector2,
) -> Option<SceneId> {
    match scene {
        SceneId::Street if grid.overlaps_kind(min, max, TileKind::Door) => Some(SceneId::Casino),
        SceneId::Casino if grid.overlaps_kind(min, max, TileKind::Exit) => Some(SceneId::Street),
        _ => None,
    }
}

/// Whether the box `(min, max)` is within one cell of a blackjack table.
pub fn near_blackjack_table(grid: &TileGrid, min: Vector2, max: Vector2) -> bool {
    let ts = grid.tile_size();
    let pad = Vector2::new(ts, ts);
    grid.overlaps_kind(min - pad, max + pad, TileKind::BlackjackTable)
}

/// Index of the closest of `centres` strictly within [`TALK_RANGE`] of `from`.
pub fn closest_in_talk_range(from: Vector2, centres: &[Vector2]) -> Option<usize> {
    centres
        .iter()
        .enumerate()
        .map(|(i, c)| (i, (*c - from).length()))
        .filter(|(_, d)| *d < TALK_RANGE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[allow(clippy::too_many_arguments)]
pub fn exploring_interaction_system(
    mut commands: Commands,
    input: Res<InputState>,
    grid: Option<Res<TileGrid>>,
    current: Res<CurrentScene>,
    mut hud: ResMut<HudMessage>,
    mut next_state: ResMut<NextGameState>,
    player: Query<(&MapPosition, &BoxCollider), With<Player>>,
    npcs: Query<(&Npc, &MapPosition, &BoxCollider)>,
) {
    let (Some(grid), Some((position, collider))) = (grid, player.iter().next()) else {
        return;
    };
    let (min, max) = collider.aabb(position.pos);

    if input.interact.just_pressed {
        if let Some(scene) = passage_destination(&grid, current.id, min, max) {
            commands.trigger(SwitchSceneEvent::new(scene));
            return;
        }
        let me = collider.center(position.pos);
        let (lines, centres): (Vec<&str>, Vec<Vector2>) = npcs
            .iter()
            .map(|(npc, pos, col)| (npc.dialogue.as_str(), col.center(pos.pos)))
            .unzip();
        if let Some(i) = closest_in_talk_range(me, &centres) {
            hud.show(lines[i], DEFAULT_MESSAGE_SECS);
        }
    }

    if input.action_1.just_pressed {
        if near_blackjack_table(&grid, min, max) {
            next_state.set(GameStates::AtTable);
        } else {
            debug!("No blackjack table within reach");
        }
    }
}

pub fn hud_message_tick(time: Res<WorldTime>, mut hud: ResMut<HudMessage>) {
    hud.tick(time.delta);
}
