//! Camera follow.
//!
//! The camera centres on the player but never shows anything beyond the map
//! edges. When the map is smaller than the view on an axis it is centred on
//! that axis instead.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::screensize::ScreenSize;
use crate::resources::tilemap::TileGrid;

fn clamp_axis(focus: f32, view: f32, map: f32) -> f32 {
    if map <= view {
        map / 2.0
    } else {
        focus.clamp(view / 2.0, map - view / 2.0)
    }
}

/// Camera target (world point at the screen centre) for a `view`-sized
/// window of a `map`-sized world, looking at `focus`.
pub fn clamp_camera_target(focus: Vector2, view: Vector2, map: Vector2) -> Vector2 {
    Vector2::new(
        clamp_axis(focus.x, view.x, map.x),
        clamp_axis(focus.y, view.y, map.y),
    )
}

pub fn camera_follow_system(
    mut camera: ResMut<Camera2DRes>,
    screen: Res<ScreenSize>,
    grid: Option<Res<TileGrid>>,
    player: Query<(&MapPosition, &BoxCollider), With<Player>>,
) {
    let Some((position, collider)) = player.iter().next() else {
        return;
    };
    let (w, h) = screen.as_f32();
    let zoom = camera.0.zoom.max(f32::EPSILON);
    let focus = collider.center(position.pos);
    camera.0.offset = Vector2::new(w / 2.0, h / 2.0);
    camera.0.target = match grid.as_deref() {
        Some(grid) => clamp_camera_target(focus, Vector2::new(w / zoom, h / zoom), grid.pixel_size()),
        None => focus,
    };
}
