//! Tile-aware movement.
//!
//! Positions advance by `velocity * delta`, one axis at a time: X first, then
//! Y from the possibly updated X. An axis move is accepted only if the
//! entity's box at the proposed position overlaps no solid cell, so a
//! diagonal push into a wall keeps the free component and slides along it.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::tilemap::TileGrid;
use crate::resources::worldtime::WorldTime;

/// Where a box at `pos` ends up after trying to move by `step`.
pub fn slide_move(grid: &TileGrid, collider: &BoxCollider, pos: Vector2, step: Vector2) -> Vector2 {
    let mut out = pos;
    if step.x != 0.0 {
        let proposed = Vector2::new(out.x + step.x, out.y);
        let (min, max) = collider.aabb(proposed);
        if !grid.overlaps_solid(min, max) {
            out.x = proposed.x;
        }
    }
    if step.y != 0.0 {
        let proposed = Vector2::new(out.x, out.y + step.y);
        let (min, max) = collider.aabb(proposed);
        if !grid.overlaps_solid(min, max) {
            out.y = proposed.y;
        }
    }
    out
}

/// Integrate rigid bodies against the active [`TileGrid`].
///
/// Without a grid (no scene loaded yet) positions integrate freely.
pub fn movement(
    mut query: Query<(&mut MapPosition, &RigidBody, &BoxCollider)>,
    time: Res<WorldTime>,
    grid: Option<Res<TileGrid>>,
) {
    for (mut position, rigidbody, collider) in query.iter_mut() {
        let delta = rigidbody.velocity.scale_by(time.delta);
        if delta.x == 0.0 && delta.y == 0.0 {
            continue;
        }
        position.pos = match grid.as_deref() {
            Some(grid) => slide_move(grid, collider, position.pos, delta),
            None => position.pos + delta,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> TileGrid {
        // 6x6 cells of 10 px, walls on the border
        TileGrid::from_rows(
            &["######", "#    #", "#    #", "#    #", "#    #", "######"],
            10.0,
        )
        .unwrap()
    }

    #[test]
    fn test_free_move_is_accepted() {
        let grid = room();
        let collider = BoxCollider::new(8.0, 8.0);
        let out = slide_move(&grid, &collider, Vector2::new(15.0, 15.0), Vector2::new(3.0, 2.0));
        assert_eq!((out.x, out.y), (18.0, 17.0));
    }

    #[test]
    fn test_diagonal_into_wall_slides() {
        let grid = room();
        let collider = BoxCollider::new(8.0, 8.0);
        // flush against the right wall at x = 50
        let out = slide_move(&grid, &collider, Vector2::new(42.0, 20.0), Vector2::new(3.0, 4.0));
        assert_eq!((out.x, out.y), (42.0, 24.0));
    }

    #[test]
    fn test_touching_a_wall_is_not_overlap() {
        let grid = room();
        let collider = BoxCollider::new(8.0, 8.0);
        let out = slide_move(&grid, &collider, Vector2::new(40.0, 20.0), Vector2::new(2.0, 0.0));
        assert_eq!(out.x, 42.0);
    }

    #[test]
    fn test_movement_system_moves_every_body_with_velocity() {
        let mut world = World::new();
        world.insert_resource(WorldTime::with_delta(0.5));
        world.insert_resource(room());
        let still = world
            .spawn((MapPosition::new(15.0, 15.0), RigidBody::new(), BoxCollider::new(8.0, 8.0)))
            .id();
        let walking = world
            .spawn((
                MapPosition::new(15.0, 15.0),
                RigidBody {
                    velocity: Vector2::new(10.0, 0.0),
                },
                BoxCollider::new(8.0, 8.0),
            ))
            .id();
        let mut schedule = Schedule::default();
        schedule.add_systems(movement);
        schedule.run(&mut world);
        assert_eq!(world.get::<MapPosition>(still).unwrap().pos.x, 15.0);
        assert_eq!(world.get::<MapPosition>(walking).unwrap().pos.x, 20.0);
    }
}
