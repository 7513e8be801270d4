use legion::systems::CommandBuffer;
use legion::world::SubWorld;
use legion::*;

use crate::components::*;
use crate::config::PhysicsConfig;

/// Builds the per-tick pipeline. Order matters: physics, movement, pruning,
/// then the checks.
pub fn schedule() -> Schedule {
    Schedule::builder()
        .add_system(apply_gravity_system())
        .add_system(update_positions_system())
        .add_system(clamp_to_ceiling_system())
        .add_system(despawn_offscreen_pipes_system())
        .flush()
        .add_system(check_pipe_collisions_system())
        .add_system(check_ground_system())
        .build()
}

#[system(for_each)]
pub fn apply_gravity(_bird: &Bird, vel: &mut Velocity, #[resource] physics: &PhysicsConfig) {
    vel.0.y += physics.gravity;
}

#[system(for_each)]
pub fn update_positions(pos: &mut Position, vel: &Velocity) {
    pos.0 += vel.0;
}

#[system(for_each)]
pub fn clamp_to_ceiling(pos: &mut Position, vel: &mut Velocity, Bird { radius, .. }: &Bird) {
    if pos.0.y < *radius {
        pos.0.y = *radius;
        vel.0.y = 0.0;
    }
}

#[system(for_each)]
pub fn despawn_offscreen_pipes(
    entity: &Entity,
    Position(pos): &Position,
    pipe: &Pipe,
    commands: &mut CommandBuffer,
) {
    if pipe.right_edge(pos.x) <= 0.0 {
        log::debug!("PIPES: Despawning pipe at x = {:.1}", pos.x);
        commands.remove(*entity);
    }
}

/// Every pipe is checked and scored, even after a hit earlier in the same tick.
#[system]
pub fn check_pipe_collisions(
    world: &mut SubWorld,
    birds: &mut Query<(&Position, &Bird)>,
    pipes: &mut Query<(&Position, &mut Pipe)>,
    #[resource] score: &mut Score,
    #[resource] session: &mut Session,
) {
    let Some((bird_x, bird_box)) = birds
        .iter(world)
        .next()
        .map(|(pos, bird)| (pos.0.x, bird.bounds(pos)))
    else {
        return;
    };

    pipes.for_each_mut(world, |(Position(pos), pipe)| {
        if pipe.hits(pos.x, &bird_box) {
            *session = Session::GameOver;
        }

        if pipe.mark_passed(pos.x, bird_x) {
            score.0 += 1;
        }
    });
}

#[system(for_each)]
pub fn check_ground(
    Position(pos): &Position,
    Bird { radius, .. }: &Bird,
    #[resource] playfield: &Playfield,
    #[resource] session: &mut Session,
) {
    if pos.y + radius > playfield.ground_y {
        *session = Session::GameOver;
    }
}
