use glam::DVec2;
use rand::Rng;

use crate::collision::Aabb;
use crate::config::{GameConfig, PhysicsConfig};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position(pub DVec2);

/// Pixels per tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity(pub DVec2);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bird {
    pub radius: f64,
    pub alive: bool,
}

impl Bird {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            alive: true,
        }
    }

    /// Replaces the vertical velocity with the flap impulse, whatever it was.
    pub fn flap(&self, vel: &mut Velocity, flap_power: f64) {
        if self.alive {
            vel.0.y = flap_power;
        }
    }

    pub fn bounds(&self, Position(centre): &Position) -> Aabb {
        Aabb::around(*centre, self.radius)
    }
}

/// A pair of pipe segments with a gap between them. The entity's `Position`
/// holds the left edge in `x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pipe {
    pub gap_top: i32,
    pub gap: f64,
    pub width: f64,
    /// y of the ground line, where the lower segment ends
    pub floor: f64,
    pub passed: bool,
}

impl Pipe {
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Self {
        let (min, max) = config.gap_range();
        let floor = config.window.height as f64 - config.window.ground_height as f64;

        Self {
            gap_top: rng.gen_range(min..=max),
            gap: config.physics.pipe_gap as f64,
            width: config.physics.pipe_width,
            floor,
            passed: false,
        }
    }

    pub fn top_rect(&self, x: f64) -> Aabb {
        Aabb::new(x, 0.0, self.width, self.gap_top as f64)
    }

    pub fn bottom_rect(&self, x: f64) -> Aabb {
        let gap_bottom = self.gap_top as f64 + self.gap;
        Aabb::new(x, gap_bottom, self.width, self.floor - gap_bottom)
    }

    pub fn right_edge(&self, x: f64) -> f64 {
        x + self.width
    }

    pub fn hits(&self, x: f64, bird: &Aabb) -> bool {
        bird.intersects(&self.top_rect(x)) || bird.intersects(&self.bottom_rect(x))
    }

    /// Returns true only on the tick the pipe falls behind `bird_x`.
    pub fn mark_passed(&mut self, x: f64, bird_x: f64) -> bool {
        if !self.passed && self.right_edge(x) < bird_x {
            self.passed = true;
            return true;
        }

        false
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Active,
    GameOver,
}

/// Playfield geometry shared with the systems
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
    pub ground_y: f64,
}

impl From<&GameConfig> for Playfield {
    fn from(config: &GameConfig) -> Self {
        Self {
            width: config.window.width as f64,
            height: config.window.height as f64,
            ground_y: config.window.height as f64 - config.window.ground_height as f64,
        }
    }
}

impl Playfield {
    /// Where a fresh bird starts: fixed x, vertically centred
    pub fn bird_spawn(&self, physics: &PhysicsConfig) -> DVec2 {
        DVec2::new(physics.bird_x, (self.height as u32 / 2) as f64)
    }
}
