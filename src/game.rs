//! Session state: the legion world holding the bird and pipes, the score and
//! the Active/GameOver machine, advanced one tick at a time.

use std::time::Duration;

use glam::DVec2;
use legion::*;
use rand::Rng;

use crate::components::*;
use crate::config::GameConfig;
use crate::input::Action;
use crate::spawner::PipeSpawner;
use crate::systems;

pub struct GameState<R> {
    world: World,
    resources: Resources,
    schedule: Schedule,
    spawner: PipeSpawner,
    config: GameConfig,
    playfield: Playfield,
    rng: R,
}

/// Copy of the bird's state for rendering and inspection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BirdState {
    pub pos: DVec2,
    pub velocity: f64,
    pub radius: f64,
}

impl<R: Rng> GameState<R> {
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: GameConfig, rng: R) -> Self {
        let playfield = Playfield::from(&config);
        let spawner = PipeSpawner::new(Duration::from_millis(config.physics.pipe_interval_ms));

        let mut resources = Resources::default();
        resources.insert(config.physics);
        resources.insert(playfield);

        let mut game = Self {
            world: World::default(),
            resources,
            schedule: systems::schedule(),
            spawner,
            config,
            playfield,
            rng,
        };

        game.reset();
        game
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Flap => self.flap(),
            Action::Restart => self.restart(),
            Action::Quit => {}
        }
    }

    pub fn flap(&mut self) {
        if self.session() != Session::Active {
            return;
        }

        let flap_power = self.config.physics.flap_power;
        <(&Bird, &mut Velocity)>::query()
            .for_each_mut(&mut self.world, |(bird, vel)| bird.flap(vel, flap_power));
    }

    /// Starts a fresh session. Only honoured after a game over.
    pub fn restart(&mut self) {
        if self.session() != Session::GameOver {
            return;
        }

        log::info!("GAME: Restarting after scoring {}", self.score());
        self.reset();
    }

    fn reset(&mut self) {
        self.world.clear();
        self.spawner.reset();
        self.resources.insert(Score::default());
        self.resources.insert(Session::Active);

        let physics = &self.config.physics;
        self.world.push((
            Bird::new(physics.bird_radius),
            Position(self.playfield.bird_spawn(physics)),
            Velocity(DVec2::ZERO),
        ));
    }

    /// Adds a pipe with its left edge at `x`.
    pub fn spawn_pipe(&mut self, x: f64) {
        let pipe = Pipe::new(&self.config, &mut self.rng);
        log::debug!("PIPES: Spawning pipe at x = {x:.1}, gap top {}", pipe.gap_top);

        self.world.push((
            pipe,
            Position(DVec2::new(x, 0.0)),
            Velocity(DVec2::new(-self.config.physics.pipe_speed, 0.0)),
        ));
    }

    /// Runs one tick. `dt` is the wall-clock time since the previous tick and
    /// only drives the pipe spawner; motion is per tick. Nothing moves while
    /// the session is over.
    pub fn tick(&mut self, dt: Duration) {
        if self.session() != Session::Active {
            return;
        }

        // pipes owed by a long frame are placed where they would have
        // scrolled to had they spawned on time
        let spawn_x = self.playfield.width + self.config.physics.pipe_spawn_offset;
        let spacing = self.config.physics.pipe_speed
            * self.spawner.interval().as_secs_f64()
            * self.config.window.fps as f64;
        for late in (0..self.spawner.advance(dt)).rev() {
            self.spawn_pipe(spawn_x - late as f64 * spacing);
        }

        self.schedule.execute(&mut self.world, &mut self.resources);

        if self.session() == Session::GameOver {
            log::info!("GAME: Game over with score {}", self.score());
        }
    }

    pub fn session(&self) -> Session {
        self.resources
            .get::<Session>()
            .map(|session| *session)
            .unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.resources
            .get::<Score>()
            .map(|score| score.0)
            .unwrap_or_default()
    }

    pub fn bird(&self) -> Option<BirdState> {
        <(&Position, &Velocity, &Bird)>::query()
            .iter(&self.world)
            .next()
            .map(|(pos, vel, bird)| BirdState {
                pos: pos.0,
                velocity: vel.0.y,
                radius: bird.radius,
            })
    }

    /// Left edge and state of every live pipe
    pub fn pipes(&self) -> Vec<(f64, Pipe)> {
        <(&Position, &Pipe)>::query()
            .iter(&self.world)
            .map(|(pos, pipe)| (pos.0.x, *pipe))
            .collect()
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }
}
