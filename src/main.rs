use anyhow::Context;

mod collision;
mod components;
mod config;
mod engine;
mod game;
mod input;
mod renderer;
mod spawner;
mod systems;

use config::GameConfig;

const CONFIG_PATH: &str = "flappy.toml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Starting flappy-bird {}", env!("CARGO_PKG_VERSION"));

    let result = run();
    if let Err(e) = &result {
        log::error!("MAIN: {e:#}");
    }

    result
}

fn run() -> anyhow::Result<()> {
    let config = GameConfig::load(CONFIG_PATH).context("invalid startup configuration")?;
    engine::run(config)
}
