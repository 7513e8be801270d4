use std::time::Duration;

use anyhow::anyhow;
use egui_sfml::SfEgui;
use egui_sfml::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sfml::{graphics::*, system::*, window::*};

use crate::config::GameConfig;
use crate::game::GameState;
use crate::input::{self, Action};
use crate::renderer::Renderer;

/// Opens the window and runs the frame loop until the window is closed.
pub fn run(config: GameConfig) -> anyhow::Result<()> {
    log::info!(
        "RENDER: Creating {}x{} window",
        config.window.width,
        config.window.height
    );
    let mut window = RenderWindow::new(
        (config.window.width, config.window.height),
        config.window.title.as_str(),
        Style::CLOSE,
        &ContextSettings {
            antialiasing_level: config.window.antialiasing,
            ..Default::default()
        },
    )
    .map_err(|e| anyhow!("could not open the game window: {e:?}"))?;
    window.set_framerate_limit(config.window.fps);
    // a held key must not repeat flaps or restart straight after a crash
    window.set_key_repeat_enabled(false);

    let renderer = Renderer::new(&config.render)?;
    let debug_overlay = config.render.debug_overlay;
    let mut sfegui = SfEgui::new(&window);

    let mut game = GameState::new(config, StdRng::from_entropy());
    let mut clock = Clock::start().map_err(|e| anyhow!("could not start frame clock: {e:?}"))?;

    log::info!("GAME: Session started");

    'frames: while window.is_open() {
        let dt = clock.restart();

        while let Some(event) = window.poll_event() {
            if debug_overlay {
                sfegui.add_event(&event);
            }

            match input::map_event(&event, game.session()) {
                Some(Action::Quit) => {
                    log::info!("GAME: Window closed with score {}", game.score());
                    window.close();
                    break 'frames;
                }
                Some(action) => game.apply(action),
                None => {}
            }
        }

        game.tick(Duration::from_micros(dt.as_microseconds().max(0) as u64));
        renderer.draw(&mut window, &game);

        if debug_overlay {
            let frame_time = dt.as_seconds() * 1000.0;
            let pipes = game.pipes().len();
            let score = game.score();
            let session = game.session();

            let di = sfegui
                .run(&mut window, |_rw, ctx| {
                    egui::Window::new("Info")
                        .default_pos((10.0, 10.0))
                        .collapsible(true)
                        .resizable(false)
                        .show(ctx, |ui| {
                            ui.label(format!("FPS: {:.0}", 1000.0 / frame_time.max(0.001)));
                            ui.label(format!("Frame Time: {frame_time:.3}ms"));
                            ui.separator();
                            ui.label(format!("Pipes: {pipes}"));
                            ui.label(format!("Score: {score}"));
                            ui.label(format!("Session: {session:?}"));
                        });
                })
                .map_err(|e| anyhow!("debug overlay failed: {e:?}"))?;

            sfegui.draw(di, &mut window, None);
        }

        window.display();
    }

    Ok(())
}
