use std::f32::consts::FRAC_PI_2;

use anyhow::anyhow;
use rand::Rng;
use sfml::cpp::FBox;
use sfml::graphics::*;

use crate::collision::Aabb;
use crate::components::Session;
use crate::config::RenderConfig;
use crate::game::GameState;

const BACKGROUND: Color = Color::rgb(245, 247, 250);
const GRAY_TEXT: Color = Color::rgb(107, 114, 128);
const HEADLINE: Color = Color::rgb(80, 80, 80);
const PIPE: Color = Color::rgb(30, 144, 255);
const BIRD: Color = Color::BLACK;
const SHADOW: Color = Color::rgba(0, 0, 0, 50);
const GROUND: Color = Color::rgb(230, 230, 230);
const GROUND_LINE: Color = Color::rgb(200, 200, 200);
const OVERLAY: Color = Color::rgba(255, 255, 255, 180);

const FONT_LARGE: u32 = 48;
const FONT_MEDIUM: u32 = 24;
const FONT_SMALL: u32 = 18;

const PIPE_CORNER_RADIUS: f32 = 12.0;
const CORNER_POINTS: usize = 8;
const SHADOW_OFFSET: (f32, f32) = (3.0, 5.0);
const SCORE_Y: f32 = 80.0;

/// Radius of the pre-rendered circle texture, scaled down when drawn
const SPRITE_RADIUS: u32 = 100;

/// Pre-renders a smooth circle so the bird doesn't need a high point count
/// shape every frame
pub fn circle(radius: u32, color: Color) -> anyhow::Result<FBox<Image>> {
    let mut render_target = RenderTexture::new(radius * 2, radius * 2)
        .map_err(|e| anyhow!("could not create render texture: {e:?}"))?;

    render_target.clear(Color::TRANSPARENT);

    let mut circle = CircleShape::new(radius as _, 200);
    circle.set_fill_color(color);
    circle.set_position((0., 0.));

    render_target.set_smooth(true);
    render_target.draw(&circle);
    render_target.display();

    render_target
        .texture()
        .copy_to_image()
        .map_err(|e| anyhow!("could not read back circle texture: {e:?}"))
}

/// Rectangle with rounded corners, approximated by a convex polygon
pub fn rounded_rect(rect: &Aabb, radius: f32, color: Color) -> ConvexShape<'static> {
    let (x, y) = (rect.min.x as f32, rect.min.y as f32);
    let (w, h) = (rect.size.x as f32, rect.size.y as f32);
    let radius = radius.min(w / 2.0).min(h / 2.0).max(0.0);

    // corner centres, clockwise from top-left, with the angle each arc starts at
    let corners = [
        (x + radius, y + radius, 2.0 * FRAC_PI_2),
        (x + w - radius, y + radius, 3.0 * FRAC_PI_2),
        (x + w - radius, y + h - radius, 0.0),
        (x + radius, y + h - radius, FRAC_PI_2),
    ];

    let mut shape = ConvexShape::new(corners.len() * CORNER_POINTS);
    for (i, (cx, cy, start)) in corners.into_iter().enumerate() {
        for j in 0..CORNER_POINTS {
            let angle = start + FRAC_PI_2 * j as f32 / (CORNER_POINTS - 1) as f32;
            shape.set_point(
                i * CORNER_POINTS + j,
                (cx + radius * angle.cos(), cy + radius * angle.sin()),
            );
        }
    }

    shape.set_fill_color(color);
    shape
}

pub struct Renderer {
    font: FBox<Font>,
    circle: FBox<Texture>,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> anyhow::Result<Self> {
        let font = load_font(config)?;

        let image = circle(SPRITE_RADIUS, Color::WHITE)?;
        let size = (SPRITE_RADIUS * 2) as i32;
        let mut circle = Texture::from_image(&image, Rect::new(0, 0, size, size))
            .map_err(|e| anyhow!("could not create bird texture: {e:?}"))?;
        circle.set_smooth(true);

        Ok(Self { font, circle })
    }

    pub fn draw<R: Rng>(&self, window: &mut RenderWindow, game: &GameState<R>) {
        let playfield = game.playfield();
        let (width, height) = (playfield.width as f32, playfield.height as f32);

        window.clear(BACKGROUND);

        for (x, pipe) in game.pipes() {
            window.draw(&rounded_rect(&pipe.top_rect(x), PIPE_CORNER_RADIUS, PIPE));
            window.draw(&rounded_rect(&pipe.bottom_rect(x), PIPE_CORNER_RADIUS, PIPE));
        }

        self.draw_ground(window, width, playfield.ground_y as f32, height);

        if let Some(bird) = game.bird() {
            let (x, y) = (bird.pos.x as f32, bird.pos.y as f32);
            let radius = bird.radius as f32;
            self.draw_circle(window, (x + SHADOW_OFFSET.0, y + SHADOW_OFFSET.1), radius, SHADOW);
            self.draw_circle(window, (x, y), radius, BIRD);
        }

        let centre = width / 2.0;
        self.draw_text(
            window,
            &game.score().to_string(),
            FONT_LARGE,
            TextStyle::BOLD,
            GRAY_TEXT,
            (centre, SCORE_Y),
        );

        if game.session() == Session::GameOver {
            let mut overlay = RectangleShape::new();
            overlay.set_size((width, height));
            overlay.set_fill_color(OVERLAY);
            window.draw(&overlay);

            let middle = (height as u32 / 2) as f32;
            let lines = [
                ("Game Over".to_owned(), FONT_LARGE, TextStyle::BOLD, HEADLINE, -50.0),
                (format!("Score: {}", game.score()), FONT_MEDIUM, TextStyle::BOLD, HEADLINE, 0.0),
                (
                    "Press Space or Click to Restart".to_owned(),
                    FONT_SMALL,
                    TextStyle::REGULAR,
                    GRAY_TEXT,
                    50.0,
                ),
            ];

            for (line, size, style, color, offset) in lines {
                self.draw_text(window, &line, size, style, color, (centre, middle + offset));
            }
        }
    }

    fn draw_ground(&self, window: &mut RenderWindow, width: f32, ground_y: f32, height: f32) {
        let mut ground = RectangleShape::new();
        ground.set_position((0.0, ground_y));
        ground.set_size((width, height - ground_y));
        ground.set_fill_color(GROUND);
        window.draw(&ground);

        let mut line = RectangleShape::new();
        line.set_position((0.0, ground_y - 1.0));
        line.set_size((width, 2.0));
        line.set_fill_color(GROUND_LINE);
        window.draw(&line);
    }

    fn draw_circle(&self, window: &mut RenderWindow, (x, y): (f32, f32), radius: f32, color: Color) {
        let mut sprite = Sprite::with_texture(&self.circle);
        let scale = radius / SPRITE_RADIUS as f32;

        sprite.set_origin((SPRITE_RADIUS as f32, SPRITE_RADIUS as f32));
        sprite.set_scale((scale, scale));
        sprite.set_position((x, y));
        sprite.set_color(color);

        window.draw(&sprite);
    }

    fn draw_text(
        &self,
        window: &mut RenderWindow,
        string: &str,
        size: u32,
        style: TextStyle,
        color: Color,
        (x, y): (f32, f32),
    ) {
        let mut text = Text::new(string, &self.font, size);
        text.set_style(style);
        text.set_fill_color(color);

        let bounds = text.local_bounds();
        text.set_origin((
            bounds.left + bounds.width / 2.0,
            bounds.top + bounds.height / 2.0,
        ));
        text.set_position((x, y));

        window.draw(&text);
    }
}

fn load_font(config: &RenderConfig) -> anyhow::Result<FBox<Font>> {
    for path in &config.fonts {
        let Some(path_str) = path.to_str() else {
            continue;
        };

        match Font::from_file(path_str) {
            Ok(mut font) => {
                log::info!("RENDER: Using font {}", path.display());
                font.set_smooth(true);
                return Ok(font);
            }
            Err(_) => log::debug!("RENDER: Font {} not usable", path.display()),
        }
    }

    Err(anyhow!(
        "none of the configured fonts could be loaded (tried {:?}), set render.fonts in the config",
        config.fonts
    ))
}
