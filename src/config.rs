//! Startup configuration, read once from a TOML file and validated before the
//! window opens.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub render: RenderConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Band at the bottom of the window reserved for the ground
    pub ground_height: u32,
    pub title: String,
    pub fps: u32,
    pub antialiasing: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 650,
            ground_height: 100,
            title: "Flappy Bird - Minimal Elegant UI".to_owned(),
            fps: 60,
            antialiasing: 4,
        }
    }
}

/// Per-tick physics constants. Velocities are in pixels per tick.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub flap_power: f64,
    pub pipe_speed: f64,
    pub pipe_gap: i32,
    /// Minimum distance between a gap and the top of the window or the ground
    pub gap_margin: i32,
    pub pipe_width: f64,
    pub pipe_interval_ms: u64,
    pub pipe_spawn_offset: f64,
    pub bird_x: f64,
    pub bird_radius: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            flap_power: -10.0,
            pipe_speed: 3.0,
            pipe_gap: 160,
            gap_margin: 150,
            pipe_width: 70.0,
            pipe_interval_ms: 1500,
            pipe_spawn_offset: 10.0,
            bird_x: 100.0,
            bird_radius: 18.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Tried in order, the first one that loads is used
    pub fonts: Vec<PathBuf>,
    pub debug_overlay: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fonts: [
                "assets/font.ttf",
                "C:\\Windows\\Fonts\\segoeuib.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
                "/Library/Fonts/Arial Unicode.ttf",
                "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            debug_overlay: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    EmptyWindow { width: u32, height: u32 },
    GroundTooTall { ground_height: u32, height: u32 },
    ZeroFrameRate,
    ZeroSpawnInterval,
    NotFinite { field: &'static str, value: f64 },
    NonPositive { field: &'static str, value: f64 },
    NegativeMargin { gap_margin: i32 },
    EmptyGapRange { min: i32, max: i32 },
    BirdOutsidePlayfield { bird_x: f64, width: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "could not read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "could not parse config {}: {source}", path.display())
            }
            Self::EmptyWindow { width, height } => {
                write!(f, "window must not be empty, got {width}x{height}")
            }
            Self::GroundTooTall {
                ground_height,
                height,
            } => write!(
                f,
                "ground height {ground_height} leaves no playfield in a window {height} high"
            ),
            Self::ZeroFrameRate => write!(f, "fps must be at least 1"),
            Self::ZeroSpawnInterval => write!(f, "pipe_interval_ms must be at least 1"),
            Self::NotFinite { field, value } => {
                write!(f, "{field} must be a finite number, got {value}")
            }
            Self::NegativeMargin { gap_margin } => {
                write!(f, "gap_margin must not be negative, got {gap_margin}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::EmptyGapRange { min, max } => write!(
                f,
                "pipe gap does not fit: gap top must lie in [{min}, {max}], which is empty"
            ),
            Self::BirdOutsidePlayfield { bird_x, width } => {
                write!(f, "bird_x {bird_x} is outside a window {width} wide")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GameConfig {
    /// Loads and validates `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let config = match fs::read_to_string(path) {
            Ok(content) => {
                log::info!("CONFIG: Loading {}", path.display());
                Self::from_toml(path, &content)?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("CONFIG: {} not found, using defaults", path.display());
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let WindowConfig {
            width,
            height,
            ground_height,
            fps,
            ..
        } = self.window;
        let physics = &self.physics;

        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyWindow { width, height });
        }
        if ground_height >= height {
            return Err(ConfigError::GroundTooTall {
                ground_height,
                height,
            });
        }
        if fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if physics.pipe_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }

        for (field, value) in [
            ("gravity", physics.gravity),
            ("flap_power", physics.flap_power),
            ("pipe_speed", physics.pipe_speed),
            ("pipe_width", physics.pipe_width),
            ("pipe_spawn_offset", physics.pipe_spawn_offset),
            ("bird_x", physics.bird_x),
            ("bird_radius", physics.bird_radius),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("pipe_speed", physics.pipe_speed),
            ("pipe_width", physics.pipe_width),
            ("bird_radius", physics.bird_radius),
            ("pipe_gap", physics.pipe_gap as f64),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if physics.gap_margin < 0 {
            return Err(ConfigError::NegativeMargin {
                gap_margin: physics.gap_margin,
            });
        }

        let (min, max) = self.gap_range();
        if min > max {
            return Err(ConfigError::EmptyGapRange { min, max });
        }

        if physics.bird_x < 0.0 || physics.bird_x > width as f64 {
            return Err(ConfigError::BirdOutsidePlayfield {
                bird_x: physics.bird_x,
                width,
            });
        }

        Ok(())
    }

    /// Inclusive bounds for the top of a pipe gap
    pub fn gap_range(&self) -> (i32, i32) {
        let margin = self.physics.gap_margin;
        let floor = self.window.height as i32 - self.window.ground_height as i32;
        let max = floor
            .saturating_sub(self.physics.pipe_gap)
            .saturating_sub(margin);
        (margin, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gap_range(), (150, 240));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = GameConfig::from_toml(
            Path::new("flappy.toml"),
            "[physics]\ngravity = 0.25\n\n[render]\ndebug_overlay = true\n",
        )
        .unwrap();

        assert_eq!(config.physics.gravity, 0.25);
        assert_eq!(config.physics.flap_power, -10.0);
        assert!(config.render.debug_overlay);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let err = GameConfig::from_toml(Path::new("flappy.toml"), "[window\nwidth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("flappy.toml"));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let err =
            GameConfig::from_toml(Path::new("flappy.toml"), "[window]\nwidth = \"wide\"\n")
                .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_gap_that_does_not_fit_is_rejected() {
        let mut config = GameConfig::default();
        config.physics.pipe_gap = 300;

        match config.validate() {
            Err(ConfigError::EmptyGapRange { min, max }) => {
                assert_eq!(min, 150);
                assert_eq!(max, 650 - 100 - 300 - 150);
            }
            other => panic!("expected EmptyGapRange, got {other:?}"),
        }
    }

    #[test]
    fn test_single_value_gap_range_is_accepted() {
        let mut config = GameConfig::default();
        config.physics.pipe_gap = 250;
        assert_eq!(config.gap_range(), (150, 150));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ground_taller_than_window_is_rejected() {
        let mut config = GameConfig::default();
        config.window.ground_height = 650;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GroundTooTall { .. })
        ));
    }

    #[test]
    fn test_non_positive_values_are_rejected() {
        let mut config = GameConfig::default();
        config.physics.pipe_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "pipe_speed",
                ..
            })
        ));

        let mut config = GameConfig::default();
        config.physics.bird_radius = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "bird_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let fields: [(&str, fn(&mut PhysicsConfig, f64)); 7] = [
            ("gravity", |p, v| p.gravity = v),
            ("flap_power", |p, v| p.flap_power = v),
            ("pipe_speed", |p, v| p.pipe_speed = v),
            ("pipe_width", |p, v| p.pipe_width = v),
            ("pipe_spawn_offset", |p, v| p.pipe_spawn_offset = v),
            ("bird_x", |p, v| p.bird_x = v),
            ("bird_radius", |p, v| p.bird_radius = v),
        ];

        for (name, set) in fields {
            for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let mut config = GameConfig::default();
                set(&mut config.physics, value);

                match config.validate() {
                    Err(ConfigError::NotFinite { field, .. }) => assert_eq!(field, name),
                    other => panic!("{name} = {value} should be rejected, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_nan_from_toml_is_rejected() {
        let config =
            GameConfig::from_toml(Path::new("flappy.toml"), "[physics]\ngravity = nan\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "gravity",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_margin_is_rejected() {
        for gap_margin in [-1, -1000, i32::MIN] {
            let mut config = GameConfig::default();
            config.physics.gap_margin = gap_margin;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NegativeMargin { .. })
            ));
        }
    }

    #[test]
    fn test_zero_margin_is_accepted() {
        let mut config = GameConfig::default();
        config.physics.gap_margin = 0;
        assert!(config.validate().is_ok());
        assert_eq!(config.gap_range(), (0, 390));
    }

    #[test]
    fn test_huge_margin_does_not_overflow() {
        let mut config = GameConfig::default();
        config.physics.gap_margin = i32::MAX;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGapRange { .. })
        ));
    }

    #[test]
    fn test_zero_rates_are_rejected() {
        let mut config = GameConfig::default();
        config.window.fps = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroFrameRate)));

        let mut config = GameConfig::default();
        config.physics.pipe_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSpawnInterval)
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load("this/path/does/not/exist/flappy.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
