use crate::consts;
use crate::game::Arena;
use log::LevelFilter;
use ratatui::{layout::Position, style::Style};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawConfig")]
pub(crate) struct Config {
    /// Gameplay & appearance settings
    pub(crate) settings: Settings,

    /// Where & how much to log
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

/// Everything a round of the game needs to know about how to play & look
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) arena: Arena,

    /// Cell at which every segment of a new snake starts
    pub(crate) start: Position,

    pub(crate) initial_length: usize,

    /// Time between movements of the snake
    pub(crate) tick_period: Duration,

    pub(crate) styles: Styles,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            arena: Arena {
                width: consts::ARENA_WIDTH,
                height: consts::ARENA_HEIGHT,
                margin: consts::ARENA_MARGIN,
            },
            start: Position::new(consts::SNAKE_START.0, consts::SNAKE_START.1),
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            tick_period: consts::TICK_PERIOD,
            styles: Styles::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Styles {
    pub(crate) snake: Style,
    pub(crate) food: Style,
    pub(crate) border: Style,
}

impl Default for Styles {
    fn default() -> Styles {
        Styles {
            snake: consts::SNAKE_STYLE,
            food: consts::FOOD_STYLE,
            border: consts::BORDER_STYLE,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LoggingConfig {
    /// File to write log messages to; nothing is logged if this is `None`
    pub(crate) file: Option<PathBuf>,

    pub(crate) level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    game: RawGameConfig,
    arena: RawArenaConfig,
    styles: RawStylesConfig,
    logging: RawLoggingConfig,
}

#[derive(Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawGameConfig {
    tick_ms: u64,
    initial_length: usize,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        let settings = Settings::default();
        RawGameConfig {
            tick_ms: u64::try_from(settings.tick_period.as_millis()).unwrap_or(u64::MAX),
            initial_length: settings.initial_length,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawArenaConfig {
    width: u16,
    height: u16,
    margin: u16,
    start: [u16; 2],
}

impl Default for RawArenaConfig {
    fn default() -> RawArenaConfig {
        RawArenaConfig {
            width: consts::ARENA_WIDTH,
            height: consts::ARENA_HEIGHT,
            margin: consts::ARENA_MARGIN,
            start: [consts::SNAKE_START.0, consts::SNAKE_START.1],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawStylesConfig {
    snake: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    border: Option<parse_style::Style>,
}

#[derive(Deserialize, Debug)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawLoggingConfig {
    file: Option<PathBuf>,
    level: String,
}

impl Default for RawLoggingConfig {
    fn default() -> RawLoggingConfig {
        RawLoggingConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = SettingsError;

    fn try_from(value: RawConfig) -> Result<Config, SettingsError> {
        let RawConfig {
            game,
            arena,
            styles,
            logging,
        } = value;
        if game.tick_ms == 0 {
            return Err(SettingsError::ZeroTick);
        }
        if game.initial_length == 0 {
            return Err(SettingsError::ZeroLength);
        }
        if arena.margin == 0 {
            return Err(SettingsError::NoBorder);
        }
        // One row of the display goes to the score bar
        let max_height = consts::DISPLAY_SIZE.height.saturating_sub(1);
        if arena.width > consts::DISPLAY_SIZE.width || arena.height > max_height {
            return Err(SettingsError::TooLarge {
                width: arena.width,
                height: arena.height,
                max_width: consts::DISPLAY_SIZE.width,
                max_height,
            });
        }
        let [x, y] = arena.start;
        let start = Position { x, y };
        let arena = Arena {
            width: arena.width,
            height: arena.height,
            margin: arena.margin,
        };
        if arena.interior().area() < 2 {
            return Err(SettingsError::TooSmall {
                width: arena.width,
                height: arena.height,
                margin: arena.margin,
            });
        }
        if !arena.in_interior(start) {
            return Err(SettingsError::StartOutside { x, y });
        }
        let level = logging
            .level
            .parse::<LevelFilter>()
            .map_err(|_| SettingsError::LogLevel(logging.level.clone()))?;
        let defaults = Styles::default();
        Ok(Config {
            settings: Settings {
                arena,
                start,
                initial_length: game.initial_length,
                tick_period: Duration::from_millis(game.tick_ms),
                styles: Styles {
                    snake: styles.snake.map_or(defaults.snake, Style::from),
                    food: styles.food.map_or(defaults.food, Style::from),
                    border: styles.border.map_or(defaults.border, Style::from),
                },
            },
            logging: LoggingConfig {
                file: logging.file,
                level,
            },
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SettingsError {
    #[error("tick period must be greater than zero")]
    ZeroTick,
    #[error("initial snake length must be at least 1")]
    ZeroLength,
    #[error("arena border must be at least one cell thick")]
    NoBorder,
    #[error("a {width}x{height} arena does not fit on the screen (at most {max_width}x{max_height})")]
    TooLarge {
        width: u16,
        height: u16,
        max_width: u16,
        max_height: u16,
    },
    #[error("a {width}x{height} arena with a border of {margin} leaves no room to play")]
    TooSmall { width: u16, height: u16, margin: u16 },
    #[error("snake start position ({x}, {y}) is not inside the arena's interior")]
    StartOutside { x: u16, y: u16 },
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
