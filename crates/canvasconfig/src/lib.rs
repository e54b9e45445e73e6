use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

pub const CONFIG_FILE_NAME: &str = "canvas.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerPreference {
    #[default]
    High,
    Low,
}

impl FromStr for PowerPreference {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" | "performance" => Ok(Self::High),
            "low" | "lowpower" | "battery" => Ok(Self::Low),
            other => Err(format!("invalid power preference '{other}'; expected 'high' or 'low'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanvasConfig {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(
        default = "default_stats_interval",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub stats_interval: Duration,
    #[serde(default)]
    pub canvas: CanvasSection,
    #[serde(default)]
    pub window: WindowSection,
    /// Key name to scene index. A `[keys]` table replaces the digit defaults.
    #[serde(default = "default_keys")]
    pub keys: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanvasSection {
    #[serde(default)]
    pub initial_scene: i32,
    /// Frames per second cap; `0` follows the display refresh.
    #[serde(default)]
    pub max_fps: f32,
    #[serde(default)]
    pub power: PowerPreference,
    #[serde(default)]
    pub report_frames: bool,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            initial_scene: 0,
            max_fps: 0.0,
            power: PowerPreference::High,
            report_frames: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindowSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub size: WindowSize,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            size: WindowSize::default(),
        }
    }
}

/// Window size written as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

impl FromStr for WindowSize {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid size '{raw}'; expected WIDTHxHEIGHT");
        let (width, height) = raw
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(format!("size '{raw}' must be positive in both dimensions"));
        }
        Ok(Self { width, height })
    }
}

impl TryFrom<String> for WindowSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WindowSize> for String {
    fn from(value: WindowSize) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Keys that may carry a scene binding. Escape is reserved for closing the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyName {
    /// Lowercased ASCII letter or digit.
    Char(char),
    Space,
    Tab,
    Enter,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

impl FromStr for KeyName {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let mut chars = normalized.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch.is_ascii_alphanumeric() {
                return Ok(Self::Char(ch));
            }
        }
        match normalized.as_str() {
            "space" => Ok(Self::Space),
            "tab" => Ok(Self::Tab),
            "enter" | "return" => Ok(Self::Enter),
            "backspace" => Ok(Self::Backspace),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "home" => Ok(Self::Home),
            "end" => Ok(Self::End),
            "pageup" => Ok(Self::PageUp),
            "pagedown" => Ok(Self::PageDown),
            _ => Err(format!("unknown key '{raw}'")),
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyName::Char(ch) => return write!(f, "{ch}"),
            KeyName::Space => "space",
            KeyName::Tab => "tab",
            KeyName::Enter => "enter",
            KeyName::Backspace => "backspace",
            KeyName::Left => "left",
            KeyName::Right => "right",
            KeyName::Up => "up",
            KeyName::Down => "down",
            KeyName::Home => "home",
            KeyName::End => "end",
            KeyName::PageUp => "pageup",
            KeyName::PageDown => "pagedown",
        };
        f.write_str(name)
    }
}

fn default_title() -> String {
    "wgpu canvas".to_string()
}

fn default_stats_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_keys() -> BTreeMap<String, i32> {
    (0..10).map(|digit| (digit.to_string(), digit)).collect()
}

fn serialize_duration<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&humantime::format_duration(*value))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs_f64(v))
        }
    }

    deserializer.deserialize_any(Visitor)
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            version: 1,
            log_filter: None,
            stats_interval: default_stats_interval(),
            canvas: CanvasSection::default(),
            window: WindowSection::default(),
            keys: default_keys(),
        }
    }
}

impl CanvasConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: CanvasConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Stats logging interval, `None` when disabled.
    pub fn stats_interval(&self) -> Option<Duration> {
        (!self.stats_interval.is_zero()).then_some(self.stats_interval)
    }

    /// Frame cap, `None` when frames follow the display refresh.
    pub fn max_fps(&self) -> Option<f32> {
        (self.canvas.max_fps > 0.0).then_some(self.canvas.max_fps)
    }

    /// Parsed key bindings. Entries that fail to parse are skipped; `validate`
    /// rejects them up front.
    pub fn key_bindings(&self) -> BTreeMap<KeyName, i32> {
        self.keys
            .iter()
            .filter_map(|(key, scene)| key.parse().ok().map(|key| (key, *scene)))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if let Some(filter) = &self.log_filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid("log_filter may not be empty".into()));
            }
        }

        if self.canvas.initial_scene < 0 {
            return Err(ConfigError::Invalid(
                "canvas.initial_scene must be >= 0".into(),
            ));
        }

        if !self.canvas.max_fps.is_finite() || self.canvas.max_fps < 0.0 {
            return Err(ConfigError::Invalid("canvas.max_fps must be >= 0".into()));
        }

        if self.window.title.trim().is_empty() {
            return Err(ConfigError::Invalid("window.title may not be empty".into()));
        }

        for (key, scene) in &self.keys {
            key.parse::<KeyName>()
                .map_err(|err| ConfigError::Invalid(format!("keys: {err}")))?;
            if *scene < 0 {
                return Err(ConfigError::Invalid(format!(
                    "key '{key}' maps to negative scene {scene}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version = 1
log_filter = "renderer=debug,info"
stats_interval = "2s"

[canvas]
initial_scene = 2
max_fps = 30
power = "low"
report_frames = true

[window]
title = "scenes"
size = "640x480"

[keys]
"1" = 1
"q" = 4
space = 0
"#;

    #[test]
    fn parses_sample_config() {
        let config = CanvasConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.log_filter.as_deref(), Some("renderer=debug,info"));
        assert_eq!(config.stats_interval(), Some(Duration::from_secs(2)));
        assert_eq!(config.canvas.initial_scene, 2);
        assert_eq!(config.max_fps(), Some(30.0));
        assert_eq!(config.canvas.power, PowerPreference::Low);
        assert!(config.canvas.report_frames);
        assert_eq!(
            config.window.size,
            WindowSize {
                width: 640,
                height: 480
            }
        );

        let bindings = config.key_bindings();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings.get(&KeyName::Char('q')), Some(&4));
        assert_eq!(bindings.get(&KeyName::Space), Some(&0));
        assert_eq!(bindings.get(&KeyName::Char('2')), None, "table replaces defaults");
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = CanvasConfig::from_toml_str("version = 1").unwrap();
        assert_eq!(config, CanvasConfig::default());
        assert_eq!(config.max_fps(), None);
        assert_eq!(config.key_bindings().get(&KeyName::Char('7')), Some(&7));
        assert_eq!(config.window.title, "wgpu canvas");
    }

    #[test]
    fn zero_stats_interval_disables_stats() {
        let config = CanvasConfig::from_toml_str("version = 1\nstats_interval = 0").unwrap();
        assert_eq!(config.stats_interval(), None);
    }

    #[test]
    fn rejects_unknown_version() {
        let err = CanvasConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_size() {
        let err = CanvasConfig::from_toml_str(
            r#"
version = 1

[window]
size = "0x480"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!("800by600".parse::<WindowSize>().is_err());
    }

    #[test]
    fn rejects_reserved_and_unknown_keys() {
        for key in ["escape", "f13", "!"] {
            let config = format!("version = 1\n[keys]\n\"{key}\" = 1\n");
            let err = CanvasConfig::from_toml_str(&config).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{key} accepted");
        }
    }

    #[test]
    fn rejects_negative_values() {
        let err = CanvasConfig::from_toml_str("version = 1\n[canvas]\nmax_fps = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CanvasConfig::from_toml_str("version = 1\n[keys]\n\"3\" = -3").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = CanvasConfig::from_toml_str(SAMPLE).unwrap();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("size = \"640x480\""));
        assert_eq!(CanvasConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CanvasConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, CanvasConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "version = 1\n[canvas]\ninitial_scene = 3\n")
            .unwrap();
        let config = CanvasConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.canvas.initial_scene, 3);
    }
}
