use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::datetime::resolve_timezone;
use crate::selection::SelectionMode;

const CONFIG_ENV_VAR: &str = "DATEPICK_CONFIG";
const CONFIG_DIR_NAME: &str = "datepick";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_DISPLAY_FORMAT: &str = "%m/%d/%Y";

fn default_parse_formats() -> Vec<String> {
    vec![
        "%m/%d/%Y".to_string(),
        "%Y-%m-%d".to_string(),
        "%a %b %d %Y".to_string(),
    ]
}

fn default_display_format() -> String {
    DEFAULT_DISPLAY_FORMAT.to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_display_format")]
    pub display: String,
    #[serde(default = "default_parse_formats")]
    pub parse: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            display: default_display_format(),
            parse: default_parse_formats(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub mode: SelectionMode,
    pub timezone: Option<String>,
    #[serde(default)]
    pub dual: bool,
    #[serde(default)]
    pub inline: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            timezone: None,
            dual: false,
            inline: false,
            required: false,
            disabled: false,
            color: true,
            format: FormatConfig::default(),
            loaded_from: None,
        }
    }
}

impl PickerConfig {
    #[tracing::instrument(skip(override_path))]
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = resolve_config_path(override_path)? else {
            warn!("no datepick config found; using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if override_path.is_some() {
                return Err(anyhow!("config file {} does not exist", path.display()));
            }
            info!(file = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }

        info!(file = %path.display(), "loading config");
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut cfg = Self::from_toml(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        cfg.loaded_from = Some(path.to_path_buf());
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let mut cfg: PickerConfig = toml::from_str(raw)?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Applies `key=value` overrides; a leading `rc.` is ignored.
    #[tracing::instrument(skip(self, overrides))]
    pub fn apply_overrides<I>(&mut self, overrides: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (k, v) in overrides {
            let key = k.strip_prefix("rc.").unwrap_or(&k).to_string();
            debug!(key = %key, value = %v, "applying override");
            self.set(&key, &v)?;
        }
        self.sanitize();
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "mode" => self.mode = value.parse()?,
            "timezone" => self.timezone = Some(value.trim().to_string()),
            "dual" => self.dual = parse_bool(value)?,
            "inline" => self.inline = parse_bool(value)?,
            "required" => self.required = parse_bool(value)?,
            "disabled" => self.disabled = parse_bool(value)?,
            "color" => self.color = parse_bool(value)?,
            "format.display" => self.format.display = value.to_string(),
            "format.parse" => {
                self.format.parse = value
                    .split(',')
                    .map(str::trim)
                    .filter(|fmt| !fmt.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            other => return Err(anyhow!("unknown config key: {other}")),
        }
        Ok(())
    }

    pub fn timezone(&self) -> Tz {
        resolve_timezone(self.timezone.as_deref(), "config")
    }

    fn sanitize(&mut self) {
        if self.format.display.trim().is_empty() {
            warn!("empty display format; using default");
            self.format.display = default_display_format();
        }
        if self.format.parse.is_empty() {
            self.format.parse = default_parse_formats();
        }
        if let Some(tz) = self.timezone.as_deref()
            && tz.trim().parse::<Tz>().is_err()
        {
            error!(timezone = %tz, "unknown timezone id; using UTC");
            self.timezone = None;
        }
    }
}

#[tracing::instrument(skip(override_path))]
fn resolve_config_path(override_path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = override_path {
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if trimmed == "/dev/null" {
            return Ok(None);
        }
        if !trimmed.is_empty() {
            return Ok(Some(PathBuf::from(trimmed)));
        }
    }

    Ok(dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "on" | "true" => Ok(true),
        "0" | "n" | "no" | "off" | "false" => Ok(false),
        other => Err(anyhow!("invalid boolean value: {other}")),
    }
}
