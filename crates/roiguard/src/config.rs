// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};

use roiguard_core::MouseButton;
use rune_cfg::RuneConfig;

use crate::affordance::{AffordanceSettings, MarkerStyle};
use crate::sync::Offset;

#[derive(Debug, Clone, PartialEq)]
pub struct RoiguardConfig {
    pub offset_x: f64,
    pub offset_y: f64,
    pub tag: String,
    pub metadata_key: String,
    pub marker_label: String,
    pub marker_colour: u32, // ARGB
    pub alternate_button: MouseButton,
}

impl Default for RoiguardConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            tag: "roi-delete".into(),
            metadata_key: "roi_position".into(),
            marker_label: "X".into(),
            marker_colour: 0xFFFF_0000,
            alternate_button: MouseButton::Secondary,
        }
    }
}

impl RoiguardConfig {
    pub fn affordance_settings(&self) -> AffordanceSettings {
        AffordanceSettings {
            tag: self.tag.clone(),
            metadata_key: self.metadata_key.clone(),
            offset: Offset::new(self.offset_x, self.offset_y),
            style: MarkerStyle {
                label: self.marker_label.clone(),
                colour: self.marker_colour,
                ..MarkerStyle::default()
            },
        }
    }
}

/// Load the user config, falling back to defaults when there is none.
pub fn load() -> Result<RoiguardConfig, String> {
    load_from(&default_user_config_path())
}

pub fn load_from(path: &Path) -> Result<RoiguardConfig, String> {
    if !path.exists() {
        return Ok(RoiguardConfig::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<RoiguardConfig, String> {
    let mut cfg = RoiguardConfig::default();

    if !rc.has("roiguard") {
        return Ok(cfg);
    }

    if let Some(v) = get_offset(rc, "roiguard.offset_x")? {
        cfg.offset_x = v;
    }

    if let Some(v) = get_offset(rc, "roiguard.offset_y")? {
        cfg.offset_y = v;
    }

    if let Some(tag) = rc
        .get_optional::<String>("roiguard.tag")
        .map_err(|e| format!("config error at roiguard.tag: {e}"))?
    {
        cfg.tag = non_empty(&tag).map_err(|e| format!("config error at roiguard.tag: {e}"))?;
    }

    if let Some(key) = rc
        .get_optional::<String>("roiguard.metadata_key")
        .map_err(|e| format!("config error at roiguard.metadata_key: {e}"))?
    {
        cfg.metadata_key =
            non_empty(&key).map_err(|e| format!("config error at roiguard.metadata_key: {e}"))?;
    }

    if let Some(label) = rc
        .get_optional::<String>("roiguard.marker_label")
        .map_err(|e| format!("config error at roiguard.marker_label: {e}"))?
    {
        cfg.marker_label = label;
    }

    if let Some(colour_str) = rc
        .get_optional::<String>("roiguard.marker_colour")
        .map_err(|e| format!("config error at roiguard.marker_colour: {e}"))?
    {
        cfg.marker_colour = parse_hex_colour(&colour_str)
            .map_err(|e| format!("config error at roiguard.marker_colour: {e}"))?;
    }

    if let Some(button) = rc
        .get_optional::<String>("roiguard.alternate_button")
        .map_err(|e| format!("config error at roiguard.alternate_button: {e}"))?
    {
        cfg.alternate_button = parse_alternate_button(&button)?;
    }

    Ok(cfg)
}

/// Offsets take a bare number or, since rune has no negative literals, a
/// quoted one (`offset_x "-4"`).
fn get_offset(rc: &RuneConfig, key: &str) -> Result<Option<f64>, String> {
    let v = match rc.get_optional::<f64>(key) {
        Ok(Some(v)) => v,
        _ => match rc
            .get_optional::<String>(key)
            .map_err(|e| format!("config error at {key}: {e}"))?
        {
            Some(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("config error at {key}: \"{s}\" is not a number"))?,
            None => return Ok(None),
        },
    };

    finite(v)
        .map(Some)
        .map_err(|e| format!("config error at {key}: {e}"))
}

fn parse_alternate_button(s: &str) -> Result<MouseButton, String> {
    match MouseButton::parse(s) {
        Some(MouseButton::Primary) | None => Err(format!(
            "config error at roiguard.alternate_button: expected secondary|middle, got \"{}\"",
            s.trim()
        )),
        Some(b) => Ok(b),
    }
}

fn finite(v: f64) -> Result<f64, String> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err("must be a finite number".into())
    }
}

fn non_empty(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("must not be empty".into());
    }
    Ok(s.to_string())
}

pub fn parse_hex_colour(s: &str) -> Result<u32, String> {
    let s = s.trim();

    let Some(hex) = s.strip_prefix('#') else {
        return Err("colour must start with #".into());
    };

    if hex.len() != 6 {
        return Err("colour must be 6 hex digits (RRGGBB)".into());
    }

    let rgb = u32::from_str_radix(hex, 16).map_err(|_| "invalid hex colour".to_string())?;

    Ok(0xFF00_0000 | rgb)
}

pub fn default_user_config_path() -> PathBuf {
    let dir: PathBuf = if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".config")
    };

    dir.join("roiguard").join("roiguard.rune")
}
