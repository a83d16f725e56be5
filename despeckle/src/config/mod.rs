//! Denoise parameters and their resolution from external sources.
//!
//! A [`Config`] holds the six raw tunables exactly as supplied. Nothing is
//! bounded on load: out-of-range values survive until [`Config::normalized`]
//! coerces them right before the engine runs.


use std::path::Path;

use serde::{Deserialize, Serialize};

/// Raw denoise tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of median passes used to build the fill candidate.
    pub strength: i32,
    /// Luminance at or below which a pixel is a dark candidate.
    pub threshold: i32,
    /// Minimum `local median - luminance` for a pixel to count as a speckle.
    pub delta: i32,
    /// Side of the square dilation element applied to the mask.
    pub expand: i32,
    /// Window of the local median reference.
    pub mask_size: i32,
    /// Window of the smoothing fill.
    pub fill_size: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strength: 2,
            threshold: 130,
            delta: 8,
            expand: 4,
            mask_size: 9,
            fill_size: 6,
        }
    }
}

/// Smallest window accepted for `mask_size` and `fill_size`.
pub const MIN_WINDOW_SIZE: i32 = 3;
/// Smallest dilation element; 1 disables dilation.
pub const MIN_EXPAND: i32 = 1;

/// Coerces a window size to an odd value no smaller than `minimum`.
///
/// Values below `minimum` become `minimum`, even values are bumped to the
/// next odd number, odd values pass through.
pub fn normalize_filter_size(value: i32, minimum: i32) -> i32 {
    if value < minimum {
        minimum
    } else if value % 2 == 0 {
        value + 1
    } else {
        value
    }
}

/// Parameters as the engine consumes them: window sizes odd and in range,
/// `strength` at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedConfig {
    pub strength: usize,
    pub threshold: i32,
    pub delta: i32,
    pub expand: usize,
    pub mask_size: usize,
    pub fill_size: usize,
}

impl NormalizedConfig {
    /// Dilation radius around each flagged pixel.
    #[inline]
    pub fn expand_radius(&self) -> usize {
        self.expand / 2
    }
}

/// Per-field overrides from a front-end (CLI flags, sliders).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub strength: Option<i32>,
    pub threshold: Option<i32>,
    pub delta: Option<i32>,
    pub expand: Option<i32>,
    pub mask_size: Option<i32>,
    pub fill_size: Option<i32>,
}

/// Hard failure of strict config parsing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Subset of fields present in a config document. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct ConfigPatch {
    strength: Option<i32>,
    threshold: Option<i32>,
    delta: Option<i32>,
    expand: Option<i32>,
    mask_size: Option<i32>,
    fill_size: Option<i32>,
}

impl From<ConfigPatch> for ConfigOverrides {
    fn from(patch: ConfigPatch) -> Self {
        Self {
            strength: patch.strength,
            threshold: patch.threshold,
            delta: patch.delta,
            expand: patch.expand,
            mask_size: patch.mask_size,
            fill_size: patch.fill_size,
        }
    }
}

const FIELD_NAMES: [&str; 6] = [
    "strength",
    "threshold",
    "delta",
    "expand",
    "mask_size",
    "fill_size",
];

impl Config {
    /// Applies filter-size normalization and the `strength` floor.
    pub fn normalized(&self) -> NormalizedConfig {
        NormalizedConfig {
            strength: self.strength.max(1) as usize,
            threshold: self.threshold,
            delta: self.delta,
            expand: normalize_filter_size(self.expand, MIN_EXPAND) as usize,
            mask_size: normalize_filter_size(self.mask_size, MIN_WINDOW_SIZE) as usize,
            fill_size: normalize_filter_size(self.fill_size, MIN_WINDOW_SIZE) as usize,
        }
    }

    /// Returns a copy with every present override applied.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        let fields = [
            (&mut self.strength, overrides.strength),
            (&mut self.threshold, overrides.threshold),
            (&mut self.delta, overrides.delta),
            (&mut self.expand, overrides.expand),
            (&mut self.mask_size, overrides.mask_size),
            (&mut self.fill_size, overrides.fill_size),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        self
    }

    /// Parses a JSON config document; absent fields keep their defaults.
    pub fn parse_strict(text: &str) -> Result<Self, ConfigError> {
        let patch: ConfigPatch = serde_json::from_str(text)?;
        Ok(Config::default().with_overrides(&patch.into()))
    }

    /// Best-effort merge of a config document onto `self`.
    ///
    /// Well-formed JSON is applied as a whole. Anything else is scanned field
    /// by field: each recognized `"key": <integer>` overwrites the base value,
    /// everything unparseable is skipped.
    pub fn merge_text(self, text: &str) -> Self {
        match serde_json::from_str::<ConfigPatch>(text) {
            Ok(patch) => self.with_overrides(&patch.into()),
            Err(err) => {
                tracing::debug!("Config is not strict JSON ({err}), scanning fields");
                self.with_overrides(&scan_fields(text))
            }
        }
    }

    /// Merges the config file at `path` onto `self`. A missing or unreadable
    /// file leaves `self` unchanged.
    pub fn merge_file(self, path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!("Loaded config from {}", path.display());
                self.merge_text(&text)
            }
            Err(err) => {
                tracing::debug!("Config {} not loaded: {err}", path.display());
                self
            }
        }
    }

    /// Pretty JSON document that [`Config::merge_text`] reads back.
    pub fn to_json(&self) -> common::serde::Result<String> {
        common::serde::serialize(self, common::SerdeFormat::Json)
    }
}

fn scan_fields(text: &str) -> ConfigOverrides {
    let [strength, threshold, delta, expand, mask_size, fill_size] =
        FIELD_NAMES.map(|key| scan_int_field(text, key));
    ConfigOverrides {
        strength,
        threshold,
        delta,
        expand,
        mask_size,
        fill_size,
    }
}

/// Finds the first `"key"`, then the first `:` after it, and parses the
/// integer that follows (leading whitespace allowed, optional `-`, no `+`).
fn scan_int_field(text: &str, key: &str) -> Option<i32> {
    let needle = format!("\"{key}\"");
    let key_pos = text.find(&needle)?;
    let after_key = &text[key_pos + needle.len()..];
    let colon = after_key.find(':')?;
    let value = after_key[colon + 1..].trim_start();

    let sign_len = usize::from(value.starts_with('-'));
    let digits_len = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    value[..sign_len + digits_len].parse().ok()
}
