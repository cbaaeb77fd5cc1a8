use std::path::Path;

use epi_core::EaseCurve;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {value}")))
    }
}

/// One epicycle chain: a time-shifted, scaled copy of the construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Added to the rotation clock for this chain, in radians.
    pub phase_offset: f64,
    /// Visual scale about the chain centre.
    pub scale: f64,
    /// Draw construction circles and vectors, not just the trail.
    pub show_circles: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            phase_offset: 0.0,
            scale: 1.0,
            show_circles: true,
        }
    }
}

impl ChainConfig {
    fn echo(phase_offset: f64, scale: f64) -> Self {
        Self { phase_offset, scale, show_circles: false }
    }
}

/// Pointer-following mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub enabled: bool,
    /// Time to blend fully into (or out of) the cursor pattern.
    pub blend_duration_ms: f64,
    /// Per-frame smoothing factor for the followed position, in (0, 1].
    pub smoothing: f64,
    /// Radius of the small pattern traced around the pointer.
    pub pattern_radius: f64,
    /// Pointer counts as gone after this long without movement.
    pub idle_timeout_ms: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            blend_duration_ms: 800.0,
            smoothing: 0.15,
            pattern_radius: 40.0,
            idle_timeout_ms: 3000.0,
        }
    }
}

/// Click ripples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleConfig {
    pub duration_ms: f64,
    pub max_radius: f64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration_ms: 900.0,
            max_radius: 80.0,
        }
    }
}

/// Everything an [`Animator`](crate::Animator) needs, validated at construction.
///
/// Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    /// Epicycles kept after truncation.
    pub terms: usize,
    /// Points each source curve is sampled to before the DFT.
    pub sample_points: usize,
    pub size_scale: f64,
    /// Target radius is `min(width, height) * radius_fraction * size_scale`.
    pub radius_fraction: f64,
    /// Rotation clock step per tick, in radians.
    pub speed: f64,
    /// Trail points kept per chain.
    pub max_trail: usize,
    pub change_interval_min_ms: f64,
    pub change_interval_max_ms: f64,
    pub transition_duration_ms: f64,
    pub easing: EaseCurve,
    pub chains: Vec<ChainConfig>,
    /// Extra visual radius for small terms: `amp * (1 + boost * (1 - amp / max_amp))`.
    pub circle_boost: f64,
    /// Rotate each new curve to best match the previous one, and normalise winding.
    pub align_transitions: bool,
    /// Seed for reproducible curve sequences.
    pub seed: Option<u64>,
    pub cursor: CursorConfig,
    pub ripple: RippleConfig,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            terms: 80,
            sample_points: 600,
            size_scale: 1.0,
            radius_fraction: 0.35,
            speed: 0.01,
            max_trail: 600,
            change_interval_min_ms: 5000.0,
            change_interval_max_ms: 12000.0,
            transition_duration_ms: 2500.0,
            easing: EaseCurve::EaseInOutCubic,
            chains: vec![
                ChainConfig::default(),
                ChainConfig::echo(-0.25, 0.94),
                ChainConfig::echo(-0.5, 0.88),
            ],
            circle_boost: 0.6,
            align_transitions: true,
            seed: None,
            cursor: CursorConfig::default(),
            ripple: RippleConfig::default(),
        }
    }
}

impl AnimatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terms == 0 {
            return Err(invalid("terms", "must be at least 1"));
        }
        if self.sample_points < 3 {
            return Err(invalid("sample_points", "must be at least 3"));
        }
        check_positive("size_scale", self.size_scale)?;
        check_positive("radius_fraction", self.radius_fraction)?;
        check_positive("speed", self.speed)?;
        if self.max_trail == 0 {
            return Err(invalid("max_trail", "must be at least 1"));
        }
        if self.chains.is_empty() {
            return Err(invalid("chains", "at least one chain is required"));
        }
        for chain in &self.chains {
            check_positive("chains.scale", chain.scale)?;
            if !chain.phase_offset.is_finite() {
                return Err(invalid("chains.phase_offset", "must be finite"));
            }
        }
        check_positive("change_interval_min_ms", self.change_interval_min_ms)?;
        check_positive("change_interval_max_ms", self.change_interval_max_ms)?;
        if self.change_interval_min_ms > self.change_interval_max_ms {
            return Err(invalid(
                "change_interval_min_ms",
                format!(
                    "{} exceeds change_interval_max_ms {}",
                    self.change_interval_min_ms, self.change_interval_max_ms
                ),
            ));
        }
        check_positive("transition_duration_ms", self.transition_duration_ms)?;
        if !self.circle_boost.is_finite() || self.circle_boost < 0.0 {
            return Err(invalid("circle_boost", "must be finite and non-negative"));
        }
        check_positive("cursor.blend_duration_ms", self.cursor.blend_duration_ms)?;
        check_positive("cursor.idle_timeout_ms", self.cursor.idle_timeout_ms)?;
        check_positive("cursor.pattern_radius", self.cursor.pattern_radius)?;
        if !(self.cursor.smoothing > 0.0 && self.cursor.smoothing <= 1.0) {
            return Err(invalid(
                "cursor.smoothing",
                format!("must be in (0, 1], got {}", self.cursor.smoothing),
            ));
        }
        check_positive("ripple.duration_ms", self.ripple.duration_ms)?;
        check_positive("ripple.max_radius", self.ripple.max_radius)?;
        Ok(())
    }

    /// Radius the source curve's farthest sample is scaled to.
    pub fn target_radius(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.radius_fraction * self.size_scale
    }
}
