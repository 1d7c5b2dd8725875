// Engine configuration passed from JS as JSON. Every field has a default so
// `{}` is a complete config.

use serde::{Deserialize, Serialize};

use crate::catalog::{Letter, MediaItem};
use crate::error::EngineError;

/// Top-level configuration for an [`crate::Experience`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceConfig {
    #[serde(default)]
    pub loading: LoadingSettings,
    #[serde(default)]
    pub evasive: EvasiveSettings,
    #[serde(default)]
    pub reveal: RevealSettings,
    /// Gallery items; the built-in catalog is used when absent.
    #[serde(default)]
    pub gallery: Option<Vec<MediaItem>>,
    #[serde(default)]
    pub letter: Letter,
    /// Fixed seed for reveal delays. Host randomness when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        ExperienceConfig {
            loading: LoadingSettings::default(),
            evasive: EvasiveSettings::default(),
            reveal: RevealSettings::default(),
            gallery: None,
            letter: Letter::default(),
            seed: None,
            log_level: default_log_level(),
        }
    }
}

impl ExperienceConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: ExperienceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.loading.validate()?;
        self.evasive.validate()?;
        self.reveal.validate()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Upper bound on loading ticks; a late poll runs every overdue tick.
pub const MAX_LOADING_STEPS: u64 = 10_000;

/// Loading screen progress simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingSettings {
    /// Time from 0% to 100%.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Progress tick interval.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Pause at 100% before the content is shown.
    #[serde(default = "default_completion_pause_ms")]
    pub completion_pause_ms: u64,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        LoadingSettings {
            duration_ms: default_duration_ms(),
            tick_ms: default_tick_ms(),
            completion_pause_ms: default_completion_pause_ms(),
        }
    }
}

impl LoadingSettings {
    /// Number of fixed increments needed to reach 100%.
    pub fn steps(&self) -> u64 {
        self.duration_ms.div_ceil(self.tick_ms.max(1)).max(1)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.tick_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "loading.tick_ms must be positive".to_string(),
            ));
        }
        if self.duration_ms < self.tick_ms {
            return Err(EngineError::InvalidConfig(format!(
                "loading.duration_ms ({}) is shorter than one tick ({})",
                self.duration_ms, self.tick_ms
            )));
        }
        if self.steps() > MAX_LOADING_STEPS {
            return Err(EngineError::InvalidConfig(format!(
                "loading needs {} ticks, at most {} allowed",
                self.steps(),
                MAX_LOADING_STEPS
            )));
        }
        Ok(())
    }
}

fn default_duration_ms() -> u64 {
    3000
}

fn default_tick_ms() -> u64 {
    50
}

fn default_completion_pause_ms() -> u64 {
    500
}

/// Evasive "No" button behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvasiveSettings {
    /// Pointer distance below which the control starts to dodge.
    #[serde(default = "default_threshold_px")]
    pub threshold_px: f32,
    /// Push strength multiplier.
    #[serde(default = "default_push_factor")]
    pub push_factor: f32,
    /// Distance kept between the control's travel bounds and the card edge.
    #[serde(default = "default_edge_margin_px")]
    pub edge_margin_px: f32,
    /// Quiet period before the control springs back.
    #[serde(default = "default_reset_after_ms")]
    pub reset_after_ms: u64,
    #[serde(default)]
    pub spring: SpringSettings,
}

impl Default for EvasiveSettings {
    fn default() -> Self {
        EvasiveSettings {
            threshold_px: default_threshold_px(),
            push_factor: default_push_factor(),
            edge_margin_px: default_edge_margin_px(),
            reset_after_ms: default_reset_after_ms(),
            spring: SpringSettings::default(),
        }
    }
}

impl EvasiveSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.threshold_px.is_finite() && self.threshold_px > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "evasive.threshold_px must be positive, got {}",
                self.threshold_px
            )));
        }
        if !(self.push_factor.is_finite() && self.push_factor >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "evasive.push_factor must be non-negative, got {}",
                self.push_factor
            )));
        }
        if !(self.edge_margin_px.is_finite() && self.edge_margin_px >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "evasive.edge_margin_px must be non-negative, got {}",
                self.edge_margin_px
            )));
        }
        Ok(())
    }
}

fn default_threshold_px() -> f32 {
    150.0
}

fn default_push_factor() -> f32 {
    2.0
}

fn default_edge_margin_px() -> f32 {
    50.0
}

fn default_reset_after_ms() -> u64 {
    2000
}

/// Spring the shell animates offsets with. Passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringSettings {
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
}

impl Default for SpringSettings {
    fn default() -> Self {
        SpringSettings {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
        }
    }
}

fn default_stiffness() -> f32 {
    100.0
}

fn default_damping() -> f32 {
    20.0
}

fn default_mass() -> f32 {
    0.5
}

/// Scroll-triggered reveal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealSettings {
    /// Intersection ratio at which a section counts as visible.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

impl Default for RevealSettings {
    fn default() -> Self {
        RevealSettings {
            visibility_threshold: default_visibility_threshold(),
        }
    }
}

impl RevealSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(EngineError::InvalidConfig(format!(
                "reveal.visibility_threshold must be within 0..=1, got {}",
                self.visibility_threshold
            )));
        }
        Ok(())
    }
}

fn default_visibility_threshold() -> f64 {
    0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_complete_config() {
        let config = ExperienceConfig::from_json("{}").unwrap();
        assert_eq!(config.loading.duration_ms, 3000);
        assert_eq!(config.loading.tick_ms, 50);
        assert_eq!(config.loading.completion_pause_ms, 500);
        assert_eq!(config.evasive.threshold_px, 150.0);
        assert_eq!(config.evasive.reset_after_ms, 2000);
        assert_eq!(config.evasive.spring.mass, 0.5);
        assert_eq!(config.reveal.visibility_threshold, 0.1);
        assert!(config.gallery.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config =
            ExperienceConfig::from_json(r#"{"loading":{"duration_ms":1000},"seed":7}"#).unwrap();
        assert_eq!(config.loading.duration_ms, 1000);
        assert_eq!(config.loading.tick_ms, 50);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn steps_cover_the_whole_duration() {
        let settings = LoadingSettings::default();
        assert_eq!(settings.steps(), 60);

        let uneven = LoadingSettings {
            duration_ms: 1010,
            tick_ms: 100,
            completion_pause_ms: 0,
        };
        assert_eq!(uneven.steps(), 11);
    }

    #[test]
    fn zero_tick_is_rejected() {
        let err = ExperienceConfig::from_json(r#"{"loading":{"tick_ms":0}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn runaway_tick_count_is_rejected() {
        let err = ExperienceConfig::from_json(
            r#"{"loading":{"duration_ms":100000000,"tick_ms":1}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let at_limit = LoadingSettings {
            duration_ms: MAX_LOADING_STEPS,
            tick_ms: 1,
            completion_pause_ms: 0,
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn duration_shorter_than_tick_is_rejected() {
        let err = ExperienceConfig::from_json(r#"{"loading":{"duration_ms":10,"tick_ms":50}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("shorter than one tick"));
    }

    #[test]
    fn bad_threshold_is_rejected() {
        assert!(ExperienceConfig::from_json(r#"{"evasive":{"threshold_px":0}}"#).is_err());
        assert!(ExperienceConfig::from_json(r#"{"reveal":{"visibility_threshold":1.5}}"#).is_err());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = ExperienceConfig::from_json("{").unwrap_err();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
