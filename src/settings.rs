//! Game settings and preferences
//!
//! Read once at startup from a JSON document: the canvas `data-settings`
//! attribute in the browser, `SPACE_ADVENTURES_SETTINGS` on native. Missing
//! fields take their defaults. Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::consts::NUMBER_STARS;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 200,
            QualityPreset::High => 512,
        }
    }

    /// Background star count
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => NUMBER_STARS / 4,
            QualityPreset::Medium => NUMBER_STARS,
            QualityPreset::High => NUMBER_STARS * 2,
        }
    }
}

/// Keyboard layout, matched against `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    pub fire: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: "a".to_string(),
            right: "d".to_string(),
            fire: "Enter".to_string(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle effects (explosions)
    pub particles: bool,
    /// Roll the ship while strafing
    pub ship_tilt: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Controls ===
    pub keys: KeyBindings,

    // === Accessibility ===
    /// Reduced motion (no ship roll)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            ship_tilt: true,
            show_fps: false,
            keys: KeyBindings::default(),
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings JSON and apply the chosen preset
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.apply_preset(settings.quality);
        Ok(settings)
    }

    /// Settings from an optional JSON source, falling back to defaults
    pub fn load(source: Option<&str>) -> Self {
        let settings = match source {
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }),
            None => Self::default(),
        };
        log::info!(
            "Quality {} ({} particles, {} stars)",
            settings.quality.as_str(),
            settings.max_particles(),
            settings.star_count()
        );
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the cosmetic roll
        if preset == QualityPreset::Low {
            self.ship_tilt = false;
        }
    }

    /// Effective ship roll (respects reduced_motion)
    pub fn effective_ship_tilt(&self) -> bool {
        self.ship_tilt && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn star_count(&self) -> usize {
        self.quality.star_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_cap() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 200);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_low_preset_and_reduced_motion() {
        let low = Settings::from_json(r#"{"quality":"Low","ship_tilt":true}"#).unwrap();
        assert!(!low.effective_ship_tilt());
        assert_eq!(low.star_count(), NUMBER_STARS / 4);
        assert_eq!(low.max_particles(), 60);

        let mut settings = Settings::default();
        assert!(settings.effective_ship_tilt());
        settings.reduced_motion = true;
        assert!(!settings.effective_ship_tilt());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"quality":"High"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.keys, KeyBindings::default());
        assert!(settings.particles);
        assert!(settings.effective_ship_tilt());
    }

    #[test]
    fn test_custom_keys() {
        let json = r#"{"keys":{"left":"ArrowLeft","fire":" "}}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.keys.left, "ArrowLeft");
        assert_eq!(settings.keys.right, "d");
        assert_eq!(settings.keys.fire, " ");
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        assert!(Settings::from_json("{not json").is_err());
        assert_eq!(Settings::load(Some("{not json")).quality, QualityPreset::Medium);
        assert_eq!(Settings::load(None).max_particles(), 200);
        assert!(Settings::load(Some(r#"{"show_fps":true}"#)).show_fps);
    }
}
