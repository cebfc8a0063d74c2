//! Field configuration and partial overrides

use crate::color::{Rgba, TEAL};

/// Immutable settings a field is built with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Particles created at init and after every resize rebuild
    pub particle_count: usize,
    /// Fill paint for particle dots
    pub particle_color: Rgba,
    /// Base paint for proximity lines; alpha is modulated by distance
    pub line_color: Rgba,
    /// Upper bound (added to the minimum radius) when sampling radii
    pub particle_size: f32,
    /// Maximum center-to-center distance for two particles to be linked
    pub line_distance: f32,
    /// Width of the range velocity components are sampled from
    pub speed: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 80,
            particle_color: TEAL.with_alpha(0.5),
            line_color: TEAL.with_alpha(0.2),
            particle_size: 2.0,
            line_distance: 100.0,
            speed: 0.5,
        }
    }
}

impl FieldConfig {
    /// Denser, faster preset used behind the landing page hero
    pub fn hero() -> Self {
        Self {
            particle_count: 120,
            particle_color: TEAL.with_alpha(0.4),
            line_color: TEAL.with_alpha(0.15),
            particle_size: 2.5,
            line_distance: 120.0,
            speed: 0.6,
        }
    }

    /// Look a preset up by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "hero" => Some(Self::hero()),
            _ => None,
        }
    }

    /// Copy of `self` with every `Some` field of `overrides` taking precedence
    pub fn merged(&self, overrides: &FieldOverrides) -> Self {
        Self {
            particle_count: overrides.particle_count.unwrap_or(self.particle_count),
            particle_color: overrides.particle_color.unwrap_or(self.particle_color),
            line_color: overrides.line_color.unwrap_or(self.line_color),
            particle_size: overrides.particle_size.unwrap_or(self.particle_size),
            line_distance: overrides.line_distance.unwrap_or(self.line_distance),
            speed: overrides.speed.unwrap_or(self.speed),
        }
    }
}

/// Partial configuration; unset fields fall back to the base config
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldOverrides {
    pub particle_count: Option<usize>,
    pub particle_color: Option<Rgba>,
    pub line_color: Option<Rgba>,
    pub particle_size: Option<f32>,
    pub line_distance: Option<f32>,
    pub speed: Option<f32>,
}

impl From<FieldConfig> for FieldOverrides {
    fn from(config: FieldConfig) -> Self {
        Self {
            particle_count: Some(config.particle_count),
            particle_color: Some(config.particle_color),
            line_color: Some(config.line_color),
            particle_size: Some(config.particle_size),
            line_distance: Some(config.line_distance),
            speed: Some(config.speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_overrides() {
        let overrides = FieldOverrides {
            particle_count: Some(2),
            line_distance: Some(50.0),
            speed: Some(0.0),
            ..Default::default()
        };

        let merged = FieldConfig::default().merged(&overrides);

        assert_eq!(merged.particle_count, 2);
        assert_eq!(merged.line_distance, 50.0);
        assert_eq!(merged.speed, 0.0);
        assert_eq!(merged.particle_size, 2.0);
        assert_eq!(merged.line_color, TEAL.with_alpha(0.2));
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let merged = FieldConfig::default().merged(&FieldOverrides::default());
        assert_eq!(merged, FieldConfig::default());
    }

    #[test]
    fn test_full_overrides_replace_everything() {
        let merged = FieldConfig::default().merged(&FieldConfig::hero().into());
        assert_eq!(merged, FieldConfig::hero());
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(FieldConfig::preset("hero"), Some(FieldConfig::hero()));
        assert_eq!(FieldConfig::preset("default"), Some(FieldConfig::default()));
        assert_eq!(FieldConfig::preset("storm"), None);
    }
}
