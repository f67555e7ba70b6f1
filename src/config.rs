//! Backdrop tuning
//!
//! All magic numbers the host page may want to adjust live here. The
//! config deserializes from an optional JSON block embedded in the host
//! document; any omitted field falls back to its default.
//!
//! Distances are world units (the arena is 40x30 units), speeds are
//! world units per second.

use serde::Deserialize;

/// Tunable backdrop parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    /// Desktop-tier instance count
    pub instance_count: usize,
    /// Mobile-tier instance count
    pub instance_count_mobile: usize,
    /// Uniform render scale of one instance
    pub instance_scale: f32,
    /// Pointer force field radius
    pub force_radius: f32,
    /// Velocity kick at zero pointer distance, per step
    pub force_strength: f32,
    /// Downward gravity acceleration
    pub gravity: f32,
    /// Tangential velocity damping on contact, 0..1
    pub friction: f32,
    /// Bounce energy retention, 0..1
    pub restitution: f32,
    /// Resolve circle-circle contacts between dynamic bodies.
    /// Off degrades to body-boundary contacts only.
    pub body_collisions: bool,
    /// Seed for the initial body layout
    pub spawn_seed: u64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            instance_count: 300,
            instance_count_mobile: 180,
            instance_scale: 0.3,
            // Roughly 200 CSS px at the default camera framing
            force_radius: 20.0,
            force_strength: 0.4,
            gravity: 4.9,
            friction: 0.1,
            restitution: 0.6,
            body_collisions: true,
            spawn_seed: 0x5eed_f1e1d,
        }
    }
}

impl BackdropConfig {
    /// Parse a JSON override blob. Unknown fields are rejected so typos
    /// in the host document surface in the console instead of silently
    /// doing nothing.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiers_match_original() {
        let config = BackdropConfig::default();
        assert_eq!(config.instance_count, 300);
        assert_eq!(config.instance_count_mobile, 180);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BackdropConfig::from_json(r#"{"gravity": 9.8}"#).unwrap();
        assert_eq!(config.gravity, 9.8);
        assert_eq!(config.instance_count, 300);
        assert!(config.body_collisions);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = BackdropConfig::from_json("{}").unwrap();
        assert_eq!(config.force_radius, BackdropConfig::default().force_radius);
    }
}
