//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a tuning file can
//! override it without a rebuild. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Visible area
    pub view_width: f32,
    pub view_height: f32,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_bottom_margin: f32,
    pub ship_speed: f32,
    pub starting_lives: u8,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,
    pub fire_cooldown_ticks: u32,

    // === Hostiles ===
    pub hostile_min_size: f32,
    pub hostile_max_size: f32,
    pub hostile_base_speed: f32,
    pub hostile_speed_jitter: f32,
    pub hostile_speed_per_level: f32,
    pub hostile_small_size: f32,
    pub hostile_small_points: u32,
    pub hostile_large_points: u32,

    // === Spawning ===
    pub spawn_interval_ticks: u32,
    pub spawn_interval_step: u32,
    pub spawn_interval_floor: u32,
    /// Each gap is drawn within this many ticks either side of the interval
    pub spawn_interval_jitter: u32,

    /// Ascending scores at which levels 2, 3, ... begin
    pub level_thresholds: Vec<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_bottom_margin: SHIP_BOTTOM_MARGIN,
            ship_speed: SHIP_SPEED,
            starting_lives: STARTING_LIVES,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,

            hostile_min_size: HOSTILE_MIN_SIZE,
            hostile_max_size: HOSTILE_MAX_SIZE,
            hostile_base_speed: HOSTILE_BASE_SPEED,
            hostile_speed_jitter: HOSTILE_SPEED_JITTER,
            hostile_speed_per_level: HOSTILE_SPEED_PER_LEVEL,
            hostile_small_size: HOSTILE_SMALL_SIZE,
            hostile_small_points: HOSTILE_SMALL_POINTS,
            hostile_large_points: HOSTILE_LARGE_POINTS,

            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            spawn_interval_jitter: SPAWN_INTERVAL_JITTER,

            level_thresholds: LEVEL_THRESHOLDS.to_vec(),
        }
    }
}

impl Tuning {
    /// Tuning for a viewport of the given size (everything else default)
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            view_width: width,
            view_height: height,
            ..Self::default()
        }
    }

    /// Parse a JSON tuning document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Repair values the simulation cannot work with
    ///
    /// Non-finite numbers fall back to their defaults. The ship and every
    /// hostile must fit inside the view, projectiles must travel upward, lives
    /// must be positive, and thresholds must ascend so level stays monotonic
    /// in score.
    pub fn sanitize(&mut self) {
        self.replace_non_finite();

        self.view_width = self.view_width.max(1.0);
        self.view_height = self.view_height.max(1.0);
        self.ship_width = self.ship_width.clamp(1.0, self.view_width);
        self.ship_height = self.ship_height.clamp(1.0, self.view_height);
        self.ship_bottom_margin = self.ship_bottom_margin.max(0.0);
        self.ship_speed = self.ship_speed.max(0.0);
        self.starting_lives = self.starting_lives.max(1);
        self.fire_cooldown_ticks = self.fire_cooldown_ticks.max(1);

        self.projectile_width = self.projectile_width.max(1.0);
        self.projectile_height = self.projectile_height.max(1.0);
        self.projectile_speed = self.projectile_speed.max(MIN_PROJECTILE_SPEED);

        self.hostile_min_size = self.hostile_min_size.clamp(1.0, self.view_width);
        self.hostile_max_size = self
            .hostile_max_size
            .clamp(self.hostile_min_size, self.view_width);
        self.hostile_base_speed = self.hostile_base_speed.max(0.1);
        self.hostile_speed_jitter = self.hostile_speed_jitter.max(0.0);
        self.hostile_speed_per_level = self.hostile_speed_per_level.max(0.0);

        self.spawn_interval_floor = self.spawn_interval_floor.max(1);
        self.spawn_interval_ticks = self.spawn_interval_ticks.max(self.spawn_interval_floor);

        self.level_thresholds.sort_unstable();
        self.level_thresholds.dedup();
    }

    fn replace_non_finite(&mut self) {
        let defaults = Self::default();
        let fields = [
            (&mut self.view_width, defaults.view_width),
            (&mut self.view_height, defaults.view_height),
            (&mut self.ship_width, defaults.ship_width),
            (&mut self.ship_height, defaults.ship_height),
            (&mut self.ship_bottom_margin, defaults.ship_bottom_margin),
            (&mut self.ship_speed, defaults.ship_speed),
            (&mut self.projectile_width, defaults.projectile_width),
            (&mut self.projectile_height, defaults.projectile_height),
            (&mut self.projectile_speed, defaults.projectile_speed),
            (&mut self.hostile_min_size, defaults.hostile_min_size),
            (&mut self.hostile_max_size, defaults.hostile_max_size),
            (&mut self.hostile_base_speed, defaults.hostile_base_speed),
            (&mut self.hostile_speed_jitter, defaults.hostile_speed_jitter),
            (&mut self.hostile_speed_per_level, defaults.hostile_speed_per_level),
            (&mut self.hostile_small_size, defaults.hostile_small_size),
        ];
        for (value, default) in fields {
            if !value.is_finite() {
                log::warn!("Non-finite tuning value {}, using {}", value, default);
                *value = default;
            }
        }
    }

    /// Resting y position of the ship's top edge
    pub fn ship_y(&self) -> f32 {
        (self.view_height - self.ship_bottom_margin - self.ship_height).max(0.0)
    }

    /// Rightmost x the ship's left edge may occupy
    pub fn ship_max_x(&self) -> f32 {
        (self.view_width - self.ship_width).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "view_width": 1024.0, "starting_lives": 5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.view_width, 1024.0);
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.ship_speed, SHIP_SPEED);
        assert_eq!(tuning.level_thresholds, LEVEL_THRESHOLDS.to_vec());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitize_repairs_values() {
        let mut tuning = Tuning {
            starting_lives: 0,
            hostile_max_size: 5.0,
            level_thresholds: vec![500, 150, 150],
            spawn_interval_ticks: 2,
            projectile_speed: -10.0,
            ship_speed: -5.0,
            ..Tuning::default()
        };
        tuning.sanitize();
        assert_eq!(tuning.projectile_speed, MIN_PROJECTILE_SPEED);
        assert_eq!(tuning.ship_speed, 0.0);
        assert_eq!(tuning.starting_lives, 1);
        assert_eq!(tuning.hostile_max_size, tuning.hostile_min_size);
        assert_eq!(tuning.level_thresholds, vec![150, 500]);
        assert_eq!(tuning.spawn_interval_ticks, tuning.spawn_interval_floor);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        // 1e39 overflows f32 and deserializes as infinity
        let tuning = Tuning::from_json(
            r#"{ "hostile_speed_jitter": 1e39, "view_width": 1e39, "projectile_speed": -1e39 }"#,
        )
        .expect("valid tuning");
        assert_eq!(tuning.hostile_speed_jitter, HOSTILE_SPEED_JITTER);
        assert_eq!(tuning.view_width, VIEW_WIDTH);
        assert_eq!(tuning.projectile_speed, PROJECTILE_SPEED);

        let mut tuning = Tuning {
            ship_speed: f32::NAN,
            hostile_max_size: f32::INFINITY,
            ..Tuning::default()
        };
        tuning.sanitize();
        assert_eq!(tuning.ship_speed, SHIP_SPEED);
        assert_eq!(tuning.hostile_max_size, HOSTILE_MAX_SIZE);
    }

    #[test]
    fn test_ship_geometry() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ship_y(), 540.0);
        assert_eq!(tuning.ship_max_x(), 760.0);
    }
}
