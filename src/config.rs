//! Startup tuning overrides loaded from `assets/tuning.toml`.
//!
//! [`TuningConfig`] mirrors every value in [`crate::constants`], grouped by
//! concern.  At startup the file is read once, merged over the compiled
//! defaults, validated, and frozen into a
//! [`ConfigRegistry`](crate::registry::ConfigRegistry).  Missing keys fall back
//! to the compile-time defaults, so a minimal TOML can override just the values
//! you care about:
//!
//! ```toml
//! [physics]
//! ship_thrust = 0.2
//!
//! [effects]
//! stars_per_layer = [120, 60, 30, 10]
//! star_speeds = [0.05, 0.2, 0.5, 1.0]
//!
//! [palette]
//! bullet_core = "#ff0"
//!
//! [items.bomb]
//! rarity = 0.05
//! ```
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/tuning.toml`.
//! 2. Restart the game — no recompilation required.
//!
//! Unlike a missing file, an unreadable or malformed file is an error: unknown
//! keys are rejected too, so a typo in a key name cannot silently leave the
//! default in place.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `TuningConfig::default()`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use bevy::log::info;
use serde::Deserialize;

use crate::catalog::DescriptorOverride;
use crate::constants::*;
use crate::error::{RegistryError, RegistryResult};
use crate::palette::RawColor;

/// Default override file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/tuning.toml";

/// All startup-tunable values.  Every field defaults to `src/constants.rs`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningConfig {
    pub display: DisplayConfig,
    pub physics: PhysicsConfig,
    pub timing: TimingConfig,
    pub effects: EffectsConfig,
    pub spawning: SpawningConfig,
    pub scoring: ScoringConfig,
    /// Colour role → hex or gradient.
    pub palette: BTreeMap<String, RawColor>,
    /// Power-up id → partial descriptor.
    pub powerups: BTreeMap<String, DescriptorOverride>,
    /// Item id → partial descriptor.
    pub items: BTreeMap<String, DescriptorOverride>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub ship_size: f32,
    pub hud_font_size: u32,
    pub target_fps: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    // ── Ship ──────────────────────────────────────────────────────────────────
    pub ship_thrust: f32,
    pub ship_friction: f32,
    pub ship_max_speed: f32,
    pub ship_rotation_speed: f32,

    // ── Bullets ───────────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub triple_shot_spread: f32,

    // ── Asteroids ─────────────────────────────────────────────────────────────
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    pub asteroid_radii: Vec<f32>,
    pub asteroid_vertices: u32,
    pub asteroid_jaggedness: f32,
    pub asteroid_speed_scale_per_level: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    pub bullet_lifetime_ms: u32,
    pub fire_cooldown_ms: u32,
    pub rapid_fire_cooldown_ms: u32,
    pub invincibility_ms: u32,
    pub respawn_delay_ms: u32,
    pub powerup_duration_ms: u32,
    pub powerup_lifetime_ms: u32,
    pub combo_timeout_ms: u32,
    pub freeze_duration_ms: u32,
    pub magnet_duration_ms: u32,
    pub level_transition_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    pub stars_per_layer: Vec<u32>,
    pub star_speeds: Vec<f32>,
    pub particle_count: u32,
    pub particle_lifetime_ms: u32,
    pub particle_speed: f32,
    pub screen_shake_intensity: f32,
    pub screen_shake_decay: f32,
    pub thrust_flame_length: f32,
    pub glow_blur: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawningConfig {
    pub initial_asteroids: u32,
    pub asteroids_per_level: u32,
    pub max_asteroids: u32,
    pub safe_spawn_radius: f32,
    pub powerup_drop_chance: f32,
    pub item_drop_chance: f32,
    pub starting_lives: u32,
    pub max_lives: u32,
    pub max_inventory_slots: u32,
    pub boss_levels: Vec<u32>,
    pub boss_base_health: u32,
    pub boss_health_per_tier: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub asteroid_points: Vec<u32>,
    pub boss_points: u32,
    pub combo_milestones: Vec<u32>,
    pub extra_life_score: u32,
    pub score_boost_multiplier: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ship_size: SHIP_SIZE,
            hud_font_size: HUD_FONT_SIZE,
            target_fps: TARGET_FPS,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            // Ship
            ship_thrust: SHIP_THRUST,
            ship_friction: SHIP_FRICTION,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            // Bullets
            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            triple_shot_spread: TRIPLE_SHOT_SPREAD,
            // Asteroids
            asteroid_speed_min: ASTEROID_SPEED_MIN,
            asteroid_speed_max: ASTEROID_SPEED_MAX,
            asteroid_radii: ASTEROID_RADII.to_vec(),
            asteroid_vertices: ASTEROID_VERTICES,
            asteroid_jaggedness: ASTEROID_JAGGEDNESS,
            asteroid_speed_scale_per_level: ASTEROID_SPEED_SCALE_PER_LEVEL,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            bullet_lifetime_ms: BULLET_LIFETIME_MS,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            rapid_fire_cooldown_ms: RAPID_FIRE_COOLDOWN_MS,
            invincibility_ms: INVINCIBILITY_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            powerup_duration_ms: POWERUP_DURATION_MS,
            powerup_lifetime_ms: POWERUP_LIFETIME_MS,
            combo_timeout_ms: COMBO_TIMEOUT_MS,
            freeze_duration_ms: FREEZE_DURATION_MS,
            magnet_duration_ms: MAGNET_DURATION_MS,
            level_transition_ms: LEVEL_TRANSITION_MS,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            stars_per_layer: STARS_PER_LAYER.to_vec(),
            star_speeds: STAR_SPEEDS.to_vec(),
            particle_count: PARTICLE_COUNT,
            particle_lifetime_ms: PARTICLE_LIFETIME_MS,
            particle_speed: PARTICLE_SPEED,
            screen_shake_intensity: SCREEN_SHAKE_INTENSITY,
            screen_shake_decay: SCREEN_SHAKE_DECAY,
            thrust_flame_length: THRUST_FLAME_LENGTH,
            glow_blur: GLOW_BLUR,
        }
    }
}

impl Default for SpawningConfig {
    fn default() -> Self {
        Self {
            initial_asteroids: INITIAL_ASTEROIDS,
            asteroids_per_level: ASTEROIDS_PER_LEVEL,
            max_asteroids: MAX_ASTEROIDS,
            safe_spawn_radius: SAFE_SPAWN_RADIUS,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            item_drop_chance: ITEM_DROP_CHANCE,
            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            max_inventory_slots: MAX_INVENTORY_SLOTS,
            boss_levels: BOSS_LEVELS.to_vec(),
            boss_base_health: BOSS_BASE_HEALTH,
            boss_health_per_tier: BOSS_HEALTH_PER_TIER,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            asteroid_points: ASTEROID_POINTS.to_vec(),
            boss_points: BOSS_POINTS,
            combo_milestones: COMBO_MILESTONES.to_vec(),
            extra_life_score: EXTRA_LIFE_SCORE,
            score_boost_multiplier: SCORE_BOOST_MULTIPLIER,
        }
    }
}

impl TuningConfig {
    /// Parse overrides from TOML text.  `origin` only labels errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> RegistryResult<Self> {
        toml::from_str::<TuningConfig>(contents).map_err(|e| RegistryError::Load {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read overrides from `path`.
    ///
    /// A missing file yields the compiled defaults.  A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Like [`TuningConfig::load`], but also reports whether the file was
    /// found, for callers that print before a log subscriber exists.
    pub fn load_with_source(path: impl AsRef<Path>) -> RegistryResult<(Self, TuningSource)> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No {} found; using compiled defaults", path.display());
                return Ok((Self::default(), TuningSource::Defaults));
            }
            Err(e) => {
                return Err(RegistryError::Load {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })
            }
        };

        let config = Self::from_toml_str(&contents, &path.display().to_string())?;
        info!("Loaded tuning overrides from {}", path.display());
        Ok((config, TuningSource::File))
    }
}

/// Where a [`TuningConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningSource {
    /// The override file was read and parsed.
    File,
    /// No override file exists; compiled defaults only.
    Defaults,
}
