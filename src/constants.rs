//! Centralised gameplay, physics and presentation constants.
//!
//! These are the compiled defaults behind every value in the
//! [`ConfigRegistry`](crate::registry::ConfigRegistry).  `assets/tuning.toml`
//! can override any subset of them at startup; whatever it leaves out falls
//! back to what is written here.
//!
//! ## Tuning guidance
//!
//! Speeds are in canvas pixels per frame at 60 Hz, durations in
//! milliseconds.  After editing, run `cargo test` — the registry tests reject
//! misaligned per-layer arrays and unsorted milestone lists before the game
//! ever sees them.

// ── Display ───────────────────────────────────────────────────────────────────

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 800;

/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 600;

/// Nose-to-tail length of the player ship triangle (px).
pub const SHIP_SIZE: f32 = 20.0;

pub const HUD_FONT_SIZE: u32 = 20;

/// Frames per second the game loop targets.  Speeds below assume this rate.
pub const TARGET_FPS: u32 = 60;

// ── Physics: Ship ─────────────────────────────────────────────────────────────

/// Acceleration added per frame while thrusting (px/frame²).
///
/// Tested range: 0.08–0.25.  Below 0.08 the ship feels unresponsive; above
/// 0.25 it overshoots small asteroids before the player can turn.
pub const SHIP_THRUST: f32 = 0.15;

/// Per-frame velocity multiplier (1.0 = frictionless).
pub const SHIP_FRICTION: f32 = 0.99;

/// Speed cap (px/frame).
pub const SHIP_MAX_SPEED: f32 = 8.0;

/// Turn rate (radians/frame).
pub const SHIP_ROTATION_SPEED: f32 = 0.08;

// ── Physics: Bullets ──────────────────────────────────────────────────────────

/// Bullet speed (px/frame).  Must stay above `SHIP_MAX_SPEED` or the ship can
/// outrun its own shots.
pub const BULLET_SPEED: f32 = 10.0;

pub const BULLET_RADIUS: f32 = 2.0;

/// Angular spread between the outer and centre bullet of a triple shot (radians).
pub const TRIPLE_SHOT_SPREAD: f32 = 0.2;

// ── Physics: Asteroids ────────────────────────────────────────────────────────

pub const ASTEROID_SPEED_MIN: f32 = 0.5;
pub const ASTEROID_SPEED_MAX: f32 = 2.5;

/// Collision radius per size tier, largest first (px).
///
/// A destroyed asteroid splits into two of the next tier; the last tier is
/// removed outright.  Must line up with [`ASTEROID_POINTS`].
pub const ASTEROID_RADII: [f32; 3] = [40.0, 20.0, 10.0];

/// Vertex count of generated asteroid outlines.
pub const ASTEROID_VERTICES: u32 = 10;

/// Fractional radial noise applied to each outline vertex.
///
/// 0.0 = perfect polygon, 0.5 = very jagged.  Above ~0.6 vertices can cross
/// the centre and the outline self-intersects.
pub const ASTEROID_JAGGEDNESS: f32 = 0.4;

/// Extra speed multiplier added per level (`speed × (1 + level × this)`).
pub const ASTEROID_SPEED_SCALE_PER_LEVEL: f32 = 0.1;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Bullet time-to-live (ms).
pub const BULLET_LIFETIME_MS: u32 = 1000;

pub const FIRE_COOLDOWN_MS: u32 = 250;

/// Cooldown while Rapid Fire is active.
pub const RAPID_FIRE_COOLDOWN_MS: u32 = 100;

/// Post-respawn invulnerability window (ms).  The ship blinks during this time.
pub const INVINCIBILITY_MS: u32 = 3000;

pub const RESPAWN_DELAY_MS: u32 = 1500;

/// How long a collected power-up stays active.
pub const POWERUP_DURATION_MS: u32 = 10_000;

/// How long an uncollected power-up floats before despawning.
pub const POWERUP_LIFETIME_MS: u32 = 8000;

/// Gap between kills that still extends the current combo (ms).
pub const COMBO_TIMEOUT_MS: u32 = 2000;

/// Freeze item: asteroid halt duration.
pub const FREEZE_DURATION_MS: u32 = 5000;

pub const MAGNET_DURATION_MS: u32 = 8000;

pub const LEVEL_TRANSITION_MS: u32 = 2000;

// ── Visual Effects ────────────────────────────────────────────────────────────

/// Star count for each parallax layer, farthest first.
///
/// Must have the same length as [`STAR_SPEEDS`].
pub const STARS_PER_LAYER: [u32; 3] = [100, 50, 25];

/// Scroll speed of each parallax layer (px/frame), farthest first.
pub const STAR_SPEEDS: [f32; 3] = [0.1, 0.3, 0.6];

/// Debris particles emitted per asteroid explosion.
pub const PARTICLE_COUNT: u32 = 15;

pub const PARTICLE_LIFETIME_MS: u32 = 800;

pub const PARTICLE_SPEED: f32 = 3.0;

/// Initial screen-shake offset (px) on ship death.
pub const SCREEN_SHAKE_INTENSITY: f32 = 8.0;

/// Per-frame multiplier applied to the shake offset.
pub const SCREEN_SHAKE_DECAY: f32 = 0.9;

pub const THRUST_FLAME_LENGTH: f32 = 12.0;

/// Gaussian blur radius for glow strokes (px).
pub const GLOW_BLUR: f32 = 10.0;

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Large asteroids at level 1.
pub const INITIAL_ASTEROIDS: u32 = 4;

/// Additional large asteroids per level.
pub const ASTEROIDS_PER_LEVEL: u32 = 2;

/// Hard cap on simultaneous asteroids, including fragments.
pub const MAX_ASTEROIDS: u32 = 30;

/// Radius around the ship kept clear when a wave spawns (px).
pub const SAFE_SPAWN_RADIUS: f32 = 120.0;

/// Probability that a destroyed asteroid drops a power-up.
pub const POWERUP_DROP_CHANCE: f32 = 0.1;

/// Probability that a destroyed asteroid drops an inventory item.
pub const ITEM_DROP_CHANCE: f32 = 0.05;

pub const STARTING_LIVES: u32 = 3;

pub const MAX_LIVES: u32 = 5;

pub const MAX_INVENTORY_SLOTS: u32 = 3;

/// Levels on which a boss replaces the normal wave.
pub const BOSS_LEVELS: [u32; 6] = [5, 10, 15, 20, 25, 30];

pub const BOSS_BASE_HEALTH: u32 = 20;

/// Extra boss hit points per boss encountered so far.
pub const BOSS_HEALTH_PER_TIER: u32 = 10;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Points per asteroid size tier, largest first.  Lines up with [`ASTEROID_RADII`].
pub const ASTEROID_POINTS: [u32; 3] = [20, 50, 100];

pub const BOSS_POINTS: u32 = 1000;

/// Combo counts that trigger an on-screen celebration.
pub const COMBO_MILESTONES: [u32; 7] = [5, 10, 15, 20, 25, 50, 100];

/// Score needed for each bonus life.
pub const EXTRA_LIFE_SCORE: u32 = 10_000;

/// Score Boost item: multiplier applied while active.
pub const SCORE_BOOST_MULTIPLIER: u32 = 2;
