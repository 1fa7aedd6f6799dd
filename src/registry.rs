//! The immutable configuration registry.
//!
//! [`ConfigRegistry`] is built exactly once, before the game loop starts, from
//! the compiled constants plus any `assets/tuning.toml` overrides.  Building it
//! validates everything up front (parallel array lengths, milestone order,
//! palette hex syntax, descriptor fields, probabilities) so a malformed value
//! fails at startup instead of producing wrong visuals or physics mid-game.
//!
//! After construction the data sits behind an [`Arc`] and nothing exposes a
//! mutable path into it.  Clones share the same backing data, so the registry
//! can be handed to as many systems or threads as needed without locking.
//!
//! ## Lookup policy
//!
//! Every lookup either returns the registered value or an
//! [`LookupError`](crate::error::LookupError).  There is no "or default"
//! variant: a renamed or misspelled key must surface at the call site.
//!
//! ## Usage in systems
//!
//! Add `registry: Res<ConfigRegistry>` to a system and read values with
//! `registry.get_float("ship_thrust")?`, `registry.palette().get(role)`, or
//! `registry.power_up(PowerUpKind::Shield)?`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use bevy::prelude::*;

use crate::catalog::{
    Catalog, CatalogKind, Descriptor, ItemKind, PowerUpKind, ITEM_DEFS, POWERUP_DEFS,
};
use crate::config::{TuningConfig, TuningSource};
use crate::error::{
    ensure_positive, ensure_same_len, ensure_unit_interval, ConsistencyError, LookupError,
    RegistryResult,
};
use crate::milestone::Milestones;
use crate::palette::{ColorValue, Palette};

/// A registered value.  The variant a name maps to never changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Int(u32),
    Float(f32),
    IntList(Vec<u32>),
    FloatList(Vec<f32>),
}

impl ConfigValue {
    #[inline]
    pub fn shape(&self) -> &'static str {
        match self {
            ConfigValue::Int(_) => "an integer",
            ConfigValue::Float(_) => "a float",
            ConfigValue::IntList(_) => "an integer list",
            ConfigValue::FloatList(_) => "a float list",
        }
    }
}

#[derive(Debug, PartialEq)]
struct RegistryData {
    values: BTreeMap<&'static str, ConfigValue>,
    palette: Palette,
    powerups: Catalog,
    items: Catalog,
    boss_levels: Milestones,
    combo_milestones: Milestones,
}

/// Process-wide, read-only tuning data.  Cheap to clone.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ConfigRegistry {
    inner: Arc<RegistryData>,
}

impl ConfigRegistry {
    /// Registry built from compiled constants only.
    pub fn defaults() -> RegistryResult<Self> {
        Self::from_tuning(&TuningConfig::default())
    }

    /// Read `path` (missing file = defaults) and build the registry.
    pub fn load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        Self::load_with_source(path).map(|(registry, _)| registry)
    }

    /// [`ConfigRegistry::load`] plus whether the override file was found.
    pub fn load_with_source(path: impl AsRef<Path>) -> RegistryResult<(Self, TuningSource)> {
        let (tuning, source) = TuningConfig::load_with_source(path)?;
        Ok((Self::from_tuning(&tuning)?, source))
    }

    /// Validate `tuning` and freeze it.  The first defect found is returned.
    pub fn from_tuning(tuning: &TuningConfig) -> RegistryResult<Self> {
        validate_scalars(tuning)?;

        let boss_levels = Milestones::new("boss_levels", tuning.spawning.boss_levels.clone())?;
        let combo_milestones =
            Milestones::new("combo_milestones", tuning.scoring.combo_milestones.clone())?;

        let palette = Palette::build(&tuning.palette)?;

        let powerup_keys: Vec<&str> = PowerUpKind::ALL.iter().map(|k| k.key()).collect();
        let powerups = Catalog::build(
            CatalogKind::PowerUps,
            &POWERUP_DEFS,
            &tuning.powerups,
            &powerup_keys,
        )?;
        let item_keys: Vec<&str> = ItemKind::ALL.iter().map(|k| k.key()).collect();
        let items = Catalog::build(CatalogKind::Items, &ITEM_DEFS, &tuning.items, &item_keys)?;

        Ok(Self {
            inner: Arc::new(RegistryData {
                values: collect_values(tuning),
                palette,
                powerups,
                items,
                boss_levels,
                combo_milestones,
            }),
        })
    }

    // ── Named values ──────────────────────────────────────────────────────────

    pub fn get(&self, name: &str) -> RegistryResult<&ConfigValue> {
        self.inner.values.get(name).ok_or_else(|| {
            LookupError::UnknownName {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn get_int(&self, name: &str) -> RegistryResult<u32> {
        match self.get(name)? {
            ConfigValue::Int(v) => Ok(*v),
            other => Err(wrong_shape(name, "an integer", other)),
        }
    }

    pub fn get_float(&self, name: &str) -> RegistryResult<f32> {
        match self.get(name)? {
            ConfigValue::Float(v) => Ok(*v),
            other => Err(wrong_shape(name, "a float", other)),
        }
    }

    pub fn get_int_list(&self, name: &str) -> RegistryResult<&[u32]> {
        match self.get(name)? {
            ConfigValue::IntList(v) => Ok(v),
            other => Err(wrong_shape(name, "an integer list", other)),
        }
    }

    pub fn get_float_list(&self, name: &str) -> RegistryResult<&[f32]> {
        match self.get(name)? {
            ConfigValue::FloatList(v) => Ok(v),
            other => Err(wrong_shape(name, "a float list", other)),
        }
    }

    /// Every registered name, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.inner.values.keys().copied().collect()
    }

    // ── Palette ───────────────────────────────────────────────────────────────

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.inner.palette
    }

    pub fn color(&self, role: &str) -> RegistryResult<&ColorValue> {
        self.inner.palette.lookup(role)
    }

    // ── Catalogs ──────────────────────────────────────────────────────────────

    pub fn catalog(&self, name: &str) -> RegistryResult<&Catalog> {
        Ok(match CatalogKind::from_key(name)? {
            CatalogKind::PowerUps => &self.inner.powerups,
            CatalogKind::Items => &self.inner.items,
        })
    }

    /// Type identifiers of `catalog`, in declaration order.
    pub fn list_types(&self, catalog: &str) -> RegistryResult<Vec<&str>> {
        Ok(self.catalog(catalog)?.ids())
    }

    pub fn describe(&self, catalog: &str, id: &str) -> RegistryResult<&Descriptor> {
        self.catalog(catalog)?.describe(id)
    }

    pub fn power_up(&self, kind: PowerUpKind) -> RegistryResult<&Descriptor> {
        self.inner.powerups.describe(kind.key())
    }

    pub fn item(&self, kind: ItemKind) -> RegistryResult<&Descriptor> {
        self.inner.items.describe(kind.key())
    }

    // ── Milestones ────────────────────────────────────────────────────────────

    pub fn milestones(&self, list: &str) -> RegistryResult<&Milestones> {
        match list {
            "boss_levels" => Ok(&self.inner.boss_levels),
            "combo_milestones" => Ok(&self.inner.combo_milestones),
            _ => Err(LookupError::UnknownMilestones {
                list: list.to_string(),
            }
            .into()),
        }
    }

    #[inline]
    pub fn boss_levels(&self) -> &Milestones {
        &self.inner.boss_levels
    }

    #[inline]
    pub fn combo_milestones(&self) -> &Milestones {
        &self.inner.combo_milestones
    }

    #[inline]
    pub fn is_boss_level(&self, level: u32) -> bool {
        self.inner.boss_levels.contains(level)
    }
}

fn wrong_shape(
    name: &str,
    expected: &'static str,
    found: &ConfigValue,
) -> crate::error::RegistryError {
    LookupError::WrongShape {
        name: name.to_string(),
        expected,
        found: found.shape(),
    }
    .into()
}

fn validate_scalars(t: &TuningConfig) -> RegistryResult<()> {
    // Display
    ensure_positive("canvas_width", t.display.canvas_width as f32)?;
    ensure_positive("canvas_height", t.display.canvas_height as f32)?;
    ensure_positive("ship_size", t.display.ship_size)?;
    ensure_positive("target_fps", t.display.target_fps as f32)?;

    // Physics
    ensure_positive("ship_max_speed", t.physics.ship_max_speed)?;
    ensure_unit_interval("ship_friction", t.physics.ship_friction)?;
    ensure_positive("bullet_speed", t.physics.bullet_speed)?;
    ensure_unit_interval("asteroid_jaggedness", t.physics.asteroid_jaggedness)?;
    if t.physics.asteroid_speed_min > t.physics.asteroid_speed_max {
        return Err(ConsistencyError::OutOfRange {
            name: "asteroid_speed_min".to_string(),
            value: t.physics.asteroid_speed_min,
            range: "[0.0, asteroid_speed_max]",
        }
        .into());
    }
    if t.physics.asteroid_vertices < 3 {
        return Err(ConsistencyError::OutOfRange {
            name: "asteroid_vertices".to_string(),
            value: t.physics.asteroid_vertices as f32,
            range: "[3, ∞)",
        }
        .into());
    }

    // Effects
    ensure_unit_interval("screen_shake_decay", t.effects.screen_shake_decay)?;

    // Spawning
    ensure_unit_interval("powerup_drop_chance", t.spawning.powerup_drop_chance)?;
    ensure_unit_interval("item_drop_chance", t.spawning.item_drop_chance)?;

    // Parallel arrays
    non_empty("stars_per_layer", t.effects.stars_per_layer.len())?;
    ensure_same_len(
        "stars_per_layer",
        t.effects.stars_per_layer.len(),
        "star_speeds",
        t.effects.star_speeds.len(),
    )?;
    non_empty("asteroid_radii", t.physics.asteroid_radii.len())?;
    ensure_same_len(
        "asteroid_radii",
        t.physics.asteroid_radii.len(),
        "asteroid_points",
        t.scoring.asteroid_points.len(),
    )?;
    for radius in &t.physics.asteroid_radii {
        ensure_positive("asteroid_radii", *radius)?;
    }

    Ok(())
}

fn non_empty(name: &str, len: usize) -> RegistryResult<()> {
    if len == 0 {
        Err(ConsistencyError::EmptyList {
            name: name.to_string(),
            min: 1,
        }
        .into())
    } else {
        Ok(())
    }
}

fn collect_values(t: &TuningConfig) -> BTreeMap<&'static str, ConfigValue> {
    use ConfigValue::{Float, FloatList, Int, IntList};

    let d = &t.display;
    let p = &t.physics;
    let tm = &t.timing;
    let e = &t.effects;
    let s = &t.spawning;
    let sc = &t.scoring;

    BTreeMap::from([
        // Display
        ("canvas_width", Int(d.canvas_width)),
        ("canvas_height", Int(d.canvas_height)),
        ("ship_size", Float(d.ship_size)),
        ("hud_font_size", Int(d.hud_font_size)),
        ("target_fps", Int(d.target_fps)),
        // Physics
        ("ship_thrust", Float(p.ship_thrust)),
        ("ship_friction", Float(p.ship_friction)),
        ("ship_max_speed", Float(p.ship_max_speed)),
        ("ship_rotation_speed", Float(p.ship_rotation_speed)),
        ("bullet_speed", Float(p.bullet_speed)),
        ("bullet_radius", Float(p.bullet_radius)),
        ("triple_shot_spread", Float(p.triple_shot_spread)),
        ("asteroid_speed_min", Float(p.asteroid_speed_min)),
        ("asteroid_speed_max", Float(p.asteroid_speed_max)),
        ("asteroid_radii", FloatList(p.asteroid_radii.clone())),
        ("asteroid_vertices", Int(p.asteroid_vertices)),
        ("asteroid_jaggedness", Float(p.asteroid_jaggedness)),
        (
            "asteroid_speed_scale_per_level",
            Float(p.asteroid_speed_scale_per_level),
        ),
        // Timing
        ("bullet_lifetime_ms", Int(tm.bullet_lifetime_ms)),
        ("fire_cooldown_ms", Int(tm.fire_cooldown_ms)),
        ("rapid_fire_cooldown_ms", Int(tm.rapid_fire_cooldown_ms)),
        ("invincibility_ms", Int(tm.invincibility_ms)),
        ("respawn_delay_ms", Int(tm.respawn_delay_ms)),
        ("powerup_duration_ms", Int(tm.powerup_duration_ms)),
        ("powerup_lifetime_ms", Int(tm.powerup_lifetime_ms)),
        ("combo_timeout_ms", Int(tm.combo_timeout_ms)),
        ("freeze_duration_ms", Int(tm.freeze_duration_ms)),
        ("magnet_duration_ms", Int(tm.magnet_duration_ms)),
        ("level_transition_ms", Int(tm.level_transition_ms)),
        // Effects
        ("stars_per_layer", IntList(e.stars_per_layer.clone())),
        ("star_speeds", FloatList(e.star_speeds.clone())),
        ("particle_count", Int(e.particle_count)),
        ("particle_lifetime_ms", Int(e.particle_lifetime_ms)),
        ("particle_speed", Float(e.particle_speed)),
        ("screen_shake_intensity", Float(e.screen_shake_intensity)),
        ("screen_shake_decay", Float(e.screen_shake_decay)),
        ("thrust_flame_length", Float(e.thrust_flame_length)),
        ("glow_blur", Float(e.glow_blur)),
        // Spawning
        ("initial_asteroids", Int(s.initial_asteroids)),
        ("asteroids_per_level", Int(s.asteroids_per_level)),
        ("max_asteroids", Int(s.max_asteroids)),
        ("safe_spawn_radius", Float(s.safe_spawn_radius)),
        ("powerup_drop_chance", Float(s.powerup_drop_chance)),
        ("item_drop_chance", Float(s.item_drop_chance)),
        ("starting_lives", Int(s.starting_lives)),
        ("max_lives", Int(s.max_lives)),
        ("max_inventory_slots", Int(s.max_inventory_slots)),
        ("boss_levels", IntList(s.boss_levels.clone())),
        ("boss_base_health", Int(s.boss_base_health)),
        ("boss_health_per_tier", Int(s.boss_health_per_tier)),
        // Scoring
        ("asteroid_points", IntList(sc.asteroid_points.clone())),
        ("boss_points", Int(sc.boss_points)),
        ("combo_milestones", IntList(sc.combo_milestones.clone())),
        ("extra_life_score", Int(sc.extra_life_score)),
        ("score_boost_multiplier", Int(sc.score_boost_multiplier)),
    ])
}

// ── Bevy integration ──────────────────────────────────────────────────────────

/// Publishes an already-built [`ConfigRegistry`] as a resource.
///
/// Build the registry *before* constructing the `App` so a configuration
/// defect stops the process before any system runs.
pub struct RegistryPlugin {
    registry: ConfigRegistry,
}

impl RegistryPlugin {
    pub fn new(registry: ConfigRegistry) -> Self {
        Self { registry }
    }
}

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.registry.clone())
            .add_systems(Startup, log_registry_summary);
    }
}

/// Startup system: one-line summary of what was loaded.
pub fn log_registry_summary(registry: Res<ConfigRegistry>) {
    info!(
        "Config registry ready: {} values, {} colour roles, {} power-ups, {} items, \
         boss levels {:?}",
        registry.names().len(),
        registry.palette().len(),
        registry.inner.powerups.len(),
        registry.inner.items.len(),
        registry.boss_levels().as_slice(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::error::RegistryError;
    use crate::palette::ColorRole;

    fn registry() -> ConfigRegistry {
        ConfigRegistry::defaults().expect("compiled defaults must validate")
    }

    #[test]
    fn defaults_mirror_constants() {
        let r = registry();
        assert_eq!(r.get_int("canvas_width").unwrap(), CANVAS_WIDTH);
        assert_eq!(r.get_float("ship_thrust").unwrap(), SHIP_THRUST);
        assert_eq!(r.get_int_list("stars_per_layer").unwrap(), &STARS_PER_LAYER);
        assert_eq!(r.get_float_list("star_speeds").unwrap(), &STAR_SPEEDS);
    }

    #[test]
    fn unknown_name_is_lookup_error() {
        let err = registry().get("unknown_name").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Lookup(LookupError::UnknownName {
                name: "unknown_name".into()
            })
        );
    }

    #[test]
    fn typed_read_never_coerces() {
        let r = registry();
        let err = r.get_float("canvas_width").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Lookup(LookupError::WrongShape {
                name: "canvas_width".into(),
                expected: "a float",
                found: "an integer",
            })
        );
        assert!(r.get_int("star_speeds").is_err());
        assert!(r.get_float_list("stars_per_layer").is_err());
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let names = registry().names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn clones_share_backing_data() {
        let a = registry();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
    }

    #[test]
    fn catalog_lookups() {
        let r = registry();
        assert_eq!(
            r.list_types("powerups").unwrap(),
            vec!["shield", "rapid_fire", "triple_shot", "speed_boost", "extra_life"]
        );
        assert_eq!(r.describe("items", "freeze").unwrap().symbol, 'F');
        assert!(r.list_types("weapons").unwrap_err().is_lookup());
        assert!(r.describe("powerups", "bomb").unwrap_err().is_lookup());
    }

    #[test]
    fn typed_kinds_always_resolve() {
        let r = registry();
        for kind in PowerUpKind::ALL {
            assert!(r.power_up(kind).is_ok(), "{kind:?}");
        }
        for kind in ItemKind::ALL {
            assert!(r.item(kind).is_ok(), "{kind:?}");
        }
    }

    #[test]
    fn milestone_lookup_by_name() {
        let r = registry();
        assert_eq!(r.milestones("boss_levels").unwrap(), r.boss_levels());
        assert!(r.milestones("wave_levels").unwrap_err().is_lookup());
        assert!(r.is_boss_level(10));
        assert!(!r.is_boss_level(11));
    }

    #[test]
    fn color_by_role_name() {
        let r = registry();
        assert_eq!(
            r.color("ship_primary").unwrap(),
            r.palette().get(ColorRole::ShipPrimary)
        );
        assert!(r.color("ship_glow").unwrap_err().is_lookup());
    }

    #[test]
    fn misaligned_star_layers_fail_construction() {
        let mut tuning = TuningConfig::default();
        tuning.effects.star_speeds.push(2.0);
        let err = ConfigRegistry::from_tuning(&tuning).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Consistency(ConsistencyError::LengthMismatch {
                left: "stars_per_layer",
                left_len: 3,
                right: "star_speeds",
                right_len: 4,
            })
        );
    }

    #[test]
    fn misaligned_asteroid_tiers_fail_construction() {
        let mut tuning = TuningConfig::default();
        tuning.scoring.asteroid_points.pop();
        assert!(ConfigRegistry::from_tuning(&tuning).unwrap_err().is_consistency());
    }

    #[test]
    fn unsorted_boss_levels_fail_construction() {
        let mut tuning = TuningConfig::default();
        tuning.spawning.boss_levels = vec![5, 15, 10];
        assert!(matches!(
            ConfigRegistry::from_tuning(&tuning).unwrap_err(),
            RegistryError::Consistency(ConsistencyError::NotAscending { .. })
        ));
    }

    #[test]
    fn drop_chance_above_one_fails_construction() {
        let mut tuning = TuningConfig::default();
        tuning.spawning.item_drop_chance = 1.2;
        assert!(matches!(
            ConfigRegistry::from_tuning(&tuning).unwrap_err(),
            RegistryError::Consistency(ConsistencyError::OutOfRange { .. })
        ));
    }

    #[test]
    fn inverted_asteroid_speed_range_fails_construction() {
        let mut tuning = TuningConfig::default();
        tuning.physics.asteroid_speed_min = 5.0;
        assert!(ConfigRegistry::from_tuning(&tuning).is_err());
    }

    #[test]
    fn layer_count_can_change_when_arrays_stay_aligned() {
        let mut tuning = TuningConfig::default();
        tuning.effects.stars_per_layer = vec![120, 60, 30, 10];
        tuning.effects.star_speeds = vec![0.05, 0.2, 0.5, 1.0];
        let r = ConfigRegistry::from_tuning(&tuning).unwrap();
        assert_eq!(r.get_int_list("stars_per_layer").unwrap().len(), 4);
    }
}
